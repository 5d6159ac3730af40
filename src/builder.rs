// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Builds a [`NutrientGraph`] from a survey snapshot.
//!
//! Each survey row becomes one or more pathways with derived nutrient masses:
//! fertiliser rows go straight to the fields, feed rows are chained through
//! the feed store, outputs leave via the sale KOUs and manure cycles through
//! the slurry store.  A fixed-fraction atmospheric loss is added on top of
//! the field nitrogen input; this is a simplifying assumption, not a physical
//! simulation.

use crate::config::BudgetConfig;
use crate::convert::crude_protein_to_nitrogen_pct;
use crate::kou::{FieldUse, Kou, KouType, LivestockGroup};
use crate::nutrient::NutrientMass;
use crate::pathway::{Pathway, PathwayType};
use crate::survey::{OutputKind, SourceClass, SurveyData};
use crate::{Error, NutrientGraph};

pub(crate) const FIELD_ID: &str = "field_main";
pub(crate) const HERD_ID: &str = "herd_main";
pub(crate) const FEED_STORE_ID: &str = "feed_store_main";
pub(crate) const SLURRY_STORE_ID: &str = "slurry_store_main";
pub(crate) const FEED_SUPPLIER_ID: &str = "feed_supplier";
pub(crate) const FERTILIZER_SUPPLIER_ID: &str = "fertilizer_supplier";
pub(crate) const MILK_OUTPUT_ID: &str = "milk_output";
pub(crate) const LIVESTOCK_SALES_ID: &str = "livestock_sales";
pub(crate) const SLURRY_IMPORTER_ID: &str = "slurry_importer";
pub(crate) const SLURRY_EXPORT_ID: &str = "slurry_export";

/// Builds the KOU graph with derived pathways from a survey snapshot.
///
/// Missing numeric survey fields are zero (enforced by the serde defaults on
/// [`SurveyData`]) and simply produce no pathways, so building never fails on
/// incomplete data, only on structural problems such as duplicate KOU ids.
pub fn build_graph(survey: &SurveyData, config: &BudgetConfig) -> Result<NutrientGraph, Error> {
    let mut kous = standard_kous(survey, config);
    let mut pathways = Vec::new();

    for row in &survey.inputs {
        if row.amount <= 0.0 {
            continue;
        }

        let multiplier = match row.source.class() {
            SourceClass::Fertiliser => config.unit_multipliers.fertiliser,
            SourceClass::Feed => config.unit_multipliers.feed,
        };

        // Feed rows quote crude protein; fertiliser rows quote N directly.
        let n_pct = if row.source.class() == SourceClass::Feed && row.cp_content > 0.0 {
            crude_protein_to_nitrogen_pct(row.cp_content)
        } else {
            row.n_content
        };

        let mass = row.amount * multiplier;
        let nutrients = NutrientMass::new(
            mass * n_pct / 100.0,
            mass * row.p_content / 100.0,
            mass * row.k_content / 100.0,
            mass * row.s_content / 100.0,
        );

        match row.source.class() {
            SourceClass::Fertiliser => {
                pathways.push(Pathway::new(
                    FERTILIZER_SUPPLIER_ID,
                    FIELD_ID,
                    PathwayType::FertilizerApplication,
                    nutrients,
                ));
            }
            SourceClass::Feed => {
                pathways.push(Pathway::new(
                    FEED_SUPPLIER_ID,
                    FEED_STORE_ID,
                    PathwayType::Purchase,
                    nutrients,
                ));
                pathways.push(Pathway::new(
                    FEED_STORE_ID,
                    HERD_ID,
                    PathwayType::Feeding,
                    nutrients,
                ));
            }
        }
    }

    for row in &survey.outputs {
        let nutrients = match row.kind {
            OutputKind::Milk => {
                if row.amount <= 0.0 {
                    continue;
                }
                // Milk N follows from the protein content, keeping it
                // physically consistent instead of trusting a quoted N%.
                // Rows without a protein figure fall back to the farm-level
                // milk CP%.
                let protein_pct = if row.protein_pct > 0.0 {
                    row.protein_pct
                } else {
                    survey.farm_info.milk_cp_pct
                };
                let litres = row.amount;
                let protein_kg = litres * protein_pct / 100.0;
                NutrientMass::new(
                    protein_kg * config.milk_protein_n_fraction,
                    litres * config.milk_p_per_litre,
                    0.0,
                    0.0,
                )
            }
            OutputKind::Livestock => {
                if row.head > 0.0 && row.avg_live_weight > 0.0 {
                    let carcass_kg = row.head * row.avg_live_weight * config.kill_out_ratio;
                    NutrientMass::new(
                        carcass_kg * config.carcass_n_fraction,
                        carcass_kg * config.carcass_p_fraction,
                        0.0,
                        0.0,
                    )
                } else {
                    if row.amount <= 0.0 {
                        continue;
                    }
                    // Legacy rows carry a mass in kg with direct percentages.
                    NutrientMass::new(
                        row.amount * row.n_content / 100.0,
                        row.amount * row.p_content / 100.0,
                        0.0,
                        0.0,
                    )
                }
            }
        };

        let target = match row.kind {
            OutputKind::Milk => MILK_OUTPUT_ID,
            OutputKind::Livestock => LIVESTOCK_SALES_ID,
        };
        pathways.push(Pathway::new(HERD_ID, target, PathwayType::Sale, nutrients));
    }

    let manure = &survey.manure;
    if manure.slurry_applied > 0.0 {
        let produced = slurry_mass(
            manure.slurry_applied,
            manure.slurry_n_content,
            manure.slurry_p_content,
            config,
        );

        pathways.push(Pathway::new(
            HERD_ID,
            SLURRY_STORE_ID,
            PathwayType::ManureProduction,
            produced,
        ));
        pathways.push(Pathway::new(
            SLURRY_STORE_ID,
            FIELD_ID,
            PathwayType::ManureApplication,
            produced,
        ));
    }

    if manure.slurry_imported > 0.0 {
        kous.push(Kou::new(KouType::External, SLURRY_IMPORTER_ID, "Slurry Import"));
        pathways.push(Pathway::new(
            SLURRY_IMPORTER_ID,
            SLURRY_STORE_ID,
            PathwayType::Purchase,
            slurry_mass(
                manure.slurry_imported,
                manure.slurry_imported_n_content,
                manure.slurry_imported_p_content,
                config,
            ),
        ));
    }

    if manure.slurry_exported > 0.0 {
        kous.push(Kou::new(KouType::Output, SLURRY_EXPORT_ID, "Slurry Export"));
        pathways.push(Pathway::new(
            SLURRY_STORE_ID,
            SLURRY_EXPORT_ID,
            PathwayType::Sale,
            slurry_mass(
                manure.slurry_exported,
                manure.slurry_exported_n_content,
                manure.slurry_exported_p_content,
                config,
            ),
        ));
    }

    // Volatilization estimate: a constant fraction of everything landing on
    // the fields.
    let total_field_n: f64 = pathways
        .iter()
        .filter(|p| p.to == FIELD_ID)
        .map(|p| p.nutrients.n)
        .sum();
    if total_field_n > 0.0 {
        pathways.push(Pathway::new(
            FIELD_ID,
            crate::kou::ATMOSPHERE_ID,
            PathwayType::AtmosphericLoss,
            NutrientMass::new(
                total_field_n * config.atmospheric_n_loss_fraction,
                0.0,
                0.0,
                total_field_n * config.atmospheric_s_loss_fraction,
            ),
        ));
    }

    NutrientGraph::try_new(kous, pathways)
}

/// The KOU set every survey-built graph starts from.  Store sizes and the
/// herd milk yield come from [`BudgetConfig::kou_defaults`].
fn standard_kous(survey: &SurveyData, config: &BudgetConfig) -> Vec<Kou> {
    let farm = &survey.farm_info;
    let defaults = &config.kou_defaults;
    let mut kous = vec![
        Kou::field(FIELD_ID, "Main Fields", farm.total_area, FieldUse::MixedCropping),
        Kou::livestock_group(
            HERD_ID,
            "Dairy Herd",
            LivestockGroup::MilkingCows,
            farm.milking_cows,
            defaults.milk_yield,
        ),
    ];

    if farm.youngstock_0_12 > 0.0 {
        kous.push(Kou::livestock_group(
            "herd_youngstock_0_12",
            "Youngstock 0-12m",
            LivestockGroup::Youngstock,
            farm.youngstock_0_12,
            0.0,
        ));
    }
    if farm.youngstock_12_calving > 0.0 {
        kous.push(Kou::livestock_group(
            "herd_youngstock_12_calving",
            "Youngstock 12m-calving",
            LivestockGroup::Youngstock,
            farm.youngstock_12_calving,
            0.0,
        ));
    }

    kous.push(Kou::store(
        KouType::FeedStore,
        FEED_STORE_ID,
        "Feed Store",
        defaults.feed_store_capacity,
        defaults.feed_store_stock,
    ));

    let mut slurry_store = Kou::store(
        KouType::ManureStore,
        SLURRY_STORE_ID,
        "Slurry Store",
        defaults.slurry_store_capacity,
        survey.manure.slurry_applied,
    );
    slurry_store.properties.store_content = NutrientMass::new(
        survey.manure.slurry_n_content,
        survey.manure.slurry_p_content,
        0.0,
        0.0,
    );
    kous.push(slurry_store);

    kous.push(Kou::new(KouType::External, FEED_SUPPLIER_ID, "Feed Supplier"));
    kous.push(Kou::new(
        KouType::External,
        FERTILIZER_SUPPLIER_ID,
        "Fertilizer Supplier",
    ));
    kous.push(Kou::new(KouType::Output, MILK_OUTPUT_ID, "Milk Sales"));
    kous.push(Kou::new(KouType::Output, LIVESTOCK_SALES_ID, "Livestock Sales"));

    kous
}

/// Nutrient mass of a slurry volume: N and P from the surveyed contents, K
/// and S from the configured per-m³ estimates.
fn slurry_mass(volume: f64, n_content: f64, p_content: f64, config: &BudgetConfig) -> NutrientMass {
    NutrientMass::new(
        volume * n_content,
        volume * p_content,
        volume * config.slurry_k_per_m3,
        volume * config.slurry_s_per_m3,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{FarmInfo, InputRow, InputSource, ManureInfo, OutputRow};

    fn fertiliser_row(amount_t: f64, n_pct: f64) -> InputRow {
        InputRow {
            source: InputSource::FertiliserN,
            label: "Nitrogen Fertiliser".into(),
            amount: amount_t,
            dm_pct: 0.0,
            cp_content: 0.0,
            n_content: n_pct,
            p_content: 0.0,
            k_content: 0.0,
            s_content: 0.0,
        }
    }

    fn survey_with(inputs: Vec<InputRow>, outputs: Vec<OutputRow>, manure: ManureInfo) -> SurveyData {
        SurveyData {
            farm_info: FarmInfo {
                name: "Demo Farm".into(),
                total_area: 120.0,
                milking_cows: 180.0,
                youngstock_0_12: 45.0,
                youngstock_12_calving: 60.0,
                milk_cp_pct: 3.2,
            },
            inputs,
            outputs,
            manure,
        }
    }

    #[test]
    fn test_fertiliser_routes_directly_to_fields() {
        let survey = survey_with(vec![fertiliser_row(8.5, 34.5)], vec![], ManureInfo::default());
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let application = graph
            .pathways()
            .find(|p| p.kind == PathwayType::FertilizerApplication)
            .unwrap();
        assert_eq!(application.from, FERTILIZER_SUPPLIER_ID);
        assert_eq!(application.to, FIELD_ID);
        // 8.5 t at 34.5% N is 2932.5 kg N.
        assert!((application.nutrients.n - 2932.5).abs() < 1e-9);
    }

    #[test]
    fn test_feed_chains_through_the_feed_store() {
        let survey = survey_with(
            vec![InputRow {
                source: InputSource::Silage,
                label: "Forage".into(),
                amount: 2800.0,
                dm_pct: 30.0,
                cp_content: 14.0,
                n_content: 0.0,
                p_content: 0.06,
                k_content: 2.25,
                s_content: 0.03,
            }],
            vec![],
            ManureInfo::default(),
        );
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let purchase = graph
            .pathways()
            .find(|p| p.kind == PathwayType::Purchase)
            .unwrap();
        let feeding = graph
            .pathways()
            .find(|p| p.kind == PathwayType::Feeding)
            .unwrap();

        // CP 14% over 6.25 gives 2.24% N over 2800 t.
        let expected_n = 2800.0 * 1000.0 * (14.0 / 6.25) / 100.0;
        assert!((purchase.nutrients.n - expected_n).abs() < 1e-6);
        assert_eq!(purchase.nutrients, feeding.nutrients);
        assert_eq!(purchase.to, feeding.from);
    }

    #[test]
    fn test_milk_nitrogen_comes_from_protein() {
        let survey = survey_with(
            vec![],
            vec![OutputRow {
                kind: OutputKind::Milk,
                label: "Milk Sales".into(),
                amount: 1_440_000.0,
                fat_pct: 4.1,
                protein_pct: 3.3,
                head: 0.0,
                avg_live_weight: 0.0,
                n_content: 0.53,
                p_content: 0.09,
            }],
            ManureInfo::default(),
        );
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let sale = graph.pathways().find(|p| p.kind == PathwayType::Sale).unwrap();
        assert_eq!(sale.to, MILK_OUTPUT_ID);
        // 1.44M litres at 3.3% protein with 16% N in protein.
        assert!((sale.nutrients.n - 7603.2).abs() < 1e-6);
        assert!((sale.nutrients.p - 1296.0).abs() < 1e-6);
    }

    #[test]
    fn test_milk_without_protein_falls_back_to_farm_cp() {
        let survey = survey_with(
            vec![],
            vec![OutputRow {
                kind: OutputKind::Milk,
                label: "Milk Sales".into(),
                amount: 1_440_000.0,
                fat_pct: 4.1,
                protein_pct: 0.0,
                head: 0.0,
                avg_live_weight: 0.0,
                n_content: 0.0,
                p_content: 0.0,
            }],
            ManureInfo::default(),
        );
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        // The fixture farm quotes 3.2% milk CP.
        let sale = graph.pathways().find(|p| p.kind == PathwayType::Sale).unwrap();
        assert!((sale.nutrients.n - 1_440_000.0 * 0.032 * 0.16).abs() < 1e-6);
    }

    #[test]
    fn test_store_sizes_and_milk_yield_come_from_config() {
        let mut config = BudgetConfig::default();
        config.kou_defaults.feed_store_capacity = 800.0;
        config.kou_defaults.slurry_store_capacity = 7500.0;
        config.kou_defaults.milk_yield = 9200.0;

        let survey = survey_with(vec![], vec![], ManureInfo::default());
        let graph = build_graph(&survey, &config).unwrap();

        assert_eq!(graph.kou(FEED_STORE_ID).unwrap().properties.capacity, 800.0);
        assert_eq!(
            graph.kou(SLURRY_STORE_ID).unwrap().properties.capacity,
            7500.0
        );
        assert_eq!(graph.kou(HERD_ID).unwrap().properties.milk_yield, 9200.0);
    }

    #[test]
    fn test_livestock_sales_use_carcass_composition() {
        let survey = survey_with(
            vec![],
            vec![OutputRow {
                kind: OutputKind::Livestock,
                label: "Cull Cows".into(),
                amount: 0.0,
                fat_pct: 0.0,
                protein_pct: 0.0,
                head: 20.0,
                avg_live_weight: 650.0,
                n_content: 0.0,
                p_content: 0.0,
            }],
            ManureInfo::default(),
        );
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let sale = graph.pathways().find(|p| p.kind == PathwayType::Sale).unwrap();
        let carcass = 20.0 * 650.0 * 0.54;
        assert!((sale.nutrients.n - carcass * 0.025).abs() < 1e-9);
        assert!((sale.nutrients.p - carcass * 0.007).abs() < 1e-9);
    }

    #[test]
    fn test_livestock_sales_fall_back_to_legacy_percentages() {
        let survey = survey_with(
            vec![],
            vec![OutputRow {
                kind: OutputKind::Livestock,
                label: "Cull Cows".into(),
                amount: 12_000.0,
                fat_pct: 0.0,
                protein_pct: 0.0,
                head: 0.0,
                avg_live_weight: 0.0,
                n_content: 2.5,
                p_content: 0.7,
            }],
            ManureInfo::default(),
        );
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let sale = graph.pathways().find(|p| p.kind == PathwayType::Sale).unwrap();
        assert!((sale.nutrients.n - 300.0).abs() < 1e-9);
        assert!((sale.nutrients.p - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_manure_production_and_application_share_one_mass() {
        let survey = survey_with(
            vec![],
            vec![],
            ManureInfo {
                slurry_applied: 4200.0,
                slurry_n_content: 2.5,
                slurry_p_content: 0.5,
                ..ManureInfo::default()
            },
        );
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let production = graph
            .pathways()
            .find(|p| p.kind == PathwayType::ManureProduction)
            .unwrap();
        let application = graph
            .pathways()
            .find(|p| p.kind == PathwayType::ManureApplication)
            .unwrap();

        assert_eq!(production.nutrients, application.nutrients);
        assert!((production.nutrients.n - 10_500.0).abs() < 1e-9);
        assert!((production.nutrients.k - 4200.0 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_imports_and_exports_create_external_pathways() {
        let survey = survey_with(
            vec![],
            vec![],
            ManureInfo {
                slurry_imported: 500.0,
                slurry_imported_n_content: 2.5,
                slurry_imported_p_content: 0.5,
                slurry_exported: 300.0,
                slurry_exported_n_content: 2.5,
                slurry_exported_p_content: 0.5,
                ..ManureInfo::default()
            },
        );
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let import = graph
            .pathways()
            .find(|p| p.from == SLURRY_IMPORTER_ID)
            .unwrap();
        assert_eq!(import.to, SLURRY_STORE_ID);
        assert!((import.nutrients.n - 1250.0).abs() < 1e-9);

        let export = graph.pathways().find(|p| p.to == SLURRY_EXPORT_ID).unwrap();
        assert_eq!(export.from, SLURRY_STORE_ID);
        assert!((export.nutrients.n - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_atmospheric_loss_is_a_fraction_of_field_nitrogen() {
        let survey = survey_with(vec![fertiliser_row(8.5, 34.5)], vec![], ManureInfo::default());
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();

        let loss = graph
            .pathways()
            .find(|p| p.kind == PathwayType::AtmosphericLoss)
            .unwrap();
        assert_eq!(loss.to, crate::kou::ATMOSPHERE_ID);
        assert!((loss.nutrients.n - 293.25).abs() < 1e-9);
        assert!((loss.nutrients.s - 29.325).abs() < 1e-9);
    }

    #[test]
    fn test_empty_survey_builds_an_empty_graph() {
        let graph = build_graph(&SurveyData::default(), &BudgetConfig::default()).unwrap();
        assert_eq!(graph.pathways().count(), 0);
        assert!(graph.kou(FIELD_ID).is_ok());
    }

    #[test]
    fn test_youngstock_groups_appear_when_counted() {
        let survey = survey_with(vec![], vec![], ManureInfo::default());
        let graph = build_graph(&survey, &BudgetConfig::default()).unwrap();
        assert!(graph.kou("herd_youngstock_0_12").is_ok());
        assert_eq!(graph.total_livestock(), 180.0 + 45.0 + 60.0);
    }
}
