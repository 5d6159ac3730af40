// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! This module contains the configuration options for the nutrient budget:
//! regulatory thresholds, availability fractions, loss fractions, unit
//! multipliers and the GHG regression coefficients.
//!
//! Every constant the engine relies on lives here so that callers can swap in
//! regionally calibrated values; the defaults reproduce the reference
//! survey's tables.

use serde::{Deserialize, Serialize};

use crate::nutrient::Nutrient;

/// Application-rate thresholds for one nutrient, in kg/ha.
///
/// Buckets are resolved top-down with strict `>` comparisons, so a value
/// exactly on a boundary falls into the lower (safer) bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NutrientThresholds {
    /// Regulatory ceiling (nitrogen only; ignored for other nutrients).
    pub regulatory_limit: f64,
    /// Approaching the regulatory limit (nitrogen only).
    pub warning: f64,
    /// Excess application (non-nitrogen nutrients).
    pub excess: f64,
    pub high: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
}

/// Threshold tables for all four nutrients.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NutrientLimits {
    pub n: NutrientThresholds,
    pub p: NutrientThresholds,
    pub k: NutrientThresholds,
    pub s: NutrientThresholds,
}

impl NutrientLimits {
    pub fn get(&self, nutrient: Nutrient) -> &NutrientThresholds {
        match nutrient {
            Nutrient::N => &self.n,
            Nutrient::P => &self.p,
            Nutrient::K => &self.k,
            Nutrient::S => &self.s,
        }
    }
}

impl Default for NutrientLimits {
    fn default() -> Self {
        Self {
            n: NutrientThresholds {
                regulatory_limit: 170.0,
                warning: 150.0,
                excess: 170.0,
                high: 100.0,
                optimal_min: 50.0,
                optimal_max: 100.0,
            },
            p: NutrientThresholds {
                regulatory_limit: f64::INFINITY,
                warning: f64::INFINITY,
                excess: 20.0,
                high: 10.0,
                optimal_min: 5.0,
                optimal_max: 10.0,
            },
            k: NutrientThresholds {
                regulatory_limit: f64::INFINITY,
                warning: f64::INFINITY,
                excess: 60.0,
                high: 40.0,
                optimal_min: 20.0,
                optimal_max: 40.0,
            },
            s: NutrientThresholds {
                regulatory_limit: f64::INFINITY,
                warning: f64::INFINITY,
                excess: 40.0,
                high: 25.0,
                optimal_min: 10.0,
                optimal_max: 25.0,
            },
        }
    }
}

/// Linear regression coefficients for one farm system type, mapping nitrogen
/// use efficiency (%) to GHG intensity (kg CO2-eq/L).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GhgModel {
    pub intercept: f64,
    pub slope: f64,
    pub se: f64,
    pub r2: f64,
}

/// GHG regression models per system type, plus the minimum realistic
/// intensity the estimate is clamped to.
///
/// The default coefficients come from a pilot-farm regression.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GhgModelTable {
    pub grazing: GhgModel,
    pub housed: GhgModel,
    pub mixed: GhgModel,
    pub floor: f64,
}

impl Default for GhgModelTable {
    fn default() -> Self {
        Self {
            grazing: GhgModel {
                intercept: 1.75,
                slope: -0.014,
                se: 0.07,
                r2: 0.58,
            },
            housed: GhgModel {
                intercept: 1.95,
                slope: -0.011,
                se: 0.09,
                r2: 0.45,
            },
            mixed: GhgModel {
                intercept: 1.85,
                slope: -0.012,
                se: 0.08,
                r2: 0.52,
            },
            floor: 0.3,
        }
    }
}

/// Annual excretion of one animal, kg/head/year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExcretionStandard {
    pub n: f64,
    pub p: f64,
}

/// Standard excretion rates per livestock band, used to estimate manure
/// production from headcounts when no measured volumes exist.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExcretionStandards {
    pub milking_cows: ExcretionStandard,
    pub youngstock_0_12: ExcretionStandard,
    pub youngstock_12_calving: ExcretionStandard,
}

impl Default for ExcretionStandards {
    fn default() -> Self {
        Self {
            milking_cows: ExcretionStandard { n: 100.0, p: 18.0 },
            youngstock_0_12: ExcretionStandard { n: 25.0, p: 4.5 },
            youngstock_12_calving: ExcretionStandard { n: 40.0, p: 7.2 },
        }
    }
}

/// Sizes and yields assumed for the standard survey-built KOU set when the
/// survey itself carries no figures for them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KouDefaults {
    /// Feed store capacity, tonnes.
    pub feed_store_capacity: f64,
    /// Feed store current stock, tonnes.
    pub feed_store_stock: f64,
    /// Slurry store capacity, m³.
    pub slurry_store_capacity: f64,
    /// Litres/year per milking cow.
    pub milk_yield: f64,
}

impl Default for KouDefaults {
    fn default() -> Self {
        Self {
            feed_store_capacity: 500.0,
            feed_store_stock: 250.0,
            slurry_store_capacity: 5000.0,
            milk_yield: 8000.0,
        }
    }
}

/// Mass-unit multipliers applied to survey amounts before nutrient-content
/// percentages, per source class.  Survey amounts are recorded in tonnes, so
/// both default to 1000 (tonnes to kg).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitMultipliers {
    pub fertiliser: f64,
    pub feed: f64,
}

impl Default for UnitMultipliers {
    fn default() -> Self {
        Self {
            fertiliser: 1000.0,
            feed: 1000.0,
        }
    }
}

/// Configuration options for building and evaluating a nutrient budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Per-nutrient application-rate thresholds.
    pub limits: NutrientLimits,
    /// Plant-availability fraction of nitrogen in organic manure.  Synthetic
    /// fertiliser and purchased feed count at 1.0.
    pub manure_n_availability: f64,
    /// Fraction of total field nitrogen input lost to the atmosphere.  A
    /// simplifying assumption, not a physical simulation.
    pub atmospheric_n_loss_fraction: f64,
    /// Fraction of total field nitrogen input lost as sulphur deposition.
    pub atmospheric_s_loss_fraction: f64,
    /// Survey amount multipliers per source class.
    pub unit_multipliers: UnitMultipliers,
    /// kg N per kg of milk protein.
    pub milk_protein_n_fraction: f64,
    /// kg P per litre of milk.
    pub milk_p_per_litre: f64,
    /// Carcass weight as a fraction of live weight.
    pub kill_out_ratio: f64,
    /// kg N per kg of carcass.
    pub carcass_n_fraction: f64,
    /// kg P per kg of carcass.
    pub carcass_p_fraction: f64,
    /// Default slurry K content, kg/m³, used when the survey has no K figure.
    pub slurry_k_per_m3: f64,
    /// Default slurry S content, kg/m³.
    pub slurry_s_per_m3: f64,
    /// Per-band excretion rates for headcount-based manure estimates.
    pub excretion: ExcretionStandards,
    /// Fraction of a nitrogen surplus assumed lost to the environment.
    pub surplus_n_loss_fraction: f64,
    /// Fraction of a phosphorus surplus assumed lost.
    pub surplus_p_loss_fraction: f64,
    /// Assumed sizes for the standard KOU set.
    pub kou_defaults: KouDefaults,
    /// GHG regression models.
    pub ghg: GhgModelTable,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            limits: NutrientLimits::default(),
            manure_n_availability: 0.45,
            atmospheric_n_loss_fraction: 0.10,
            atmospheric_s_loss_fraction: 0.01,
            unit_multipliers: UnitMultipliers::default(),
            milk_protein_n_fraction: 0.16,
            milk_p_per_litre: 0.0009,
            kill_out_ratio: 0.54,
            carcass_n_fraction: 0.025,
            carcass_p_fraction: 0.007,
            slurry_k_per_m3: 3.0,
            slurry_s_per_m3: 0.3,
            excretion: ExcretionStandards::default(),
            surplus_n_loss_fraction: 0.30,
            surplus_p_loss_fraction: 0.10,
            kou_defaults: KouDefaults::default(),
            ghg: GhgModelTable::default(),
        }
    }
}
