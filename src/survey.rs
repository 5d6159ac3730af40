// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! The survey-style input shape consumed by the graph builder.
//!
//! These structs mirror the JSON produced by the (external) entry form.
//! Every numeric field defaults to zero when absent, so partially filled
//! surveys build without errors.

use serde::{Deserialize, Serialize};

/// Where an input row comes from; determines routing and mass units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Concentrate,
    Silage,
    Hay,
    Straw,
    #[serde(rename = "fertiliser_N")]
    FertiliserN,
    #[serde(rename = "fertiliser_P")]
    FertiliserP,
    FertiliserCompound,
}

/// The two mass-unit classes of input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceClass {
    /// Purchased feed or forage, routed through the feed store.
    Feed,
    /// Synthetic fertiliser, applied directly to fields.
    Fertiliser,
}

impl InputSource {
    pub fn class(&self) -> SourceClass {
        match self {
            InputSource::Concentrate
            | InputSource::Silage
            | InputSource::Hay
            | InputSource::Straw => SourceClass::Feed,
            InputSource::FertiliserN
            | InputSource::FertiliserP
            | InputSource::FertiliserCompound => SourceClass::Fertiliser,
        }
    }

    /// Typical as-fed nutrient content percentages for this source, used by
    /// entry forms to pre-fill rows.  Survey rows may override any of them.
    pub fn default_content(&self) -> SourceContent {
        match self {
            InputSource::Concentrate => SourceContent {
                cp: 15.84,
                n: 2.88,
                p: 0.5,
                k: 0.5,
                s: 0.2,
            },
            InputSource::Silage => SourceContent {
                cp: 14.0,
                n: 2.24,
                p: 0.06,
                k: 2.25,
                s: 0.03,
            },
            InputSource::Hay => SourceContent {
                cp: 11.0,
                n: 1.76,
                p: 0.25,
                k: 2.0,
                s: 0.15,
            },
            InputSource::Straw => SourceContent {
                cp: 3.5,
                n: 0.56,
                p: 0.08,
                k: 1.2,
                s: 0.08,
            },
            InputSource::FertiliserN => SourceContent {
                cp: 0.0,
                n: 34.5,
                p: 0.0,
                k: 0.0,
                s: 0.0,
            },
            InputSource::FertiliserP => SourceContent {
                cp: 0.0,
                n: 0.0,
                p: 20.0,
                k: 0.0,
                s: 0.0,
            },
            InputSource::FertiliserCompound => SourceContent {
                cp: 0.0,
                n: 20.0,
                p: 10.0,
                k: 10.0,
                s: 2.0,
            },
        }
    }
}

/// Nutrient content percentages for a source, as fed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceContent {
    pub cp: f64,
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub s: f64,
}

/// Farm-level facts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmInfo {
    #[serde(default)]
    pub name: String,
    /// Total farmed area in hectares.
    #[serde(default)]
    pub total_area: f64,
    #[serde(default)]
    pub milking_cows: f64,
    #[serde(default, rename = "youngstock0_12")]
    pub youngstock_0_12: f64,
    #[serde(default, rename = "youngstock12_calving")]
    pub youngstock_12_calving: f64,
    /// Milk crude protein percentage, the fallback for milk nitrogen when an
    /// output row carries no protein figure.
    #[serde(default, rename = "milkCPpct")]
    pub milk_cp_pct: f64,
}

/// One purchased feed or fertiliser row.  Amounts are in tonnes/year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRow {
    pub source: InputSource,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub amount: f64,
    /// Dry matter percentage, feed rows only.  Not part of the balance
    /// computation (`cp_content` is quoted as fed); carried for the forage
    /// conversions in [`crate::convert`] and the entry form.
    #[serde(default)]
    pub dm_pct: f64,
    /// Crude protein percentage; when present on feed rows it supersedes
    /// `n_content` via the CP/6.25 conversion.
    #[serde(default)]
    pub cp_content: f64,
    #[serde(default)]
    pub n_content: f64,
    #[serde(default)]
    pub p_content: f64,
    #[serde(default)]
    pub k_content: f64,
    #[serde(default)]
    pub s_content: f64,
}

/// The kind of a productive output row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Milk,
    Livestock,
}

/// One productive output row.  Milk amounts are litres/year; livestock rows
/// carry either a headcount with average live weight, or a legacy mass in kg
/// with direct nutrient percentages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRow {
    #[serde(rename = "type")]
    pub kind: OutputKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub amount: f64,
    /// Milk butterfat percentage.
    #[serde(default)]
    pub fat_pct: f64,
    /// Milk true protein percentage; drives milk N.
    #[serde(default)]
    pub protein_pct: f64,
    /// Animals sold; livestock rows only.
    #[serde(default)]
    pub head: f64,
    /// Average live weight in kg; livestock rows only.
    #[serde(default)]
    pub avg_live_weight: f64,
    /// Legacy direct N percentage, used when headcount fields are absent.
    #[serde(default)]
    pub n_content: f64,
    /// Legacy direct P percentage.
    #[serde(default)]
    pub p_content: f64,
}

/// Slurry application, import and export facts.  Volumes are m³/year and
/// contents kg/m³.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManureInfo {
    #[serde(default)]
    pub slurry_applied: f64,
    #[serde(default, rename = "slurryNContent")]
    pub slurry_n_content: f64,
    #[serde(default, rename = "slurryPContent")]
    pub slurry_p_content: f64,
    #[serde(default)]
    pub slurry_imported: f64,
    #[serde(default, rename = "slurryImportedNContent")]
    pub slurry_imported_n_content: f64,
    #[serde(default, rename = "slurryImportedPContent")]
    pub slurry_imported_p_content: f64,
    #[serde(default)]
    pub slurry_exported: f64,
    #[serde(default, rename = "slurryExportedNContent")]
    pub slurry_exported_n_content: f64,
    #[serde(default, rename = "slurryExportedPContent")]
    pub slurry_exported_p_content: f64,
}

/// A complete survey snapshot: the graph builder's input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    #[serde(default)]
    pub farm_info: FarmInfo,
    #[serde(default)]
    pub inputs: Vec<InputRow>,
    #[serde(default)]
    pub outputs: Vec<OutputRow>,
    #[serde(default)]
    pub manure: ManureInfo,
}
