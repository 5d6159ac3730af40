// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Regression-based greenhouse-gas intensity estimates.
//!
//! The estimate maps nitrogen use efficiency to kg CO2-eq per litre through
//! a per-system linear model.  It is an estimate, not a measurement; the
//! model's R² drives the reported confidence label.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::config::{GhgModel, GhgModelTable};

/// Farm system classification used to select a regression model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    Grazing,
    Housed,
    Mixed,
}

impl Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemType::Grazing => write!(f, "grazing"),
            SystemType::Housed => write!(f, "housed"),
            SystemType::Mixed => write!(f, "mixed"),
        }
    }
}

impl GhgModelTable {
    pub(crate) fn model(&self, system: SystemType) -> &GhgModel {
        match system {
            SystemType::Grazing => &self.grazing,
            SystemType::Housed => &self.housed,
            SystemType::Mixed => &self.mixed,
        }
    }
}

/// Confidence label derived from the selected model's R².
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A GHG intensity estimate with its 95% confidence interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GhgEstimate {
    /// kg CO2-eq per litre.
    pub value: f64,
    pub se: f64,
    pub lower95: f64,
    pub upper95: f64,
    pub confidence: Confidence,
    pub r2: f64,
}

/// Relative performance band for a GHG intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    /// Top 10%, industry leading.
    Excellent,
    /// Top 25%.
    Good,
    /// Middle 50%.
    Average,
    /// Bottom 25%.
    BelowAverage,
}

/// Estimates GHG intensity from nitrogen use efficiency (percent) for the
/// given system type.  Deterministic; the estimate is clamped to the
/// configured floor.
pub fn estimate_ghg(efficiency_pct: f64, system: SystemType, table: &GhgModelTable) -> GhgEstimate {
    let model = table.model(system);

    let estimate = model.intercept + model.slope * efficiency_pct;
    let value = estimate.max(table.floor);
    let ci95 = 1.96 * model.se;

    let confidence = if model.r2 > 0.55 {
        Confidence::High
    } else if model.r2 > 0.45 {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    GhgEstimate {
        value,
        se: model.se,
        lower95: value - ci95,
        upper95: value + ci95,
        confidence,
        r2: model.r2,
    }
}

/// Projected GHG change between two efficiency levels of the same system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GhgChange {
    pub current: f64,
    pub projected: f64,
    /// kg CO2-eq/L.
    pub absolute: f64,
    /// Percent of the current intensity.
    pub relative: f64,
    pub confidence: Confidence,
}

/// Compares the estimates for a current and a projected efficiency, for
/// scenario planning.
pub fn ghg_change(
    current_efficiency: f64,
    projected_efficiency: f64,
    system: SystemType,
    table: &GhgModelTable,
) -> GhgChange {
    let current = estimate_ghg(current_efficiency, system, table);
    let projected = estimate_ghg(projected_efficiency, system, table);

    let absolute = projected.value - current.value;
    let relative = if current.value == 0.0 {
        0.0
    } else {
        absolute / current.value * 100.0
    };

    GhgChange {
        current: current.value,
        projected: projected.value,
        absolute,
        relative,
        confidence: projected.confidence,
    }
}

/// Buckets a GHG intensity into its industry performance band.
pub fn categorize_performance(intensity: f64) -> PerformanceBand {
    if intensity < 0.8 {
        PerformanceBand::Excellent
    } else if intensity < 1.0 {
        PerformanceBand::Good
    } else if intensity < 1.2 {
        PerformanceBand::Average
    } else {
        PerformanceBand::BelowAverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_estimate_follows_the_model() {
        let table = GhgModelTable::default();
        let estimate = estimate_ghg(30.0, SystemType::Mixed, &table);

        // 1.85 - 0.012 * 30.
        assert!((estimate.value - 1.49).abs() < 1e-9);
        assert!((estimate.lower95 - (1.49 - 1.96 * 0.08)).abs() < 1e-9);
        assert!((estimate.upper95 - (1.49 + 1.96 * 0.08)).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_is_clamped_to_the_floor() {
        let table = GhgModelTable::default();
        // 200% efficiency would extrapolate below zero.
        let estimate = estimate_ghg(200.0, SystemType::Grazing, &table);
        assert_eq!(estimate.value, table.floor);
    }

    #[test]
    fn test_confidence_bands() {
        let table = GhgModelTable::default();
        assert_eq!(
            estimate_ghg(30.0, SystemType::Grazing, &table).confidence,
            Confidence::High
        );
        assert_eq!(
            estimate_ghg(30.0, SystemType::Mixed, &table).confidence,
            Confidence::Medium
        );
        assert_eq!(
            estimate_ghg(30.0, SystemType::Housed, &table).confidence,
            Confidence::Low
        );
    }

    #[test]
    fn test_change_between_efficiencies() {
        let table = GhgModelTable::default();
        let change = ghg_change(25.0, 35.0, SystemType::Mixed, &table);

        assert!(change.absolute < 0.0);
        assert!((change.absolute - (change.projected - change.current)).abs() < 1e-12);
        assert!(change.relative < 0.0);
    }

    #[test]
    fn test_performance_bands() {
        assert_eq!(categorize_performance(0.7), PerformanceBand::Excellent);
        assert_eq!(categorize_performance(0.9), PerformanceBand::Good);
        assert_eq!(categorize_performance(1.1), PerformanceBand::Average);
        assert_eq!(categorize_performance(1.5), PerformanceBand::BelowAverage);
    }
}
