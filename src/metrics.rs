// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Compliance and efficiency evaluation over a built graph.
//!
//! Two distinct nitrogen figures matter here and must not be conflated: the
//! raw applied mass (used for the NVZ compliance check) and the
//! plant-available, availability-weighted mass (used for efficiency).

use serde::{Deserialize, Serialize};

use crate::config::{BudgetConfig, ExcretionStandards, NutrientLimits};
use crate::kou::KindPredicates;
use crate::nutrient::{Nutrient, NutrientMass};
use crate::pathway::PathwayType;
use crate::survey::FarmInfo;
use crate::NutrientGraph;

/// Status bucket for a per-hectare application rate.
///
/// `NonCompliant` and `Warning` apply to nitrogen, `Excess` to the other
/// nutrients; `High`, `Optimal` and `Low` are shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBucket {
    NonCompliant,
    Excess,
    Warning,
    High,
    Optimal,
    Low,
}

/// Classifies a per-hectare application rate against the threshold table.
///
/// Comparisons are strict `>`, so a value exactly on a boundary falls into
/// the lower (safer) bucket: 170.0 kg N/ha is still compliant.
pub fn status_of(nutrient: Nutrient, value_per_ha: f64, limits: &NutrientLimits) -> StatusBucket {
    let thresholds = limits.get(nutrient);

    if nutrient == Nutrient::N {
        if value_per_ha > thresholds.regulatory_limit {
            return StatusBucket::NonCompliant;
        }
        if value_per_ha > thresholds.warning {
            return StatusBucket::Warning;
        }
    } else if value_per_ha > thresholds.excess {
        return StatusBucket::Excess;
    }

    if value_per_ha > thresholds.high {
        StatusBucket::High
    } else if value_per_ha < thresholds.optimal_min {
        StatusBucket::Low
    } else {
        StatusBucket::Optimal
    }
}

/// The computed system-wide result consumed by the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub total_inputs: NutrientMass,
    /// Inputs weighted by plant availability: 1.0 for fertiliser and
    /// purchased feed, the configured fraction for organic manure imports.
    /// Only nitrogen is discounted.
    pub effective_inputs: NutrientMass,
    pub total_outputs: NutrientMass,
    /// `total_inputs - total_outputs`, per nutrient.
    pub balance: NutrientMass,
    /// Raw manure-application nitrogen per hectare of fields, kg/ha.
    pub organic_n_per_ha: f64,
    pub nvz_compliant: bool,
    /// Nitrogen use efficiency, percent of effective inputs.
    pub n_efficiency: f64,
    /// Phosphorus use efficiency, percent of effective inputs.
    pub p_efficiency: f64,
    pub total_area: f64,
    pub total_livestock: f64,
}

impl SystemMetrics {
    /// Evaluates a graph against the given configuration.
    pub fn compute(graph: &NutrientGraph, config: &BudgetConfig) -> Self {
        let totals = graph.system_balance();
        let effective_inputs = effective_inputs(graph, config);

        let organic_n: f64 = graph
            .pathways()
            .filter(|p| p.kind == PathwayType::ManureApplication)
            .map(|p| p.nutrients.n)
            .sum();

        let total_area = graph.total_field_area();
        let organic_n_per_ha = ratio(organic_n, total_area);

        let balance = NutrientMass::new(
            totals.inputs.n - totals.outputs.n,
            totals.inputs.p - totals.outputs.p,
            totals.inputs.k - totals.outputs.k,
            totals.inputs.s - totals.outputs.s,
        );

        Self {
            total_inputs: totals.inputs,
            effective_inputs,
            total_outputs: totals.outputs,
            balance,
            organic_n_per_ha,
            nvz_compliant: organic_n_per_ha <= config.limits.n.regulatory_limit,
            n_efficiency: ratio(totals.outputs.n, effective_inputs.n) * 100.0,
            p_efficiency: ratio(totals.outputs.p, effective_inputs.p) * 100.0,
            total_area,
            total_livestock: graph.total_livestock(),
        }
    }

    /// Status bucket for the organic nitrogen application rate.
    pub fn organic_n_status(&self, limits: &NutrientLimits) -> StatusBucket {
        status_of(Nutrient::N, self.organic_n_per_ha, limits)
    }

    /// Estimates environmental losses as configured fractions of the N and P
    /// surpluses.  Zero when the balance is in deficit.
    pub fn estimated_surplus_losses(&self, config: &BudgetConfig) -> NutrientMass {
        NutrientMass::new(
            self.balance.n * config.surplus_n_loss_fraction,
            self.balance.p * config.surplus_p_loss_fraction,
            0.0,
            0.0,
        )
        .clamped()
    }
}

/// Estimates annual manure N and P production from headcounts and the
/// per-band excretion standards, independent of any measured slurry volumes.
pub fn estimate_manure_production(
    farm: &FarmInfo,
    standards: &ExcretionStandards,
) -> NutrientMass {
    NutrientMass::new(
        farm.milking_cows * standards.milking_cows.n
            + farm.youngstock_0_12 * standards.youngstock_0_12.n
            + farm.youngstock_12_calving * standards.youngstock_12_calving.n,
        farm.milking_cows * standards.milking_cows.p
            + farm.youngstock_0_12 * standards.youngstock_0_12.p
            + farm.youngstock_12_calving * standards.youngstock_12_calving.p,
        0.0,
        0.0,
    )
}

/// Sums external inputs with nitrogen weighted by availability.  Deliveries
/// into a manure store are organic manure and count at the configured
/// fraction; everything else counts in full.
fn effective_inputs(graph: &NutrientGraph, config: &BudgetConfig) -> NutrientMass {
    let mut effective = NutrientMass::default();

    for pathway in graph.pathways() {
        let Ok(from) = graph.kou(&pathway.from) else {
            continue;
        };
        let Ok(to) = graph.kou(&pathway.to) else {
            continue;
        };
        if !from.is_external() || to.is_external() {
            continue;
        }

        let n_weight = if to.is_manure_store() {
            config.manure_n_availability
        } else {
            1.0
        };

        effective.n += pathway.nutrients.n * n_weight;
        effective.p += pathway.nutrients.p;
        effective.k += pathway.nutrients.k;
        effective.s += pathway.nutrients.s;
    }

    effective
}

/// `numerator / denominator`, or 0 when the denominator is 0.  All ratio
/// computations in the crate go through this guard.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}
