// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Balance and aggregation methods: per-KOU totals, system-wide totals and
//! per-type groupings.
//!
//! All sums here are edge-local: a pathway contributes to a KOU's inputs when
//! it ends there and to its outputs when it starts there, with no graph
//! traversal and therefore no cycle handling.

use serde::Serialize;

use crate::emissions::SystemType;
use crate::kou::{FieldUse, KindPredicates, KouType};
use crate::nutrient::{Nutrient, NutrientBalance, NutrientMass};
use crate::pathway::PathwayType;
use crate::{Error, NutrientGraph};

/// System-wide external input and output masses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SystemTotals {
    pub inputs: NutrientMass,
    pub outputs: NutrientMass,
}

/// Input/output totals for all KOUs of one type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeFlow {
    pub kind: KouType,
    pub inputs: f64,
    pub outputs: f64,
}

/// Balance and aggregation.
impl NutrientGraph {
    /// Computes the per-nutrient input, output and net totals for the KOU
    /// with the given id.
    ///
    /// Returns an error if the given id does not exist.
    pub fn balance_of(&self, id: &str) -> Result<NutrientBalance, Error> {
        // Probe existence first so that a typo'd id is an error rather than
        // an all-zero balance.
        self.kou(id)?;

        let mut balance = NutrientBalance::default();
        for pathway in self.pathways() {
            for nutrient in Nutrient::ALL {
                if pathway.to == id {
                    balance[nutrient].inputs += pathway.nutrients[nutrient];
                }
                if pathway.from == id {
                    balance[nutrient].outputs += pathway.nutrients[nutrient];
                }
            }
        }
        for nutrient in Nutrient::ALL {
            balance[nutrient].balance = balance[nutrient].inputs - balance[nutrient].outputs;
        }

        Ok(balance)
    }

    /// Computes system-wide totals: inputs are pathways from external
    /// parties into the farm, outputs are pathways from the farm to output
    /// or external KOUs (which includes atmospheric losses, since the
    /// atmosphere sink is an Output KOU).
    pub fn system_balance(&self) -> SystemTotals {
        let mut totals = SystemTotals::default();

        for pathway in self.pathways() {
            let Ok(from) = self.kou(&pathway.from) else {
                continue;
            };
            let Ok(to) = self.kou(&pathway.to) else {
                continue;
            };

            if from.is_external() && !to.is_external() {
                totals.inputs += pathway.nutrients;
            }
            if (to.is_output() || to.is_external()) && !from.is_external() {
                totals.outputs += pathway.nutrients;
            }
        }

        totals
    }

    /// Sums the sale pathways into Output KOUs: the productive outputs,
    /// excluding losses.
    pub fn productive_outputs(&self) -> NutrientMass {
        let mut outputs = NutrientMass::default();
        for pathway in self.pathways() {
            if pathway.kind != PathwayType::Sale {
                continue;
            }
            if self.kou(&pathway.to).is_ok_and(|to| to.is_output()) {
                outputs += pathway.nutrients;
            }
        }
        outputs
    }

    /// Groups KOUs by type and sums the given nutrient's inputs and outputs
    /// across all members, in the fixed [`KouType::ALL`] order.  Used for
    /// system-level flow-summary charts.
    pub fn aggregate_by_type(&self, nutrient: Nutrient) -> Vec<TypeFlow> {
        let mut flows: Vec<TypeFlow> = KouType::ALL
            .iter()
            .map(|kind| TypeFlow {
                kind: *kind,
                inputs: 0.0,
                outputs: 0.0,
            })
            .collect();

        for pathway in self.pathways() {
            if let Ok(to) = self.kou(&pathway.to) {
                let slot = flows.iter_mut().find(|f| f.kind == to.kind);
                if let Some(slot) = slot {
                    slot.inputs += pathway.nutrients[nutrient];
                }
            }
            if let Ok(from) = self.kou(&pathway.from) {
                let slot = flows.iter_mut().find(|f| f.kind == from.kind);
                if let Some(slot) = slot {
                    slot.outputs += pathway.nutrients[nutrient];
                }
            }
        }

        flows
    }

    /// Sum of all field areas in hectares.
    pub fn total_field_area(&self) -> f64 {
        self.kous()
            .filter(|k| k.is_field())
            .map(|k| k.properties.area)
            .sum()
    }

    /// Sum of all livestock group head counts.
    pub fn total_livestock(&self) -> f64 {
        self.kous()
            .filter(|k| k.is_livestock_group())
            .map(|k| k.properties.animal_count)
            .sum()
    }

    /// Classifies the farm system from the KOU composition: no fields means
    /// housed, an empty (or near-empty) feed store estate means grazing, and
    /// permanent pasture alongside stored feed means mixed.
    pub fn system_type(&self) -> SystemType {
        if !self.kous().any(|k| k.is_field()) {
            return SystemType::Housed;
        }

        let mut feed_stores = self.kous().filter(|k| k.is_feed_store()).peekable();
        if feed_stores.peek().is_none() {
            return SystemType::Grazing;
        }
        if self
            .kous()
            .filter(|k| k.is_feed_store())
            .all(|k| k.properties.current_stock < 100.0)
        {
            return SystemType::Grazing;
        }

        let grazes = self.kous().any(|k| {
            k.is_field() && k.properties.field_use == Some(FieldUse::PermanentPasture)
        });
        if grazes {
            SystemType::Mixed
        } else {
            SystemType::Housed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixtures::{dairy_kous, dairy_pathways};
    use super::*;
    use crate::kou::Kou;

    fn graph() -> NutrientGraph {
        NutrientGraph::try_new(dairy_kous(), dairy_pathways()).unwrap()
    }

    #[test]
    fn test_balance_of_field() {
        let balance = graph().balance_of("field_main").unwrap();

        // Fertiliser N plus manure-application N in; atmospheric loss out.
        assert!((balance[Nutrient::N].inputs - 13_432.5).abs() < 1e-9);
        assert!((balance[Nutrient::N].outputs - 1343.25).abs() < 1e-9);
        assert!(
            (balance[Nutrient::N].balance - (13_432.5 - 1343.25)).abs() < 1e-9
        );
    }

    #[test]
    fn test_balance_is_conserved_for_every_kou_and_nutrient() {
        let graph = graph();
        for kou in graph.kous() {
            let balance = graph.balance_of(&kou.id).unwrap();
            for nutrient in Nutrient::ALL {
                assert_eq!(
                    balance[nutrient].balance,
                    balance[nutrient].inputs - balance[nutrient].outputs
                );
            }
        }
    }

    #[test]
    fn test_balance_of_unknown_kou_is_an_error() {
        assert!(graph().balance_of("nowhere").is_err());
    }

    #[test]
    fn test_system_balance() {
        let totals = graph().system_balance();

        // Inputs: fertiliser (2932.5) + purchased feed (3100).
        assert!((totals.inputs.n - 6032.5).abs() < 1e-9);
        // Outputs: milk sale (7603.2) + atmospheric loss (1343.25).
        assert!((totals.outputs.n - 8946.45).abs() < 1e-9);
    }

    #[test]
    fn test_productive_outputs_exclude_losses() {
        let outputs = graph().productive_outputs();
        assert!((outputs.n - 7603.2).abs() < 1e-9);
        assert_eq!(outputs.k, 0.0);
    }

    #[test]
    fn test_aggregate_by_type() {
        let flows = graph().aggregate_by_type(Nutrient::N);

        let fields = flows.iter().find(|f| f.kind == KouType::Field).unwrap();
        assert!((fields.inputs - 13_432.5).abs() < 1e-9);
        assert!((fields.outputs - 1343.25).abs() < 1e-9);

        let external = flows.iter().find(|f| f.kind == KouType::External).unwrap();
        assert!((external.outputs - 6032.5).abs() < 1e-9);
    }

    #[test]
    fn test_area_and_livestock_totals() {
        let graph = graph();
        assert_eq!(graph.total_field_area(), 120.0);
        assert_eq!(graph.total_livestock(), 180.0);
    }

    #[test]
    fn test_system_type_classification() {
        // The fixture keeps a stocked feed store and no permanent pasture.
        assert_eq!(graph().system_type(), SystemType::Housed);

        // Without fields the system is housed by definition.
        let kous: Vec<Kou> = dairy_kous()
            .into_iter()
            .filter(|k| !k.is_field())
            .collect();
        let graph = NutrientGraph::try_new(kous, vec![]).unwrap();
        assert_eq!(graph.system_type(), SystemType::Housed);

        // An empty feed store estate means grazing.
        let mut kous = dairy_kous();
        for kou in kous.iter_mut().filter(|k| k.is_feed_store()) {
            kou.properties.current_stock = 0.0;
        }
        let graph = NutrientGraph::try_new(kous, vec![]).unwrap();
        assert_eq!(graph.system_type(), SystemType::Grazing);

        // Permanent pasture plus stored feed means mixed.
        let mut kous = dairy_kous();
        kous.push(Kou::field(
            "field_pasture",
            "River Meadow",
            15.0,
            FieldUse::PermanentPasture,
        ));
        let graph = NutrientGraph::try_new(kous, vec![]).unwrap();
        assert_eq!(graph.system_type(), SystemType::Mixed);
    }
}
