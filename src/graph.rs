// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! A graph representation of the Key Operational Units of a farm and the
//! nutrient pathways between them.

mod balance;
mod creation;
mod flows;
mod retrieval;

pub mod iterators;

pub use balance::{SystemTotals, TypeFlow};
pub use flows::{FlowLink, FlowNode, FlowSummary};

use crate::{Kou, Pathway};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// `Kou`s stored in a `DiGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any KOU id, so
/// that nodes in the `DiGraph` can be retrieved from their ids.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// A graph representation of the farm's Key Operational Units and the
/// nutrient pathways between them.
///
/// Pathways are stored as edge weights; parallel pathways between the same
/// pair of KOUs are kept as separate edges until a flow summary aggregates
/// them.
pub struct NutrientGraph {
    graph: DiGraph<Kou, Pathway>,
    node_indices: NodeIndexMap,
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    //! Shared KOU/pathway fixtures for the `graph` test modules: a small
    //! dairy farm with one field, one herd, one store of each kind and the
    //! usual external parties.

    use crate::kou::{FieldUse, Kou, KouType, LivestockGroup};
    use crate::nutrient::NutrientMass;
    use crate::pathway::{Pathway, PathwayType};

    pub(crate) fn dairy_kous() -> Vec<Kou> {
        vec![
            Kou::field("field_main", "Main Fields", 120.0, FieldUse::MixedCropping),
            Kou::livestock_group(
                "herd_main",
                "Dairy Herd",
                LivestockGroup::MilkingCows,
                180.0,
                8000.0,
            ),
            Kou::store(KouType::FeedStore, "feed_store_main", "Feed Store", 500.0, 250.0),
            Kou::store(
                KouType::ManureStore,
                "slurry_store_main",
                "Slurry Store",
                5000.0,
                4200.0,
            ),
            Kou::new(KouType::External, "feed_supplier", "Feed Supplier"),
            Kou::new(KouType::External, "fertilizer_supplier", "Fertilizer Supplier"),
            Kou::new(KouType::Output, "milk_output", "Milk Sales"),
        ]
    }

    pub(crate) fn dairy_pathways() -> Vec<Pathway> {
        vec![
            Pathway::with_id(
                "p-fert",
                "fertilizer_supplier",
                "field_main",
                PathwayType::FertilizerApplication,
                NutrientMass::new(2932.5, 0.0, 0.0, 0.0),
            ),
            Pathway::with_id(
                "p-purchase",
                "feed_supplier",
                "feed_store_main",
                PathwayType::Purchase,
                NutrientMass::new(3100.0, 350.0, 400.0, 50.0),
            ),
            Pathway::with_id(
                "p-feeding",
                "feed_store_main",
                "herd_main",
                PathwayType::Feeding,
                NutrientMass::new(3100.0, 350.0, 400.0, 50.0),
            ),
            Pathway::with_id(
                "p-manure-prod",
                "herd_main",
                "slurry_store_main",
                PathwayType::ManureProduction,
                NutrientMass::new(10500.0, 2100.0, 12600.0, 1260.0),
            ),
            Pathway::with_id(
                "p-manure-app",
                "slurry_store_main",
                "field_main",
                PathwayType::ManureApplication,
                NutrientMass::new(10500.0, 2100.0, 12600.0, 1260.0),
            ),
            Pathway::with_id(
                "p-milk",
                "herd_main",
                "milk_output",
                PathwayType::Sale,
                NutrientMass::new(7603.2, 1296.0, 0.0, 0.0),
            ),
            Pathway::with_id(
                "p-atmo",
                "field_main",
                "atmosphere",
                PathwayType::AtmosphericLoss,
                NutrientMass::new(1343.25, 0.0, 0.0, 134.3),
            ),
        ]
    }
}
