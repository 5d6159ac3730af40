// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Methods for retrieving KOUs and pathways from a [`NutrientGraph`].

use crate::graph::iterators::{Flows, Kous, Pathways};
use crate::{Error, NutrientGraph};

/// KOU and pathway retrieval.
impl NutrientGraph {
    /// Returns the KOU with the given id, if it exists.
    pub fn kou(&self, id: &str) -> Result<&crate::Kou, Error> {
        self.node_indices
            .get(id)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| Error::kou_not_found(format!("KOU with id {} not found.", id)))
    }

    /// Returns an iterator over the KOUs in the graph, in insertion order.
    pub fn kous(&self) -> Kous<'_> {
        Kous {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the pathways in the graph, in insertion
    /// order.
    pub fn pathways(&self) -> Pathways<'_> {
        Pathways {
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns an iterator over the pathways *into* the KOU with the given
    /// id.
    ///
    /// Returns an error if the given id does not exist.
    pub fn inflows(&self, id: &str) -> Result<Flows<'_>, Error> {
        self.node_indices
            .get(id)
            .map(|&index| Flows {
                iter: self
                    .graph
                    .edges_directed(index, petgraph::Direction::Incoming),
            })
            .ok_or_else(|| Error::kou_not_found(format!("KOU with id {} not found.", id)))
    }

    /// Returns an iterator over the pathways *out of* the KOU with the given
    /// id.
    ///
    /// Returns an error if the given id does not exist.
    pub fn outflows(&self, id: &str) -> Result<Flows<'_>, Error> {
        self.node_indices
            .get(id)
            .map(|&index| Flows {
                iter: self
                    .graph
                    .edges_directed(index, petgraph::Direction::Outgoing),
            })
            .ok_or_else(|| Error::kou_not_found(format!("KOU with id {} not found.", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixtures::{dairy_kous, dairy_pathways};
    use crate::{Error, NutrientGraph, PathwayType};

    #[test]
    fn test_kou_lookup() {
        let graph = NutrientGraph::try_new(dairy_kous(), dairy_pathways()).unwrap();

        assert_eq!(graph.kou("herd_main").unwrap().name, "Dairy Herd");
        assert_eq!(
            graph.kou("missing"),
            Err(Error::kou_not_found("KOU with id missing not found."))
        );
    }

    #[test]
    fn test_kous_preserve_insertion_order() {
        let graph = NutrientGraph::try_new(dairy_kous(), dairy_pathways()).unwrap();
        let ids: Vec<_> = graph.kous().map(|k| k.id.as_str()).collect();
        assert_eq!(ids[0], "field_main");
        assert_eq!(ids[1], "herd_main");
        // The atmosphere fallback is appended after all declared KOUs.
        assert_eq!(*ids.last().unwrap(), "atmosphere");
    }

    #[test]
    fn test_flows() {
        let graph = NutrientGraph::try_new(dairy_kous(), dairy_pathways()).unwrap();

        let field_in: Vec<_> = graph.inflows("field_main").unwrap().collect();
        assert_eq!(field_in.len(), 2);
        assert!(field_in.iter().all(|p| p.to == "field_main"));

        let herd_out: Vec<_> = graph.outflows("herd_main").unwrap().collect();
        assert!(herd_out
            .iter()
            .any(|p| p.kind == PathwayType::ManureProduction));
        assert!(herd_out.iter().any(|p| p.kind == PathwayType::Sale));

        assert!(graph.inflows("missing").is_err());
    }
}
