// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! The canonical graph-to-renderable-flow transformation.
//!
//! Chart components consume the [`FlowSummary`] produced here instead of
//! re-deriving node ordering and edge aggregation themselves, so every
//! diagram agrees on what the graph looks like.

use serde::Serialize;
use std::collections::HashMap;

use crate::kou::KouType;
use crate::nutrient::Nutrient;
use crate::NutrientGraph;

/// A renderable node: one KOU.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: KouType,
}

/// A renderable link: all pathways between one ordered pair of nodes,
/// aggregated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FlowLink {
    /// Index into [`FlowSummary::nodes`].
    pub source: usize,
    /// Index into [`FlowSummary::nodes`].
    pub target: usize,
    /// Summed mass of the selected nutrient, kg/year.
    pub value: f64,
    /// How many pathways were merged into this link.
    pub pathway_count: usize,
}

/// Nodes and links for a flow diagram of a single nutrient.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowSummary {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

/// Flow-summary generation.
impl NutrientGraph {
    /// Builds the renderable flow summary for one nutrient.
    ///
    /// Deterministic by construction: nodes are ordered by KOU type rank
    /// ([`KouType::ALL`]) and then by insertion order; links are keyed by
    /// their (source, target) index pair, appear in first-seen order, and
    /// accumulate the values and counts of later duplicates.  Zero-value
    /// pathways are excluded (self-loops never enter the graph).
    pub fn flow_summary(&self, nutrient: Nutrient) -> FlowSummary {
        let mut nodes: Vec<FlowNode> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for kind in KouType::ALL {
            for kou in self.kous().filter(|k| k.kind == kind) {
                positions.insert(kou.id.as_str(), nodes.len());
                nodes.push(FlowNode {
                    id: kou.id.clone(),
                    name: kou.name.clone(),
                    kind: kou.kind,
                });
            }
        }

        let mut links: Vec<FlowLink> = Vec::new();
        let mut link_index: HashMap<(usize, usize), usize> = HashMap::new();

        for pathway in self.pathways() {
            let value = pathway.nutrients[nutrient];
            if value <= 0.0 {
                continue;
            }
            let (Some(&source), Some(&target)) = (
                positions.get(pathway.from.as_str()),
                positions.get(pathway.to.as_str()),
            ) else {
                continue;
            };

            match link_index.get(&(source, target)) {
                Some(&i) => {
                    links[i].value += value;
                    links[i].pathway_count += 1;
                }
                None => {
                    link_index.insert((source, target), links.len());
                    links.push(FlowLink {
                        source,
                        target,
                        value,
                        pathway_count: 1,
                    });
                }
            }
        }

        FlowSummary { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixtures::{dairy_kous, dairy_pathways};
    use super::*;
    use crate::nutrient::NutrientMass;
    use crate::pathway::{Pathway, PathwayType};

    #[test]
    fn test_nodes_are_ordered_by_type_rank() {
        let graph = NutrientGraph::try_new(dairy_kous(), dairy_pathways()).unwrap();
        let summary = graph.flow_summary(Nutrient::N);

        let kinds: Vec<_> = summary.nodes.iter().map(|n| n.kind).collect();
        let mut ranked = kinds.clone();
        ranked.sort_by_key(|kind| KouType::ALL.iter().position(|k| k == kind));
        assert_eq!(kinds, ranked);

        // Both external suppliers come first, in insertion order.
        assert_eq!(summary.nodes[0].id, "feed_supplier");
        assert_eq!(summary.nodes[1].id, "fertilizer_supplier");
    }

    #[test]
    fn test_duplicate_edges_are_aggregated() {
        let mut pathways = dairy_pathways();
        // A second fertiliser application over the same pair.
        pathways.push(Pathway::new(
            "fertilizer_supplier",
            "field_main",
            PathwayType::FertilizerApplication,
            NutrientMass::new(500.0, 0.0, 0.0, 0.0),
        ));

        let graph = NutrientGraph::try_new(dairy_kous(), pathways).unwrap();
        let summary = graph.flow_summary(Nutrient::N);

        let field = summary.nodes.iter().position(|n| n.id == "field_main").unwrap();
        let supplier = summary
            .nodes
            .iter()
            .position(|n| n.id == "fertilizer_supplier")
            .unwrap();

        let link = summary
            .links
            .iter()
            .find(|l| l.source == supplier && l.target == field)
            .unwrap();
        assert_eq!(link.pathway_count, 2);
        assert!((link.value - 3432.5).abs() < 1e-9);
    }

    #[test]
    fn test_links_keep_first_seen_order() {
        let graph = NutrientGraph::try_new(dairy_kous(), dairy_pathways()).unwrap();
        let summary = graph.flow_summary(Nutrient::N);

        // The fixture declares the fertiliser application first.
        let supplier = summary
            .nodes
            .iter()
            .position(|n| n.id == "fertilizer_supplier")
            .unwrap();
        assert_eq!(summary.links[0].source, supplier);
    }

    #[test]
    fn test_zero_value_pathways_are_excluded() {
        let graph = NutrientGraph::try_new(dairy_kous(), dairy_pathways()).unwrap();

        // The milk sale carries no K, so no herd -> milk link for K.
        let summary = graph.flow_summary(Nutrient::K);
        let milk = summary.nodes.iter().position(|n| n.id == "milk_output").unwrap();
        assert!(summary.links.iter().all(|l| l.target != milk));
    }
}
