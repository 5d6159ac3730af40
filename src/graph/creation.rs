// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Methods for creating [`NutrientGraph`] instances from given KOUs and
//! pathways.

use petgraph::graph::DiGraph;

use crate::kou::KindPredicates;
use crate::{Error, Kou, Pathway};

use super::{NodeIndexMap, NutrientGraph};

/// `NutrientGraph` instantiation.
impl NutrientGraph {
    /// Creates a new [`NutrientGraph`] from the given KOUs and pathways.
    ///
    /// Self-loop pathways are skipped with a warning, and endpoints without a
    /// KOU record get a synthesized fallback KOU, so a graph build only fails
    /// on duplicate KOU ids.
    pub fn try_new<KouIter: IntoIterator<Item = Kou>, PathwayIter: IntoIterator<Item = Pathway>>(
        kous: KouIter,
        pathways: PathwayIter,
    ) -> Result<Self, Error> {
        let (graph, indices) = Self::create_graph(kous)?;

        let mut ng = Self {
            graph,
            node_indices: indices,
        };
        ng.add_pathways(pathways)?;

        Ok(ng)
    }

    fn create_graph(
        kous: impl IntoIterator<Item = Kou>,
    ) -> Result<(DiGraph<Kou, Pathway>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for kou in kous {
            if indices.contains_key(&kou.id) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate KOU ID found: {}",
                    kou.id
                )));
            }

            if (kou.is_feed_store() || kou.is_manure_store())
                && kou.properties.current_stock > kou.properties.capacity
            {
                tracing::warn!(
                    "Store {} holds {} with a capacity of {}.",
                    kou.id,
                    kou.properties.current_stock,
                    kou.properties.capacity
                );
            }

            let id = kou.id.clone();
            let idx = graph.add_node(kou);
            indices.insert(id, idx);
        }

        Ok((graph, indices))
    }

    fn add_pathways(&mut self, pathways: impl IntoIterator<Item = Pathway>) -> Result<(), Error> {
        for mut pathway in pathways {
            if pathway.is_self_loop() {
                tracing::warn!(
                    "Pathway {} connects KOU {} to itself and will be skipped.",
                    pathway.id,
                    pathway.from
                );
                continue;
            }

            // Pathways built through `Pathway::new` are already clamped, but
            // deserialized ones may carry negative masses.
            pathway.nutrients = pathway.nutrients.clamped();

            let source_idx = self.index_or_fallback(&pathway.from);
            let dest_idx = self.index_or_fallback(&pathway.to);
            self.graph.add_edge(source_idx, dest_idx, pathway);
        }

        Ok(())
    }

    /// Returns the node index for the given KOU id, synthesizing a fallback
    /// KOU when no record exists.  Sentinel endpoints such as `atmosphere`
    /// and ad-hoc external parties land here.
    fn index_or_fallback(&mut self, id: &str) -> petgraph::graph::NodeIndex {
        if let Some(idx) = self.node_indices.get(id) {
            return *idx;
        }

        tracing::warn!("No KOU record for id {id}; synthesizing a fallback node.");
        let idx = self.graph.add_node(Kou::fallback(id));
        self.node_indices.insert(id.to_string(), idx);
        idx
    }
}
