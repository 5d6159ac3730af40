// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Iterators over KOUs and pathways in a `NutrientGraph`.

use petgraph::visit::EdgeRef;

use crate::{Kou, Pathway};

/// An iterator over the KOUs in a `NutrientGraph`, in insertion order.
pub struct Kous<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<Kou>>,
}

impl<'a> Iterator for Kous<'a> {
    type Item = &'a Kou;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the pathways in a `NutrientGraph`, in insertion order.
pub struct Pathways<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<Pathway>>,
}

impl<'a> Iterator for Pathways<'a> {
    type Item = &'a Pathway;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|e| &e.weight)
    }
}

/// An iterator over the pathways entering or leaving a single KOU.
pub struct Flows<'a> {
    pub(crate) iter: petgraph::graph::Edges<'a, Pathway, petgraph::Directed>,
}

impl<'a> Iterator for Flows<'a> {
    type Item = &'a Pathway;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|e| e.weight())
    }
}
