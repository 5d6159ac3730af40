// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! This module defines the pathway entity: a directed, nutrient-quantified
//! transfer between two KOUs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use crate::nutrient::NutrientMass;

/// Represents the type of a nutrient transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathwayType {
    Feeding,
    ManureProduction,
    ManureApplication,
    FertilizerApplication,
    Harvest,
    Grazing,
    Sale,
    Purchase,
    AtmosphericLoss,
    LeachingLoss,
    RunoffLoss,
}

impl PathwayType {
    /// True for the loss pathway types (atmospheric, leaching, runoff).
    pub fn is_loss(&self) -> bool {
        matches!(
            self,
            PathwayType::AtmosphericLoss | PathwayType::LeachingLoss | PathwayType::RunoffLoss
        )
    }
}

impl Display for PathwayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathwayType::Feeding => write!(f, "Feeding"),
            PathwayType::ManureProduction => write!(f, "ManureProduction"),
            PathwayType::ManureApplication => write!(f, "ManureApplication"),
            PathwayType::FertilizerApplication => write!(f, "FertilizerApplication"),
            PathwayType::Harvest => write!(f, "Harvest"),
            PathwayType::Grazing => write!(f, "Grazing"),
            PathwayType::Sale => write!(f, "Sale"),
            PathwayType::Purchase => write!(f, "Purchase"),
            PathwayType::AtmosphericLoss => write!(f, "AtmosphericLoss"),
            PathwayType::LeachingLoss => write!(f, "LeachingLoss"),
            PathwayType::RunoffLoss => write!(f, "RunoffLoss"),
        }
    }
}

/// Estimated losses incurred during a transfer, by loss route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LossBreakdown {
    #[serde(default)]
    pub atmospheric: NutrientMass,
    #[serde(default)]
    pub leaching: NutrientMass,
    #[serde(default)]
    pub runoff: NutrientMass,
}

/// Transfer metadata attached to a pathway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathwayProperties {
    /// When the transfer was recorded.
    pub date: DateTime<Utc>,
    /// Application method, e.g. "broadcast", "injection", "trailing_shoe".
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub losses: LossBreakdown,
}

impl Default for PathwayProperties {
    fn default() -> Self {
        Self {
            date: Utc::now(),
            method: String::new(),
            losses: LossBreakdown::default(),
        }
    }
}

/// A directed, nutrient-quantified edge between two KOUs.
///
/// Two pathways with identical endpoints and type are distinct entities until
/// aggregated; identity is the `id` alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: PathwayType,
    /// Transferred masses in kg/year, never negative.
    pub nutrients: NutrientMass,
    #[serde(default)]
    pub properties: PathwayProperties,
}

impl Pathway {
    /// Creates a pathway with a fresh unique id.  Negative nutrient masses
    /// are clamped to zero.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: PathwayType,
        nutrients: NutrientMass,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), from, to, kind, nutrients)
    }

    /// Creates a pathway with a caller-supplied id.
    pub fn with_id(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        kind: PathwayType,
        nutrients: NutrientMass,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            kind,
            nutrients: nutrients.clamped(),
            properties: PathwayProperties::default(),
        }
    }

    /// True when source and destination are the same KOU.  Self-loops are
    /// invalid and excluded from flow aggregation.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// True when all nutrient masses are zero.  Empty pathways are excluded
    /// from flow aggregation.
    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrient::NutrientMass;

    #[test]
    fn test_ids_are_unique() {
        let a = Pathway::new("x", "y", PathwayType::Feeding, NutrientMass::default());
        let b = Pathway::new("x", "y", PathwayType::Feeding, NutrientMass::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_negative_masses_are_clamped() {
        let pathway = Pathway::new(
            "store",
            "field",
            PathwayType::ManureApplication,
            NutrientMass::new(-10.0, 5.0, 0.0, 0.0),
        );
        assert_eq!(pathway.nutrients.n, 0.0);
        assert_eq!(pathway.nutrients.p, 5.0);
    }

    #[test]
    fn test_self_loop_and_empty_detection() {
        let loop_pathway = Pathway::new("a", "a", PathwayType::Grazing, NutrientMass::default());
        assert!(loop_pathway.is_self_loop());
        assert!(loop_pathway.is_empty());

        let flow = Pathway::new(
            "a",
            "b",
            PathwayType::Harvest,
            NutrientMass::new(1.0, 0.0, 0.0, 0.0),
        );
        assert!(!flow.is_self_loop());
        assert!(!flow.is_empty());
    }

    #[test]
    fn test_loss_types() {
        assert!(PathwayType::AtmosphericLoss.is_loss());
        assert!(PathwayType::LeachingLoss.is_loss());
        assert!(!PathwayType::Sale.is_loss());
    }
}
