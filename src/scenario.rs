// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! What-if scenario composition.
//!
//! An intervention is a pure transformation over a pathway list.  A scenario
//! keeps the untouched baseline plus the ordered set of applied intervention
//! ids, so any intervention can be removed later by replaying the remainder
//! against the baseline.  The baseline itself is never mutated.

use crate::builder::{FERTILIZER_SUPPLIER_ID, SLURRY_STORE_ID};
use crate::nutrient::NutrientMass;
use crate::pathway::{Pathway, PathwayType};
use crate::Error;

/// A named, pure transformation of a pathway list.
///
/// Implementations must not mutate their input and must be deterministic:
/// applying the same intervention to the same pathways twice yields the same
/// result.
pub trait Intervention {
    /// Stable identifier, unique within a registry.
    fn id(&self) -> &str;

    /// Human-readable name for display.
    fn name(&self) -> &str;

    /// Returns the transformed pathway list.
    fn apply(&self, pathways: &[Pathway]) -> Vec<Pathway>;
}

/// Selects the pathways an intervention acts on.
///
/// A pathway matches when its source equals `from` (if set) and its type is
/// one of `kinds` (an empty list matches every type).
#[derive(Clone, Debug, Default)]
pub struct PathwaySelector {
    pub from: Option<String>,
    pub kinds: Vec<PathwayType>,
}

impl PathwaySelector {
    pub fn matches(&self, pathway: &Pathway) -> bool {
        if let Some(from) = &self.from {
            if &pathway.from != from {
                return false;
            }
        }
        self.kinds.is_empty() || self.kinds.contains(&pathway.kind)
    }
}

/// An intervention that scales the nutrient masses of the selected pathways
/// by per-nutrient factors, leaving everything else (ids, endpoints, types)
/// untouched.
///
/// All the standard interventions are instances of this; custom interventions
/// can implement [`Intervention`] directly.
pub struct ScaleNutrients {
    pub id: String,
    pub name: String,
    pub selector: PathwaySelector,
    /// Per-nutrient multipliers; 1.0 leaves a nutrient unchanged.
    pub factors: NutrientMass,
}

impl Intervention for ScaleNutrients {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, pathways: &[Pathway]) -> Vec<Pathway> {
        pathways
            .iter()
            .map(|pathway| {
                if !self.selector.matches(pathway) {
                    return pathway.clone();
                }
                let mut scaled = pathway.clone();
                scaled.nutrients = pathway.nutrients.scaled_by(&self.factors);
                scaled
            })
            .collect()
    }
}

/// The standard intervention registry for dairy systems.
pub fn standard_interventions() -> Vec<Box<dyn Intervention>> {
    vec![
        Box::new(ScaleNutrients {
            id: "slurry_export".into(),
            name: "Export 25% of slurry".into(),
            selector: PathwaySelector {
                from: Some(SLURRY_STORE_ID.into()),
                kinds: vec![PathwayType::ManureApplication],
            },
            factors: NutrientMass::new(0.75, 0.75, 0.75, 0.75),
        }),
        Box::new(ScaleNutrients {
            id: "trailing_shoe".into(),
            name: "Trailing shoe slurry application".into(),
            selector: PathwaySelector {
                from: None,
                kinds: vec![PathwayType::ManureApplication],
            },
            // Less ammonia volatilized at spreading, so more N (and some S)
            // reaches the field.
            factors: NutrientMass::new(1.15, 1.0, 1.0, 1.05),
        }),
        Box::new(ScaleNutrients {
            id: "reduce_fertilizer".into(),
            name: "Reduce purchased fertiliser by 30%".into(),
            selector: PathwaySelector {
                from: Some(FERTILIZER_SUPPLIER_ID.into()),
                kinds: vec![],
            },
            factors: NutrientMass::new(0.7, 0.7, 0.7, 0.7),
        }),
        Box::new(ScaleNutrients {
            id: "cover_crops".into(),
            name: "Overwinter cover crops".into(),
            selector: PathwaySelector {
                from: None,
                kinds: vec![PathwayType::AtmosphericLoss, PathwayType::LeachingLoss],
            },
            factors: NutrientMass::new(0.6, 0.8, 0.9, 0.7),
        }),
        Box::new(ScaleNutrients {
            id: "precision_feeding".into(),
            name: "Precision protein feeding".into(),
            selector: PathwaySelector {
                from: None,
                kinds: vec![PathwayType::ManureProduction],
            },
            factors: NutrientMass::new(0.8, 0.9, 1.0, 0.9),
        }),
        Box::new(ScaleNutrients {
            id: "increase_storage".into(),
            name: "Extend slurry storage".into(),
            selector: PathwaySelector {
                from: None,
                kinds: vec![PathwayType::ManureApplication],
            },
            // Better-timed spreading retains more of the stored N.
            factors: NutrientMass::new(1.1, 1.05, 1.0, 1.0),
        }),
    ]
}

/// A baseline pathway list plus an ordered stack of applied interventions.
pub struct Scenario {
    baseline: Vec<Pathway>,
    applied: Vec<String>,
    pathways: Vec<Pathway>,
}

impl Scenario {
    /// Starts a scenario from a baseline pathway list, usually
    /// [`NutrientGraph::pathways`][crate::NutrientGraph::pathways] collected.
    pub fn new(baseline: Vec<Pathway>) -> Self {
        Self {
            pathways: baseline.clone(),
            applied: Vec::new(),
            baseline,
        }
    }

    /// The current, transformed pathway list.
    pub fn pathways(&self) -> &[Pathway] {
        &self.pathways
    }

    /// The untouched baseline.
    pub fn baseline(&self) -> &[Pathway] {
        &self.baseline
    }

    /// Ids of the applied interventions, in application order.
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Applies an intervention on top of the current state.  Applying the
    /// same intervention id twice is a no-op.
    pub fn apply(&mut self, intervention: &dyn Intervention) {
        if self.applied.iter().any(|id| id == intervention.id()) {
            return;
        }
        self.pathways = intervention.apply(&self.pathways);
        self.applied.push(intervention.id().to_string());
    }

    /// Removes one applied intervention by replaying the remaining stack
    /// against the baseline.
    ///
    /// The registry must contain every still-applied intervention; returns an
    /// error if `id` was never applied or a replayed id is missing from the
    /// registry.  On error the scenario is left untouched.
    pub fn remove(&mut self, id: &str, registry: &[Box<dyn Intervention>]) -> Result<(), Error> {
        let Some(position) = self.applied.iter().position(|applied| applied == id) else {
            return Err(Error::internal(format!(
                "Intervention {} is not applied.",
                id
            )));
        };

        // Resolve the whole replay chain before mutating anything, so a
        // missing registry entry cannot leave `applied` and `pathways`
        // disagreeing.
        let mut chain = Vec::with_capacity(self.applied.len() - 1);
        for applied in self.applied.iter().filter(|applied| *applied != id) {
            let intervention = registry
                .iter()
                .find(|i| i.id() == applied)
                .ok_or_else(|| {
                    Error::internal(format!("Intervention {} not found in registry.", applied))
                })?;
            chain.push(intervention.as_ref());
        }

        let mut pathways = self.baseline.clone();
        for intervention in chain {
            pathways = intervention.apply(&pathways);
        }

        self.applied.remove(position);
        self.pathways = pathways;

        Ok(())
    }
}
