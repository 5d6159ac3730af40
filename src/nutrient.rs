// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! The four nutrients tracked by the budget, and the per-nutrient mass and
//! balance maps used throughout the crate.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::{Add, AddAssign, Index, IndexMut};

/// A nutrient tracked by the budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    N,
    P,
    K,
    S,
}

impl Nutrient {
    /// All tracked nutrients, in reporting order.
    pub const ALL: [Nutrient; 4] = [Nutrient::N, Nutrient::P, Nutrient::K, Nutrient::S];
}

impl Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nutrient::N => write!(f, "N"),
            Nutrient::P => write!(f, "P"),
            Nutrient::K => write!(f, "K"),
            Nutrient::S => write!(f, "S"),
        }
    }
}

/// Nutrient masses in kg/year, one value per tracked nutrient.
///
/// Negative values are not meaningful for transfers; constructors that accept
/// external data clamp them to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientMass {
    #[serde(default, rename = "N")]
    pub n: f64,
    #[serde(default, rename = "P")]
    pub p: f64,
    #[serde(default, rename = "K")]
    pub k: f64,
    #[serde(default, rename = "S")]
    pub s: f64,
}

impl NutrientMass {
    pub fn new(n: f64, p: f64, k: f64, s: f64) -> Self {
        Self { n, p, k, s }
    }

    /// Replaces negative components with zero.
    pub fn clamped(self) -> Self {
        Self {
            n: self.n.max(0.0),
            p: self.p.max(0.0),
            k: self.k.max(0.0),
            s: self.s.max(0.0),
        }
    }

    /// True when all four components are zero.
    pub fn is_empty(&self) -> bool {
        Nutrient::ALL.iter().all(|n| self[*n] == 0.0)
    }

    /// Component-wise multiplication, used by scenario interventions.
    pub fn scaled_by(&self, factors: &NutrientMass) -> Self {
        Self {
            n: self.n * factors.n,
            p: self.p * factors.p,
            k: self.k * factors.k,
            s: self.s * factors.s,
        }
    }
}

impl Index<Nutrient> for NutrientMass {
    type Output = f64;

    fn index(&self, nutrient: Nutrient) -> &f64 {
        match nutrient {
            Nutrient::N => &self.n,
            Nutrient::P => &self.p,
            Nutrient::K => &self.k,
            Nutrient::S => &self.s,
        }
    }
}

impl IndexMut<Nutrient> for NutrientMass {
    fn index_mut(&mut self, nutrient: Nutrient) -> &mut f64 {
        match nutrient {
            Nutrient::N => &mut self.n,
            Nutrient::P => &mut self.p,
            Nutrient::K => &mut self.k,
            Nutrient::S => &mut self.s,
        }
    }
}

impl Add for NutrientMass {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            n: self.n + rhs.n,
            p: self.p + rhs.p,
            k: self.k + rhs.k,
            s: self.s + rhs.s,
        }
    }
}

impl AddAssign for NutrientMass {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Input, output and net totals for a single nutrient at a single KOU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowTotals {
    pub inputs: f64,
    pub outputs: f64,
    pub balance: f64,
}

/// A per-nutrient set of [`FlowTotals`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientBalance {
    #[serde(rename = "N")]
    pub n: FlowTotals,
    #[serde(rename = "P")]
    pub p: FlowTotals,
    #[serde(rename = "K")]
    pub k: FlowTotals,
    #[serde(rename = "S")]
    pub s: FlowTotals,
}

impl Index<Nutrient> for NutrientBalance {
    type Output = FlowTotals;

    fn index(&self, nutrient: Nutrient) -> &FlowTotals {
        match nutrient {
            Nutrient::N => &self.n,
            Nutrient::P => &self.p,
            Nutrient::K => &self.k,
            Nutrient::S => &self.s,
        }
    }
}

impl IndexMut<Nutrient> for NutrientBalance {
    fn index_mut(&mut self, nutrient: Nutrient) -> &mut FlowTotals {
        match nutrient {
            Nutrient::N => &mut self.n,
            Nutrient::P => &mut self.p,
            Nutrient::K => &mut self.k,
            Nutrient::S => &mut self.s,
        }
    }
}
