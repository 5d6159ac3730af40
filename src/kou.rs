// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! This module defines the Key Operational Unit (KOU) entity: a farm
//! sub-system that nutrients flow into and out of, such as a field, a
//! livestock group or a slurry store.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::nutrient::{Nutrient, NutrientMass};

/// Reserved id for the atmospheric-loss sink.  Pathways may target it even
/// when no KOU record with this id exists.
pub const ATMOSPHERE_ID: &str = "atmosphere";

/// Represents the type of a KOU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KouType {
    Field,
    LivestockGroup,
    FeedStore,
    ManureStore,
    Output,
    External,
}

impl KouType {
    /// All KOU types, in the fixed order used for flow-summary node layout.
    pub const ALL: [KouType; 6] = [
        KouType::External,
        KouType::FeedStore,
        KouType::LivestockGroup,
        KouType::ManureStore,
        KouType::Field,
        KouType::Output,
    ];
}

impl Display for KouType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KouType::Field => write!(f, "Field"),
            KouType::LivestockGroup => write!(f, "LivestockGroup"),
            KouType::FeedStore => write!(f, "FeedStore"),
            KouType::ManureStore => write!(f, "ManureStore"),
            KouType::Output => write!(f, "Output"),
            KouType::External => write!(f, "External"),
        }
    }
}

/// How a field is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldUse {
    GrazingPlatform,
    SilageGround,
    Maize,
    Cereals,
    OtherCrops,
    PermanentPasture,
    MixedCropping,
    MixedFarming,
}

/// Livestock group classification within a herd.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivestockGroup {
    MilkingCows,
    DryCows,
    Youngstock,
}

/// Soil or store status for a single nutrient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientStatus {
    pub total: f64,
    pub available: f64,
    /// Soil index (P and K only; 0 elsewhere).
    pub index: u8,
}

/// Per-nutrient status map carried by every KOU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientStatusMap {
    #[serde(rename = "N")]
    pub n: NutrientStatus,
    #[serde(rename = "P")]
    pub p: NutrientStatus,
    #[serde(rename = "K")]
    pub k: NutrientStatus,
    #[serde(rename = "S")]
    pub s: NutrientStatus,
}

impl std::ops::Index<Nutrient> for NutrientStatusMap {
    type Output = NutrientStatus;

    fn index(&self, nutrient: Nutrient) -> &NutrientStatus {
        match nutrient {
            Nutrient::N => &self.n,
            Nutrient::P => &self.p,
            Nutrient::K => &self.k,
            Nutrient::S => &self.s,
        }
    }
}

/// Physical and classification properties of a KOU.
///
/// Every field has a zero default so that downstream code can read nested
/// values without null-guards; only the fields relevant to a KOU's type are
/// ever non-zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KouProperties {
    /// Soil/store nutrient status, zeroed on construction.
    #[serde(default)]
    pub nutrients: NutrientStatusMap,
    /// Hectares; fields only.
    #[serde(default)]
    pub area: f64,
    /// Tonnes or m³; stores only.
    #[serde(default)]
    pub capacity: f64,
    /// Current amount in store; `current_stock <= capacity` is a soft
    /// invariant reported via a warning, never enforced destructively.
    #[serde(default)]
    pub current_stock: f64,
    /// Head count; livestock groups only.
    #[serde(default)]
    pub animal_count: f64,
    /// Litres/year per animal; milking groups only.
    #[serde(default)]
    pub milk_yield: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_use: Option<FieldUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livestock_group: Option<LivestockGroup>,
    /// Nutrient content per unit of stored material (kg/m³ or kg/t);
    /// manure stores only.
    #[serde(default)]
    pub store_content: NutrientMass,
}

/// A Key Operational Unit: a node in the nutrient graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kou {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: KouType,
    pub name: String,
    #[serde(default)]
    pub properties: KouProperties,
}

impl Kou {
    /// Creates a KOU with the full default property tree.
    pub fn new(kind: KouType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            properties: KouProperties::default(),
        }
    }

    /// Creates a field KOU with the given area in hectares.
    pub fn field(id: impl Into<String>, name: impl Into<String>, area: f64, use_: FieldUse) -> Self {
        let mut kou = Self::new(KouType::Field, id, name);
        kou.properties.area = area.max(0.0);
        kou.properties.field_use = Some(use_);
        kou
    }

    /// Creates a livestock group KOU.
    pub fn livestock_group(
        id: impl Into<String>,
        name: impl Into<String>,
        group: LivestockGroup,
        animal_count: f64,
        milk_yield: f64,
    ) -> Self {
        let mut kou = Self::new(KouType::LivestockGroup, id, name);
        kou.properties.livestock_group = Some(group);
        kou.properties.animal_count = animal_count.max(0.0);
        kou.properties.milk_yield = milk_yield.max(0.0);
        kou
    }

    /// Creates a feed or manure store KOU.
    pub fn store(
        kind: KouType,
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: f64,
        current_stock: f64,
    ) -> Self {
        let mut kou = Self::new(kind, id, name);
        kou.properties.capacity = capacity.max(0.0);
        kou.properties.current_stock = current_stock.max(0.0);
        kou
    }

    /// Creates a fallback KOU for an id referenced by a pathway but absent
    /// from the KOU set.  The name is the capitalized id with underscores
    /// replaced by spaces; `atmosphere` becomes an Output sink, anything else
    /// an External party.
    pub fn fallback(id: &str) -> Self {
        let kind = if id == ATMOSPHERE_ID {
            KouType::Output
        } else {
            KouType::External
        };
        Self::new(kind, id, capitalize(id))
    }
}

fn capitalize(id: &str) -> String {
    let label = id.replace('_', " ");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => label,
    }
}

/// Predicates for checking the type of a [`Kou`].
pub(crate) trait KindPredicates {
    fn kind(&self) -> KouType;

    fn is_field(&self) -> bool {
        self.kind() == KouType::Field
    }

    fn is_livestock_group(&self) -> bool {
        self.kind() == KouType::LivestockGroup
    }

    fn is_feed_store(&self) -> bool {
        self.kind() == KouType::FeedStore
    }

    fn is_manure_store(&self) -> bool {
        self.kind() == KouType::ManureStore
    }

    fn is_output(&self) -> bool {
        self.kind() == KouType::Output
    }

    fn is_external(&self) -> bool {
        self.kind() == KouType::External
    }
}

impl KindPredicates for Kou {
    fn kind(&self) -> KouType {
        self.kind
    }
}
