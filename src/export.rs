// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Versioned JSON snapshots of a graph.
//!
//! A snapshot is the flat KOU and pathway lists plus a format version and a
//! timestamp.  Import rebuilds the graph through the normal constructor, so
//! every structural check (duplicate ids, self-loops, fallback endpoints)
//! applies to imported data exactly as it does to built data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kou::Kou;
use crate::pathway::Pathway;
use crate::{Error, NutrientGraph};

/// The current snapshot format version.
pub const EXPORT_VERSION: &str = "1.0";

/// A serializable snapshot of a graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub kous: Vec<Kou>,
    pub pathways: Vec<Pathway>,
}

impl GraphExport {
    /// Snapshots a graph, stamped with the current time.
    pub fn from_graph(graph: &NutrientGraph) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            timestamp: Utc::now(),
            kous: graph.kous().cloned().collect(),
            pathways: graph.pathways().cloned().collect(),
        }
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("Failed to serialize graph export: {e}")))
    }

    /// Parses a snapshot from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let export: Self = serde_json::from_str(json)
            .map_err(|e| Error::malformed_import(format!("Failed to parse graph export: {e}")))?;
        if export.version != EXPORT_VERSION {
            return Err(Error::malformed_import(format!(
                "Unsupported export version: {} (expected {}).",
                export.version, EXPORT_VERSION
            )));
        }
        Ok(export)
    }

    /// Rebuilds a graph from the snapshot, re-running all structural checks.
    pub fn into_graph(self) -> Result<NutrientGraph, Error> {
        NutrientGraph::try_new(self.kous, self.pathways)
    }
}

/// Parses a graph directly from exported JSON.
pub fn import_graph(json: &str) -> Result<NutrientGraph, Error> {
    GraphExport::from_json(json)?.into_graph()
}
