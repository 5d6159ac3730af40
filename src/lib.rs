// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

/*!
# Farm Nutrient Graph

This is a library for representing the nutrient flows of a farm as a directed
graph and computing mass balances, compliance indicators and efficiency
metrics over it.

Farms are modelled as Key Operational Units (KOUs): fields, livestock groups,
feed and manure stores, external parties and output sinks, connected by
pathways, each carrying an annual mass of nitrogen, phosphorus, potassium and
sulphur in kilograms.

## Building a graph

The main struct is [`NutrientGraph`], instances of which can be created by
passing KOU and pathway lists to the [`try_new`][NutrientGraph::try_new]
method, or derived from survey data with [`build_graph`], which turns farm
input, output and manure records into the standard dairy KOU set and its
pathways.

Construction checks that KOU ids are unique and skips self-loop pathways;
pathways to undeclared endpoints get a synthesized fallback KOU so that
partial data still produces a usable graph.

## Analysis

On a built graph:

- [`balance_of`][NutrientGraph::balance_of] gives per-KOU input, output and
  net masses per nutrient.
- [`system_balance`][NutrientGraph::system_balance] gives whole-farm totals.
- [`flow_summary`][NutrientGraph::flow_summary] produces the deterministic
  node/link lists that flow diagrams render.
- [`SystemMetrics::compute`] evaluates regulatory compliance and nutrient use
  efficiency, and [`estimate_ghg`] maps efficiency to a greenhouse-gas
  intensity estimate.

## Scenarios and persistence

[`Scenario`] applies and removes named [`Intervention`]s over a pathway list
without touching the baseline, and [`GraphExport`] round-trips a graph
through versioned JSON.
*/

mod nutrient;
pub use nutrient::{FlowTotals, Nutrient, NutrientBalance, NutrientMass};

pub mod convert;

mod kou;
pub use kou::{
    FieldUse, Kou, KouProperties, KouType, LivestockGroup, NutrientStatus, NutrientStatusMap,
    ATMOSPHERE_ID,
};

mod pathway;
pub use pathway::{LossBreakdown, Pathway, PathwayProperties, PathwayType};

mod config;
pub use config::{
    BudgetConfig, ExcretionStandard, ExcretionStandards, GhgModel, GhgModelTable, KouDefaults,
    NutrientLimits, NutrientThresholds, UnitMultipliers,
};

mod survey;
pub use survey::{
    FarmInfo, InputRow, InputSource, ManureInfo, OutputKind, OutputRow, SourceClass,
    SourceContent, SurveyData,
};

mod graph;
pub use graph::{
    iterators, FlowLink, FlowNode, FlowSummary, NutrientGraph, SystemTotals, TypeFlow,
};

mod builder;
pub use builder::build_graph;

mod metrics;
pub use metrics::{estimate_manure_production, status_of, StatusBucket, SystemMetrics};

mod emissions;
pub use emissions::{
    categorize_performance, estimate_ghg, ghg_change, Confidence, GhgChange, GhgEstimate,
    PerformanceBand, SystemType,
};

mod scenario;
pub use scenario::{
    standard_interventions, Intervention, PathwaySelector, ScaleNutrients, Scenario,
};

mod export;
pub use export::{import_graph, GraphExport, EXPORT_VERSION};

mod error;
pub use error::Error;
