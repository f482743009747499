//! Comparar: comparison of model configurations across datasets
//!
//! Evaluates the results of a model-search experiment: combinations of a
//! base classifier and a resampling method, run over multiple datasets,
//! hyperparameter grids and repeated cross-validation. The input is a raw
//! table of per-fold scores; the outputs are derived, in-memory tables:
//!
//! - mean/std statistics per unique configuration,
//! - the best hyperparameter configuration per (dataset, classifier,
//!   method) cell,
//! - a tie-aware competition ranking of methods per classifier/metric,
//! - a Friedman test of whether that ranking differs from chance.
//!
//! ## Architecture
//!
//! - `experiment`: the input side — raw results, declared families,
//!   expanded configurations, scorer registry
//! - `analysis`: the pipeline — aggregation, optimal selection, wide
//!   reshaping, ranking, significance testing
//! - `report`: text and markdown rendering of the output tables
//!
//! ## Example
//!
//! ```ignore
//! use comparar::analysis::AnalysisReport;
//! use comparar::experiment::Experiment;
//!
//! let experiment = Experiment {
//!     datasets: vec!["imb_iris".into()],
//!     ..Default::default()
//! };
//! let report = AnalysisReport::compute(&experiment, 0.05)?;
//! println!("{}", report.ranking.to_markdown());
//! ```
//!
//! Model fitting and cross-validation themselves are out of scope: the
//! experiment arrives here already executed, and every pipeline stage is
//! a pure transformation of an immutable table into a new one.

pub mod analysis;
pub mod experiment;
pub mod report;

pub use analysis::{AnalysisError, AnalysisReport, Result};
pub use experiment::{
    Direction, ExpandedConfig, Experiment, ExperimentError, FamilySpec, ParamGrid, ParamMap,
    ParamValue, RawResult, ScorerRegistry,
};
