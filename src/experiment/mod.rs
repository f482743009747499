//! Experiment input side
//!
//! Everything the analysis pipeline consumes arrives through
//! [`Experiment`]: the raw per-fold results produced by an external
//! model-search/cross-validation executor, the declared classifier and
//! method families, their expanded configurations (the fitted-estimator
//! registry), and the scorer registry. The pipeline never fits models or
//! runs cross-validation itself.

mod params;
mod scorer;

pub use params::{ParamGrid, ParamMap, ParamValue};
pub use scorer::{Direction, ScorerRegistry};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Experiment construction errors
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("duplicate dataset name: '{0}'")]
    DuplicateDataset(String),
}

/// One completed cross-validation fold score.
///
/// The key tuple (dataset, classifier_config, method_config, metric)
/// repeats across independent folds and runs; those repeats are the
/// population whose mean/std the aggregation stage computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub dataset: String,
    /// Expanded classifier configuration name (e.g. `RandomForest_2`)
    pub classifier_config: String,
    /// Expanded resampling-method configuration name (e.g. `smote_1`)
    pub method_config: String,
    pub metric: String,
    pub score: f64,
}

impl RawResult {
    pub fn new(
        dataset: impl Into<String>,
        classifier_config: impl Into<String>,
        method_config: impl Into<String>,
        metric: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            classifier_config: classifier_config.into(),
            method_config: method_config.into(),
            metric: metric.into(),
            score,
        }
    }
}

/// A declared classifier or method family, before grid expansion.
///
/// The name doubles as the pattern the matching stage applies to
/// expanded configuration names. `param_grid: None` declares a family
/// with no underlying estimator (the no-resampling baseline); an empty
/// grid declares an estimator evaluated with default parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilySpec {
    pub name: String,
    pub param_grid: Option<ParamGrid>,
}

impl FamilySpec {
    pub fn new(name: impl Into<String>, param_grid: Option<ParamGrid>) -> Self {
        Self {
            name: name.into(),
            param_grid,
        }
    }

    /// Family backed by an estimator with default parameters
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::new(name, Some(ParamGrid::new()))
    }

    /// Family with no underlying estimator (e.g. a "none" baseline)
    pub fn baseline(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

/// One concrete configuration after grid expansion, with its resolved
/// hyperparameters. `params` is `None` for estimator-less families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedConfig {
    pub name: String,
    pub params: Option<ParamMap>,
}

/// Expand one family into its concrete configurations.
///
/// Families expanding to a single configuration keep their declared
/// name; otherwise configurations are suffixed `_1`, `_2`, … in grid
/// order, mirroring the executor's naming.
pub fn expand_family(spec: &FamilySpec) -> Vec<ExpandedConfig> {
    let Some(grid) = &spec.param_grid else {
        return vec![ExpandedConfig {
            name: spec.name.clone(),
            params: None,
        }];
    };

    let maps = grid.expand();
    if maps.len() == 1 {
        let params = maps.into_iter().next();
        return vec![ExpandedConfig {
            name: spec.name.clone(),
            params,
        }];
    }
    maps.into_iter()
        .enumerate()
        .map(|(i, params)| ExpandedConfig {
            name: format!("{}_{}", spec.name, i + 1),
            params: Some(params),
        })
        .collect()
}

/// A completed model-search experiment, handed over by the executor.
///
/// All fields are plain data; [`Experiment::validate`] checks the
/// construction preconditions and is run by the pipeline facade before
/// any aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experiment {
    /// Dataset names, in declared order; must be unique
    pub datasets: Vec<String>,
    /// Declared classifier families, in declared order
    pub classifiers: Vec<FamilySpec>,
    /// Declared resampling-method families, in declared order
    pub methods: Vec<FamilySpec>,
    /// Expanded classifier configurations with resolved parameters
    pub expanded_classifiers: Vec<ExpandedConfig>,
    /// Expanded method configurations with resolved parameters
    pub expanded_methods: Vec<ExpandedConfig>,
    /// Metric directionality registry
    pub scorers: ScorerRegistry,
    /// Raw per-fold scores from the executor
    pub results: Vec<RawResult>,
}

impl Experiment {
    /// Expand every declared family and populate the expanded lists
    #[must_use]
    pub fn with_expansions(mut self) -> Self {
        self.expanded_classifiers = self.classifiers.iter().flat_map(expand_family).collect();
        self.expanded_methods = self.methods.iter().flat_map(expand_family).collect();
        self
    }

    /// Check construction preconditions.
    ///
    /// Fails on duplicate dataset names before any aggregation runs.
    pub fn validate(&self) -> Result<(), ExperimentError> {
        let mut seen = BTreeSet::new();
        for dataset in &self.datasets {
            if !seen.insert(dataset.as_str()) {
                return Err(ExperimentError::DuplicateDataset(dataset.clone()));
            }
        }
        Ok(())
    }
}
