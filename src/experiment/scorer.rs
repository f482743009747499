//! Scorer registry: metric name to directionality

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a metric is better when larger or when smaller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Higher raw scores are better (sign +1)
    Maximize,
    /// Lower raw scores are better (sign -1)
    Minimize,
}

impl Direction {
    /// Directionality sign used when ordering scores
    pub fn sign(self) -> f64 {
        match self {
            Direction::Maximize => 1.0,
            Direction::Minimize => -1.0,
        }
    }
}

/// Explicit mapping from metric name to directionality.
///
/// Passed to the ranking and optimal-selection stages as configuration
/// rather than looked up from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorerRegistry {
    scorers: BTreeMap<String, Direction>,
}

impl ScorerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with common classification scorers
    pub fn common() -> Self {
        let mut registry = Self::new();
        for metric in [
            "accuracy",
            "f1",
            "precision",
            "recall",
            "roc_auc",
            "geometric_mean_score",
            "average_precision",
        ] {
            registry.insert(metric, Direction::Maximize);
        }
        for metric in ["log_loss", "brier_score_loss", "hinge_loss"] {
            registry.insert(metric, Direction::Minimize);
        }
        registry
    }

    /// Register a metric's directionality
    pub fn insert(&mut self, metric: impl Into<String>, direction: Direction) {
        self.scorers.insert(metric.into(), direction);
    }

    /// Builder-style variant of [`ScorerRegistry::insert`]
    #[must_use]
    pub fn with(mut self, metric: impl Into<String>, direction: Direction) -> Self {
        self.insert(metric, direction);
        self
    }

    /// Look up a metric's directionality
    pub fn direction(&self, metric: &str) -> Option<Direction> {
        self.scorers.get(metric).copied()
    }
}
