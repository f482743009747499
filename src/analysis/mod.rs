//! Analysis pipeline
//!
//! Pure, synchronous transformations of the experiment's results table:
//!
//! - `stats`: per-configuration mean/std aggregation
//! - `matching`: family-name resolution against expanded names
//! - `optimal`: best configuration per (dataset, classifier, method) cell
//! - `wide`: long-to-wide pivot of the optimal table
//! - `ranking`: tie-aware fractional ranking and mean ranking
//! - `friedman`: significance test of the rankings across datasets
//!
//! [`AnalysisReport::compute`] runs every stage in order and returns the
//! full set of derived tables, or the first precondition error.

pub mod error;
pub mod friedman;
pub mod matching;
pub mod optimal;
pub mod ranking;
pub mod stats;
pub mod statistical;
pub mod wide;

pub use error::{AnalysisError, Result};
pub use friedman::{friedman_test, SignificanceRow, MIN_METHODS};
pub use matching::NameIndex;
pub use optimal::{calculate_optimal_stats, OptimalRow};
pub use ranking::{
    calculate_mean_ranking, calculate_ranking, rank_values, MeanRankRow, MeanRankingTable,
    RankRow, RankingTable,
};
pub use stats::{calculate_stats, StatsRow};
pub use wide::{reshape_wide, WideCell, WideRow, WideTable};

use serde::{Deserialize, Serialize};

use crate::experiment::Experiment;

/// Every table the pipeline derives from one experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Mean/std per unique configuration (absolute means)
    pub stats: Vec<StatsRow>,
    /// Best configuration per cell, long format, parameters resolved
    pub optimal: Vec<OptimalRow>,
    /// Optimal table pivoted wide, std appended
    pub optimal_wide: WideTable,
    /// Per-row method ranking
    pub ranking: RankingTable,
    /// Ranks averaged across datasets
    pub mean_ranking: MeanRankingTable,
    /// Friedman test per (classifier, metric)
    pub significance: Vec<SignificanceRow>,
}

impl AnalysisReport {
    /// Run the whole pipeline on a completed experiment.
    ///
    /// Validates the experiment first, then derives every table. Either
    /// the full report comes back or the first failed precondition.
    pub fn compute(experiment: &Experiment, alpha: f64) -> Result<Self> {
        experiment.validate()?;

        let stats = calculate_stats(&experiment.results);
        let optimal = calculate_optimal_stats(experiment, true)?;

        let method_names: Vec<String> =
            experiment.methods.iter().map(|m| m.name.clone()).collect();
        let optimal_wide = reshape_wide(&optimal, &method_names, true);

        // ranking works on means alone
        let mean_wide = reshape_wide(&optimal, &method_names, false);
        let ranking = calculate_ranking(&mean_wide, &experiment.scorers)?;
        let mean_ranking = calculate_mean_ranking(&ranking);
        let significance = friedman_test(&ranking, alpha)?;

        Ok(Self {
            stats,
            optimal,
            optimal_wide,
            ranking,
            mean_ranking,
            significance,
        })
    }
}
