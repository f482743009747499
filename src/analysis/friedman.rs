//! Friedman significance test over the rank table

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::error::{AnalysisError, Result};
use crate::analysis::ranking::RankingTable;
use crate::analysis::statistical::chi_square_p_value;

/// Minimum number of compared method families the test is defined for
pub const MIN_METHODS: usize = 3;

/// Friedman test outcome for one (classifier, metric) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignificanceRow {
    pub classifier: String,
    pub metric: String,
    pub p_value: f64,
    pub significant: bool,
}

/// Run the Friedman test per (classifier, metric) group of the ranking
/// table.
///
/// Each dataset contributes one block of method ranks; the null
/// hypothesis is that all methods are ranked equivalently across
/// datasets. The chi-square statistic carries the standard tie
/// correction `1 - Σ(t³ − t) / (n·k·(k² − 1))`; the p-value comes from
/// the chi-square survival function with k − 1 degrees of freedom.
///
/// Blocks with a missing method cell are skipped (the test needs
/// complete blocks); a group with no complete block emits no row.
/// Fewer than [`MIN_METHODS`] method families is an error.
pub fn friedman_test(ranking: &RankingTable, alpha: f64) -> Result<Vec<SignificanceRow>> {
    let k = ranking.methods.len();
    if k < MIN_METHODS {
        return Err(AnalysisError::InsufficientMethods {
            found: k,
            required: MIN_METHODS,
        });
    }

    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Vec<Vec<f64>>> = HashMap::new();
    for row in &ranking.rows {
        let block: Option<Vec<f64>> = row.ranks.iter().copied().collect();
        let Some(block) = block else {
            continue;
        };
        let key = (row.classifier.clone(), row.metric.clone());
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(block);
    }

    let results = order
        .into_iter()
        .map(|key| {
            let blocks = &groups[&key];
            let p_value = friedman_p_value(blocks, k);
            let (classifier, metric) = key;
            SignificanceRow {
                classifier,
                metric,
                p_value,
                significant: p_value < alpha,
            }
        })
        .collect();
    Ok(results)
}

fn friedman_p_value(blocks: &[Vec<f64>], k: usize) -> f64 {
    let n = blocks.len() as f64;
    let kf = k as f64;

    let mut rank_sums = vec![0.0; k];
    let mut tie_term = 0.0;
    for block in blocks {
        for (column, &rank) in block.iter().enumerate() {
            rank_sums[column] += rank;
        }
        let mut counts: HashMap<u64, f64> = HashMap::new();
        for &rank in block {
            *counts.entry(rank.to_bits()).or_insert(0.0) += 1.0;
        }
        tie_term += counts.values().map(|&t| t.powi(3) - t).sum::<f64>();
    }

    let correction = 1.0 - tie_term / (n * kf * (kf * kf - 1.0));
    let ssbn: f64 = rank_sums.iter().map(|s| s * s).sum();
    let statistic = (12.0 / (kf * n * (kf + 1.0)) * ssbn - 3.0 * n * (kf + 1.0)) / correction;
    chi_square_p_value(statistic, k - 1)
}
