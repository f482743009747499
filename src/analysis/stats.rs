//! Aggregation of raw fold scores into per-configuration statistics

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::experiment::RawResult;

/// Mean/std of the fold scores for one unique
/// (dataset, classifier config, method config, metric) combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRow {
    pub dataset: String,
    pub classifier_config: String,
    pub method_config: String,
    pub metric: String,
    pub mean_score: f64,
    pub std_score: f64,
}

/// Aggregate raw results keeping the mean's sign.
///
/// Groups are emitted in first-seen input order. The std is the sample
/// standard deviation (n - 1 denominator); a singleton group yields NaN.
/// The signed means feed optimal selection, which must respect the
/// underlying scorer's sign convention.
pub(crate) fn aggregate_signed(results: &[RawResult]) -> Vec<StatsRow> {
    let mut order: Vec<(String, String, String, String)> = Vec::new();
    let mut groups: HashMap<(String, String, String, String), Vec<f64>> = HashMap::new();

    for row in results {
        let key = (
            row.dataset.clone(),
            row.classifier_config.clone(),
            row.method_config.clone(),
            row.metric.clone(),
        );
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(row.score);
    }

    order
        .into_iter()
        .map(|key| {
            let scores = &groups[&key];
            let (mean, std) = mean_std(scores);
            let (dataset, classifier_config, method_config, metric) = key;
            StatsRow {
                dataset,
                classifier_config,
                method_config,
                metric,
                mean_score: mean,
                std_score: std,
            }
        })
        .collect()
}

/// Aggregate raw results into the public stats table.
///
/// Identical to the signed aggregation except that means are stored as
/// absolute values, so loss-like scorers report positive magnitudes.
pub fn calculate_stats(results: &[RawResult]) -> Vec<StatsRow> {
    let mut stats = aggregate_signed(results);
    for row in &mut stats {
        row.mean_score = row.mean_score.abs();
    }
    stats
}

fn mean_std(scores: &[f64]) -> (f64, f64) {
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    if scores.len() < 2 {
        return (mean, f64::NAN);
    }
    let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}
