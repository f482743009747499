//! Tie-aware fractional ranking of method columns

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::error::{AnalysisError, Result};
use crate::analysis::wide::WideTable;
use crate::experiment::{Direction, ScorerRegistry};

/// Per-method ranks for one (dataset, classifier, metric) row, 1 = best
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRow {
    pub dataset: String,
    pub classifier: String,
    pub metric: String,
    pub ranks: Vec<Option<f64>>,
}

/// Ranking of methods per (dataset, classifier, metric). Columns follow
/// the declared method order of the wide table it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    pub methods: Vec<String>,
    pub rows: Vec<RankRow>,
}

/// Ranks averaged across the dataset dimension per (classifier, metric)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanRankRow {
    pub classifier: String,
    pub metric: String,
    pub ranks: Vec<Option<f64>>,
}

/// Mean-ranking table, one row per (classifier, metric)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanRankingTable {
    pub methods: Vec<String>,
    pub rows: Vec<MeanRankRow>,
}

/// Fractional ranking of one row of values under `sign * value`
/// ordering, 1 = best.
///
/// Exactly-equal input values share the mean of the ranks they would
/// occupy, so for k non-null entries the ranks always sum to
/// k·(k+1)/2. Null entries stay null and take no rank.
pub fn rank_values(values: &[Option<f64>], direction: Direction) -> Vec<Option<f64>> {
    let sign = direction.sign();
    let present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    let k = present.len();

    // ascending positions under the direction-adjusted value
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        (sign * present[a].1)
            .partial_cmp(&(sign * present[b].1))
            .unwrap_or(Ordering::Equal)
    });
    let mut positions = vec![0.0; k];
    for (position, &slot) in order.iter().enumerate() {
        positions[slot] = position as f64;
    }

    // tied raw values share their group's mean position
    let mut groups: HashMap<u64, Vec<usize>> = HashMap::new();
    for (slot, &(_, value)) in present.iter().enumerate() {
        groups.entry(value.to_bits()).or_default().push(slot);
    }
    for slots in groups.values() {
        if slots.len() > 1 {
            let mean = slots.iter().map(|&s| positions[s]).sum::<f64>() / slots.len() as f64;
            for &slot in slots {
                positions[slot] = mean;
            }
        }
    }

    let mut ranks = vec![None; values.len()];
    for (slot, &(index, _)) in present.iter().enumerate() {
        ranks[index] = Some(k as f64 - positions[slot]);
    }
    ranks
}

/// Rank every wide row independently, looking up each metric's
/// directionality in the scorer registry
pub fn calculate_ranking(wide: &WideTable, scorers: &ScorerRegistry) -> Result<RankingTable> {
    let mut rows = Vec::with_capacity(wide.rows.len());
    for row in &wide.rows {
        let direction = scorers
            .direction(&row.metric)
            .ok_or_else(|| AnalysisError::UnknownMetric(row.metric.clone()))?;
        let values: Vec<Option<f64>> = row.cells.iter().map(|c| c.map(|c| c.mean)).collect();
        rows.push(RankRow {
            dataset: row.dataset.clone(),
            classifier: row.classifier.clone(),
            metric: row.metric.clone(),
            ranks: rank_values(&values, direction),
        });
    }
    Ok(RankingTable {
        methods: wide.methods.clone(),
        rows,
    })
}

/// Average ranks across datasets, grouped by (classifier, metric).
///
/// Ranks are already real-valued, so this is a plain column mean over
/// each group's rows; null cells are skipped, and a column with no
/// values in a group stays null.
pub fn calculate_mean_ranking(ranking: &RankingTable) -> MeanRankingTable {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Vec<&RankRow>> = HashMap::new();
    for row in &ranking.rows {
        let key = (row.classifier.clone(), row.metric.clone());
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(row);
    }

    let rows = order
        .into_iter()
        .map(|key| {
            let members = &groups[&key];
            let ranks = (0..ranking.methods.len())
                .map(|col| {
                    let values: Vec<f64> =
                        members.iter().filter_map(|row| row.ranks[col]).collect();
                    if values.is_empty() {
                        None
                    } else {
                        Some(values.iter().sum::<f64>() / values.len() as f64)
                    }
                })
                .collect();
            let (classifier, metric) = key;
            MeanRankRow {
                classifier,
                metric,
                ranks,
            }
        })
        .collect();

    MeanRankingTable {
        methods: ranking.methods.clone(),
        rows,
    }
}
