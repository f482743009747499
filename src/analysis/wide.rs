//! Long-to-wide pivot of the optimal stats table

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::optimal::OptimalRow;

/// One pivoted cell: the cell's mean score, with the std zipped in when
/// the reshape was asked to append it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WideCell {
    pub mean: f64,
    pub std: Option<f64>,
}

/// One row of the wide table: a (dataset, classifier, metric) key and
/// one cell per declared method family, `None` where the cell has no
/// optimal row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    pub dataset: String,
    pub classifier: String,
    pub metric: String,
    pub cells: Vec<Option<WideCell>>,
}

/// The pivoted optimal stats table. `methods` names the columns of
/// every row's `cells`, in declared family order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideTable {
    pub methods: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// Pivot optimal rows into one row per (dataset, classifier, metric).
///
/// Row keys keep first-seen order; the column set is always the full
/// declared method list, so sparse cells stay visible as `None` rather
/// than dropping the row.
pub fn reshape_wide(optimal: &[OptimalRow], methods: &[String], append_std: bool) -> WideTable {
    let column: HashMap<&str, usize> = methods
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();
    let mut rows: Vec<WideRow> = Vec::new();

    for row in optimal {
        let key = (row.dataset.clone(), row.classifier.clone(), row.metric.clone());
        let row_idx = *index.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            rows.push(WideRow {
                dataset: row.dataset.clone(),
                classifier: row.classifier.clone(),
                metric: row.metric.clone(),
                cells: vec![None; methods.len()],
            });
            rows.len() - 1
        });

        if let Some(&col) = column.get(row.method.as_str()) {
            rows[row_idx].cells[col] = Some(WideCell {
                mean: row.mean_score,
                std: append_std.then_some(row.std_score),
            });
        }
    }

    WideTable {
        methods: methods.to_vec(),
        rows,
    }
}
