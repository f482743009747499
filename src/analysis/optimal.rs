//! Selection of the best configuration per (dataset, classifier, method) cell

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::error::Result;
use crate::analysis::matching::NameIndex;
use crate::analysis::stats::{aggregate_signed, StatsRow};
use crate::experiment::{ExpandedConfig, Experiment, ParamMap};

/// The best-performing configuration for one
/// (dataset, classifier family, method family, metric) cell.
///
/// `mean_score` is stored as an absolute value; the winning expanded
/// configuration was chosen on the signed mean. Parameter fields are
/// populated only when resolution is requested, and stay `None` for
/// estimator-less families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRow {
    pub dataset: String,
    pub classifier: String,
    pub method: String,
    pub metric: String,
    pub mean_score: f64,
    pub std_score: f64,
    pub classifier_params: Option<ParamMap>,
    pub method_params: Option<ParamMap>,
}

/// Scan every (dataset, classifier family, method family) cell and pick
/// the configuration with the best mean score per metric.
///
/// Per cell: expanded names are resolved through the family index, the
/// stats rows are filtered down to the cell, grouped by metric in
/// first-seen order, and within each metric group the row with the
/// maximal signed mean wins. On ties the first row encountered wins and
/// its std travels with it. Cells with no matching rows emit nothing.
pub fn calculate_optimal_stats(
    experiment: &Experiment,
    resolve_params: bool,
) -> Result<Vec<OptimalRow>> {
    let stats = aggregate_signed(&experiment.results);
    let classifier_index =
        NameIndex::build(&experiment.classifiers, &experiment.expanded_classifiers)?;
    let method_index = NameIndex::build(&experiment.methods, &experiment.expanded_methods)?;

    let classifier_configs = config_lookup(&experiment.expanded_classifiers);
    let method_configs = config_lookup(&experiment.expanded_methods);

    let mut optimal = Vec::new();
    for dataset in &experiment.datasets {
        for classifier in &experiment.classifiers {
            let matched_classifiers: HashSet<&str> = classifier_index
                .matches(&classifier.name)
                .iter()
                .map(String::as_str)
                .collect();
            for method in &experiment.methods {
                let matched_methods: HashSet<&str> = method_index
                    .matches(&method.name)
                    .iter()
                    .map(String::as_str)
                    .collect();

                let cell_rows = stats.iter().filter(|row| {
                    row.dataset == *dataset
                        && matched_classifiers.contains(row.classifier_config.as_str())
                        && matched_methods.contains(row.method_config.as_str())
                });

                for winner in select_per_metric(cell_rows) {
                    let (classifier_params, method_params) = if resolve_params {
                        (
                            resolve(&classifier_configs, &winner.classifier_config),
                            resolve(&method_configs, &winner.method_config),
                        )
                    } else {
                        (None, None)
                    };
                    optimal.push(OptimalRow {
                        dataset: dataset.clone(),
                        classifier: classifier.name.clone(),
                        method: method.name.clone(),
                        metric: winner.metric.clone(),
                        mean_score: winner.mean_score.abs(),
                        std_score: winner.std_score,
                        classifier_params,
                        method_params,
                    });
                }
            }
        }
    }
    Ok(optimal)
}

/// Best row per metric, metrics in first-seen order, first row wins ties
fn select_per_metric<'a>(rows: impl Iterator<Item = &'a StatsRow>) -> Vec<&'a StatsRow> {
    let mut order: Vec<&str> = Vec::new();
    let mut best: HashMap<&str, &StatsRow> = HashMap::new();
    for row in rows {
        if let Some(current) = best.get_mut(row.metric.as_str()) {
            // strictly greater: the first row encountered keeps a tie
            if row.mean_score > current.mean_score {
                *current = row;
            }
        } else {
            order.push(row.metric.as_str());
            best.insert(row.metric.as_str(), row);
        }
    }
    order.into_iter().map(|metric| best[metric]).collect()
}

fn config_lookup(configs: &[ExpandedConfig]) -> HashMap<&str, &ExpandedConfig> {
    configs
        .iter()
        .map(|config| (config.name.as_str(), config))
        .collect()
}

fn resolve(lookup: &HashMap<&str, &ExpandedConfig>, name: &str) -> Option<ParamMap> {
    lookup.get(name).and_then(|config| config.params.clone())
}
