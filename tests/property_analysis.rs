//! Property tests for the analysis pipeline
//!
//! Ensures the table transformations satisfy their invariants:
//! - aggregation means equal the arithmetic mean of the fold scores
//! - rank rows sum to k*(k+1)/2 regardless of ties
//! - tied values receive equal ranks
//! - optimal selection is deterministic
//! - grid expansion size is the sum of per-map products

use approx::assert_relative_eq;
use comparar::analysis::{calculate_optimal_stats, calculate_stats, rank_values};
use comparar::{
    Direction, ExpandedConfig, Experiment, FamilySpec, ParamGrid, ParamValue, RawResult,
};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Scores in a plausible metric range, including negatives
fn scores(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    vec(-1.0..1.0f64, len)
}

/// A raw results table over small config/metric universes
fn raw_results(max_rows: usize) -> impl Strategy<Value = Vec<RawResult>> {
    vec(
        (0..3usize, 0..3usize, 0..2usize, 0..2usize, -1.0..1.0f64),
        1..max_rows,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(d, c, m, s, score)| {
                RawResult::new(
                    format!("d{d}"),
                    format!("clf_{}", c + 1),
                    format!("method_{}", m + 1),
                    format!("metric_{s}"),
                    score,
                )
            })
            .collect()
    })
}

fn expanded(names: &[&str]) -> Vec<ExpandedConfig> {
    names
        .iter()
        .map(|name| ExpandedConfig {
            name: (*name).to_string(),
            params: None,
        })
        .collect()
}

fn experiment_from(results: Vec<RawResult>) -> Experiment {
    Experiment {
        datasets: vec!["d0".into(), "d1".into(), "d2".into()],
        classifiers: vec![FamilySpec::with_defaults("clf")],
        methods: vec![FamilySpec::with_defaults("method")],
        expanded_classifiers: expanded(&["clf_1", "clf_2", "clf_3"]),
        expanded_methods: expanded(&["method_1", "method_2"]),
        results,
        ..Default::default()
    }
}

// =============================================================================
// Aggregation Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_mean_matches_arithmetic_mean(fold_scores in scores(1..40)) {
        let results: Vec<RawResult> = fold_scores
            .iter()
            .map(|&s| RawResult::new("d1", "clf", "none", "f1", s))
            .collect();
        let stats = calculate_stats(&results);
        prop_assert_eq!(stats.len(), 1);

        let expected = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
        assert_relative_eq!(stats[0].mean_score, expected.abs(), epsilon = 1e-9);
    }

    #[test]
    fn prop_aggregation_key_count(results in raw_results(60)) {
        use std::collections::BTreeSet;
        let keys: BTreeSet<_> = results
            .iter()
            .map(|r| (r.dataset.clone(), r.classifier_config.clone(),
                      r.method_config.clone(), r.metric.clone()))
            .collect();
        let stats = calculate_stats(&results);
        prop_assert_eq!(stats.len(), keys.len());
    }
}

// =============================================================================
// Ranking Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_rank_sum_invariant(values in scores(1..12)) {
        let cells: Vec<Option<f64>> = values.into_iter().map(Some).collect();
        let ranks = rank_values(&cells, Direction::Maximize);
        let k = cells.len();

        let total: f64 = ranks.iter().flatten().sum();
        assert_relative_eq!(total, (k * (k + 1)) as f64 / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn prop_rank_sum_invariant_with_forced_ties(
        values in vec(prop::sample::select(vec![0.1, 0.5, 0.9]), 3..10)
    ) {
        let cells: Vec<Option<f64>> = values.into_iter().map(Some).collect();
        let ranks = rank_values(&cells, Direction::Maximize);
        let k = cells.len();

        let total: f64 = ranks.iter().flatten().sum();
        assert_relative_eq!(total, (k * (k + 1)) as f64 / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn prop_equal_values_get_equal_ranks(
        values in vec(prop::sample::select(vec![0.2, 0.4, 0.6, 0.8]), 2..10)
    ) {
        let cells: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let ranks = rank_values(&cells, Direction::Maximize);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] == values[j] {
                    prop_assert_eq!(ranks[i], ranks[j]);
                }
            }
        }
    }

    #[test]
    fn prop_best_value_gets_rank_one(values in scores(1..10)) {
        let cells: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let ranks = rank_values(&cells, Direction::Maximize);

        let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_idx = values.iter().position(|&v| v == best).unwrap();
        let tied = values.iter().filter(|&&v| v == best).count() as f64;
        // the top group occupies ranks 1..=t, sharing their mean
        assert_relative_eq!(ranks[best_idx].unwrap(), (tied + 1.0) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn prop_direction_reverses_strict_order(values in scores(2..10)) {
        let cells: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let up = rank_values(&cells, Direction::Maximize);
        let down = rank_values(&cells, Direction::Minimize);
        let k = cells.len() as f64;
        for i in 0..cells.len() {
            // with or without ties, ranks mirror around (k+1)/2
            assert_relative_eq!(
                up[i].unwrap() + down[i].unwrap(),
                k + 1.0,
                epsilon = 1e-9
            );
        }
    }
}

// =============================================================================
// Optimal Selection Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_optimal_selection_deterministic(results in raw_results(60)) {
        let experiment = experiment_from(results);
        let first = calculate_optimal_stats(&experiment, false).unwrap();
        let second = calculate_optimal_stats(&experiment, false).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_optimal_mean_is_max_signed_mean(fold_scores in scores(2..20)) {
        // two expanded configs split the scores between them
        let results: Vec<RawResult> = fold_scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                RawResult::new("d0", format!("clf_{}", i % 2 + 1), "method_1", "f1", s)
            })
            .collect();
        let experiment = experiment_from(results.clone());
        let optimal = calculate_optimal_stats(&experiment, false).unwrap();
        prop_assert_eq!(optimal.len(), 1);

        let signed_mean = |config: &str| {
            let group: Vec<f64> = results
                .iter()
                .filter(|r| r.classifier_config == config)
                .map(|r| r.score)
                .collect();
            group.iter().sum::<f64>() / group.len() as f64
        };
        let best = signed_mean("clf_1").max(signed_mean("clf_2"));
        assert_relative_eq!(optimal[0].mean_score, best.abs(), epsilon = 1e-9);
    }
}

// =============================================================================
// Grid Expansion Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_expansion_size_is_product(lens in vec(1..4usize, 1..4)) {
        let mut grid_map = std::collections::BTreeMap::new();
        for (i, len) in lens.iter().enumerate() {
            grid_map.insert(
                format!("p{i}"),
                (0..*len as i64).map(ParamValue::Int).collect::<Vec<_>>(),
            );
        }
        let grid = ParamGrid::new().with(grid_map);
        let expected: usize = lens.iter().product();
        prop_assert_eq!(grid.expand().len(), expected);
    }
}
