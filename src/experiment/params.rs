//! Parameter values, grids, and grid expansion

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single resolved hyperparameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Str(String),
    Bool(bool),
}

impl ParamValue {
    /// Get as float (converts int to float if needed)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Resolved hyperparameters of one expanded configuration
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A hyperparameter grid: a list of parameter-name -> candidate-values
/// maps. Expansion is the cartesian product within each map,
/// concatenated across maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    grids: Vec<BTreeMap<String, Vec<ParamValue>>>,
}

impl ParamGrid {
    /// Create an empty grid (expands to a single default configuration)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one parameter-values map to the grid
    pub fn add(&mut self, grid: BTreeMap<String, Vec<ParamValue>>) {
        self.grids.push(grid);
    }

    /// Builder-style variant of [`ParamGrid::add`]
    #[must_use]
    pub fn with(mut self, grid: BTreeMap<String, Vec<ParamValue>>) -> Self {
        self.add(grid);
        self
    }

    /// Expand the grid into every concrete parameter combination
    pub fn expand(&self) -> Vec<ParamMap> {
        if self.grids.is_empty() {
            return vec![ParamMap::new()];
        }
        self.grids
            .iter()
            .flat_map(|grid| {
                let entries: Vec<(&String, &Vec<ParamValue>)> = grid.iter().collect();
                cartesian_product(&entries)
            })
            .collect()
    }
}

fn cartesian_product(entries: &[(&String, &Vec<ParamValue>)]) -> Vec<ParamMap> {
    let Some(((name, values), rest)) = entries.split_first() else {
        return vec![ParamMap::new()];
    };

    let rest_maps = cartesian_product(rest);
    values
        .iter()
        .flat_map(|value| {
            rest_maps.iter().map(move |map| {
                let mut map = map.clone();
                map.insert((*name).clone(), value.clone());
                map
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(pairs: &[(&str, &[ParamValue])]) -> BTreeMap<String, Vec<ParamValue>> {
        pairs
            .iter()
            .map(|(name, values)| ((*name).to_string(), values.to_vec()))
            .collect()
    }

    #[test]
    fn test_empty_grid_expands_to_default() {
        let grid = ParamGrid::new();
        assert_eq!(grid.expand(), vec![ParamMap::new()]);
    }

    #[test]
    fn test_single_map_cartesian_product() {
        let grid = ParamGrid::new().with(grid_of(&[
            ("max_depth", &[ParamValue::Int(3), ParamValue::Int(5)]),
            (
                "criterion",
                &[
                    ParamValue::Str("gini".into()),
                    ParamValue::Str("entropy".into()),
                ],
            ),
        ]));

        let expanded = grid.expand();
        assert_eq!(expanded.len(), 4);
        for params in &expanded {
            assert!(params.contains_key("max_depth"));
            assert!(params.contains_key("criterion"));
        }
    }

    #[test]
    fn test_multiple_maps_concatenate() {
        let grid = ParamGrid::new()
            .with(grid_of(&[(
                "k_neighbors",
                &[ParamValue::Int(3), ParamValue::Int(5)],
            )]))
            .with(grid_of(&[(
                "ratio",
                &[ParamValue::Float(0.5), ParamValue::Float(1.0), ParamValue::Float(2.0)],
            )]));

        // 2 from the first map + 3 from the second
        assert_eq!(grid.expand().len(), 5);
    }

    #[test]
    fn test_param_value_accessors() {
        assert_eq!(ParamValue::Int(7).as_float(), Some(7.0));
        assert_eq!(ParamValue::Float(0.1).as_int(), None);
        assert_eq!(ParamValue::Str("gini".into()).as_str(), Some("gini"));
        assert_eq!(ParamValue::Bool(true).as_float(), None);
    }
}
