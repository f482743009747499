//! Family-name resolution against expanded configuration names

use std::collections::BTreeMap;

use regex::Regex;

use crate::analysis::error::{AnalysisError, Result};
use crate::experiment::{ExpandedConfig, FamilySpec};

/// Memoized family -> matching expanded names lookup for one category
/// (classifiers or methods).
///
/// Each declared family name is compiled once as a regular expression
/// and applied with match-at-start semantics: the pattern must match a
/// prefix of the expanded name. Exact equality matches, as does
/// equality plus a suffix such as `_3`. Metacharacters in a family name
/// are interpreted as pattern syntax, not literally; this is a known
/// sharp edge kept for compatibility with existing family declarations.
#[derive(Debug, Clone)]
pub struct NameIndex {
    matches: BTreeMap<String, Vec<String>>,
}

impl NameIndex {
    /// Build the index for one category.
    ///
    /// A family matching zero expanded names gets an empty entry; it
    /// contributes no rows downstream, which is not an error. An
    /// invalid pattern is.
    pub fn build(families: &[FamilySpec], expanded: &[ExpandedConfig]) -> Result<Self> {
        let mut matches = BTreeMap::new();
        for family in families {
            let pattern =
                Regex::new(&format!("^(?:{})", family.name)).map_err(|source| {
                    AnalysisError::InvalidPattern {
                        family: family.name.clone(),
                        source,
                    }
                })?;
            let matched: Vec<String> = expanded
                .iter()
                .filter(|config| pattern.is_match(&config.name))
                .map(|config| config.name.clone())
                .collect();
            matches.insert(family.name.clone(), matched);
        }
        Ok(Self { matches })
    }

    /// Expanded names matching a declared family, in expansion order
    pub fn matches(&self, family: &str) -> &[String] {
        self.matches.get(family).map_or(&[], Vec::as_slice)
    }
}
