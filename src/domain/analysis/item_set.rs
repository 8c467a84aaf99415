//! Item Set - Ordered, duplicate-free names of criteria or alternatives.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::AnalysisError;

/// An ordered sequence of unique, non-empty names.
///
/// Positions in the set are the indices used by `PairwiseMatrix`,
/// `ValueMatrix` rows/columns, and weight vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemSet(Vec<String>);

impl ItemSet {
    /// Creates an item set, rejecting empty sets, blank names and duplicates.
    pub fn new(names: Vec<impl Into<String>>) -> Result<Self, AnalysisError> {
        let names: Vec<String> = names.into_iter().map(|n| n.into().trim().to_string()).collect();

        if names.is_empty() {
            return Err(AnalysisError::invalid_item_set("at least one item is required"));
        }

        let mut seen = HashSet::new();
        for name in &names {
            if name.is_empty() {
                return Err(AnalysisError::invalid_item_set("item names cannot be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(AnalysisError::invalid_item_set(format!(
                    "duplicate item '{}'",
                    name
                )));
            }
        }

        Ok(Self(names))
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `new` rejects empty sets, so this is false for any constructed set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the names in input order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Returns the name at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Returns the position of `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    /// Like `index_of`, failing with `InvalidItemSet` for unknown names.
    pub fn require_index(&self, name: &str) -> Result<usize, AnalysisError> {
        self.index_of(name)
            .ok_or_else(|| AnalysisError::invalid_item_set(format!("unknown item '{}'", name)))
    }

    /// Checks the set is large enough for pairwise comparisons (n >= 2).
    pub fn ensure_comparable(&self) -> Result<(), AnalysisError> {
        if self.len() < 2 {
            return Err(AnalysisError::invalid_item_set(
                "at least two items are required before comparisons can be entered",
            ));
        }
        Ok(())
    }

    /// Iterates over the names in input order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for ItemSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        ItemSet::new(names).map_err(serde::de::Error::custom)
    }
}
