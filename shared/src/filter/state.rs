//! Filter state: the current search text and filter values of a list view

use super::declaration::FilterDeclaration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved key holding the free-text search
pub const SEARCH_KEY: &str = "search";

/// Mapping from filter key to current value.
///
/// Always contains [`SEARCH_KEY`]. An empty value never narrows the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    /// State with only an empty search
    pub fn new() -> Self {
        let mut values = BTreeMap::new();
        values.insert(SEARCH_KEY.to_string(), String::new());
        Self { values }
    }

    /// Empty state with the given filter keys registered
    pub fn with_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut state = Self::new();
        for key in keys {
            state.values.entry(key.into()).or_default();
        }
        state
    }

    /// Empty state for a page's filter declarations
    pub fn for_declarations(declarations: &[FilterDeclaration]) -> Self {
        Self::with_keys(declarations.iter().map(|d| d.key.clone()))
    }

    pub fn search(&self) -> &str {
        self.get(SEARCH_KEY)
    }

    /// Current value of a key; unknown keys read as `""`
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Replace one key in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// New state with one key replaced
    pub fn with_filter(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set(key, value);
        next
    }

    pub fn with_search(&self, value: impl Into<String>) -> Self {
        self.with_filter(SEARCH_KEY, value)
    }

    /// Number of keys, `search` included, with a non-empty value
    pub fn active_count(&self) -> usize {
        self.values.values().filter(|v| !v.is_empty()).count()
    }

    pub fn is_filtering(&self) -> bool {
        self.active_count() > 0
    }

    /// New state with every key reset to `""`
    pub fn cleared(&self) -> Self {
        Self {
            values: self
                .values
                .keys()
                .map(|k| (k.clone(), String::new()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for FilterState {
    fn from(mut values: BTreeMap<String, String>) -> Self {
        values.entry(SEARCH_KEY.to_string()).or_default();
        Self { values }
    }
}

impl From<FilterState> for BTreeMap<String, String> {
    fn from(state: FilterState) -> Self {
        state.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<String, String>>()
            .into()
    }
}
