//! Record filters
//!
//! A filter is a list of `field → value` conditions.
//!
//! Matching rules:
//! - `id` is compared with exact equality (lookups by id must not hit
//!   ids that merely contain the requested one)
//! - every other field matches when its string value contains the
//!   condition value (case-sensitive)
//! - a field that is missing or not a string never matches
//! - conditions are combined with AND unless the filter is built with
//!   [`MatchMode::Any`]
//! - a filter with no conditions matches every record

use serde_json::Value;

use super::record::{Record, ID_FIELD};

/// How the conditions of a filter are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Every condition must hold
    #[default]
    All,

    /// At least one condition must hold
    Any,
}

/// Field conditions used by `Database::select`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
    mode: MatchMode,
}

impl Filter {
    /// Create an empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on an exact id
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().field(ID_FIELD, id)
    }

    /// Add a condition
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((name.into(), value.into()));
        self
    }

    /// Set how conditions are combined
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Check a record against this filter
    pub fn matches(&self, record: &Record) -> bool {
        if self.conditions.is_empty() {
            return true;
        }

        let mut results = self
            .conditions
            .iter()
            .map(|(field, expected)| field_matches(record, field, expected));

        match self.mode {
            MatchMode::All => results.all(|hit| hit),
            MatchMode::Any => results.any(|hit| hit),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Filter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Filter::new(), |filter, (k, v)| filter.field(k, v))
    }
}

fn field_matches(record: &Record, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(Value::String(actual)) if field == ID_FIELD => actual == expected,
        Some(Value::String(actual)) => actual.contains(expected),
        _ => false,
    }
}
