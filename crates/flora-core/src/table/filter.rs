//! Column filters for the species table.

use crate::models::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single column filter.
///
/// Deserializes from either a string (text filter) or a list of strings
/// (multi-select), matching what the dashboard sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Selection(Vec<String>),
}

impl FilterValue {
    fn is_active(&self) -> bool {
        match self {
            FilterValue::Text(text) => !text.is_empty(),
            FilterValue::Selection(values) => !values.is_empty(),
        }
    }

    /// Case-insensitive substring test against one cell.
    pub fn matches(&self, cell: &str) -> bool {
        let cell = cell.to_lowercase();
        match self {
            FilterValue::Text(text) => cell.contains(&text.to_lowercase()),
            FilterValue::Selection(values) => values
                .iter()
                .any(|value| cell.contains(&value.to_lowercase())),
        }
    }
}

/// Active filters keyed by column name.
///
/// Inactive entries are never stored, so [`Filters::active_count`] is the
/// number of columns currently constraining the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, FilterValue>",
    into = "IndexMap<String, FilterValue>"
)]
pub struct Filters {
    columns: IndexMap<String, FilterValue>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text filter; an empty string clears the column.
    pub fn set_text(&mut self, column: &str, text: impl Into<String>) {
        self.set(column, FilterValue::Text(text.into()));
    }

    /// Set a multi-select filter; an empty list clears the column.
    pub fn set_selection(&mut self, column: &str, values: Vec<String>) {
        self.set(column, FilterValue::Selection(values));
    }

    /// Add `value` to the column's selection, or remove it if already there.
    ///
    /// A text filter on the column is replaced by a one-value selection.
    pub fn toggle_value(&mut self, column: &str, value: &str) {
        let mut selection = match self.columns.get(column) {
            Some(FilterValue::Selection(values)) => values.clone(),
            _ => Vec::new(),
        };
        if let Some(pos) = selection.iter().position(|v| v == value) {
            selection.remove(pos);
        } else {
            selection.push(value.to_string());
        }
        self.set_selection(column, selection);
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }

    pub fn active_count(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.columns.get(column)
    }

    /// Whether `record` passes every active filter. Missing cells read as "".
    pub fn matches(&self, record: &Record) -> bool {
        self.columns
            .iter()
            .filter(|(_, filter)| filter.is_active())
            .all(|(column, filter)| filter.matches(record.raw(column).unwrap_or("")))
    }

    fn set(&mut self, column: &str, filter: FilterValue) {
        if filter.is_active() {
            self.columns.insert(column.to_string(), filter);
        } else {
            self.columns.shift_remove(column);
        }
    }
}

impl FromIterator<(String, FilterValue)> for Filters {
    fn from_iter<I: IntoIterator<Item = (String, FilterValue)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (column, filter) in iter {
            filters.set(&column, filter);
        }
        filters
    }
}

impl From<IndexMap<String, FilterValue>> for Filters {
    fn from(columns: IndexMap<String, FilterValue>) -> Self {
        columns.into_iter().collect()
    }
}

impl From<Filters> for IndexMap<String, FilterValue> {
    fn from(filters: Filters) -> Self {
        filters.columns
    }
}
