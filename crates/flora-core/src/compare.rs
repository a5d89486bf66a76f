//! Data density comparison across sources.
//!
//! For each column, every source contributes one stacked bar: either a
//! per-value distribution (few distinct values) or an empty/filled split.

use crate::config::CompareConfig;
use crate::models::{ChartRow, Record};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One column compared across every source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnComparison {
    pub column: String,
    /// One row per source that has the column, named by source label.
    pub rows: Vec<ChartRow>,
    /// Sorted distinct non-empty values across all sources.
    pub unique_values: Vec<String>,
    pub shows_distribution: bool,
    /// Series names in stacking order, "Empty/NA" first.
    pub stack_keys: Vec<String>,
}

/// Records of one source, labelled for display.
#[derive(Debug, Clone, Copy)]
pub struct LabelledRecords<'a> {
    pub label: &'a str,
    pub records: &'a [Record],
}

/// Whether a cell counts as missing for density purposes.
pub fn is_empty_value(value: &str) -> bool {
    CompareConfig::EMPTY_MARKERS.contains(&value) || value.trim().is_empty()
}

/// Header of the first record matching `column`, ignoring case.
fn resolve_column<'a>(records: &'a [Record], column: &str) -> Option<&'a str> {
    records
        .first()?
        .columns()
        .find(|key| key.eq_ignore_ascii_case(column))
}

fn wants_distribution(distinct: usize) -> bool {
    distinct > 1 && distinct <= CompareConfig::MAX_DISTRIBUTION_VALUES
}

fn source_row(label: &str, records: &[Record], key: &str) -> ChartRow {
    let cells: Vec<&str> = records.iter().map(|r| r.raw(key).unwrap_or("")).collect();
    let distinct: IndexSet<&str> = cells.iter().copied().collect();

    let mut row = ChartRow::new(label);
    if wants_distribution(distinct.len()) {
        for cell in cells {
            let bucket = if is_empty_value(cell) {
                CompareConfig::EMPTY_LABEL
            } else {
                cell
            };
            *row.values.entry(bucket.to_string()).or_insert(0) += 1;
        }
    } else {
        let empty = cells.iter().filter(|c| is_empty_value(c)).count();
        row.values
            .insert(CompareConfig::EMPTY_LABEL.to_string(), empty);
        row.values
            .insert(CompareConfig::FILLED_LABEL.to_string(), cells.len() - empty);
    }
    row
}

/// Compare one column across `sources`. Sources without the column are
/// left out of the rows.
pub fn compare_column(sources: &[LabelledRecords<'_>], column: &str) -> ColumnComparison {
    let mut rows = Vec::new();
    let mut values = BTreeSet::new();

    for source in sources {
        let Some(key) = resolve_column(source.records, column) else {
            continue;
        };
        rows.push(source_row(source.label, source.records, key));
        values.extend(
            source
                .records
                .iter()
                .filter_map(|r| r.raw(key))
                .filter(|v| !is_empty_value(v))
                .map(str::to_string),
        );
    }

    let unique_values: Vec<String> = values.into_iter().collect();
    let shows_distribution = wants_distribution(unique_values.len());
    let mut stack_keys = vec![CompareConfig::EMPTY_LABEL.to_string()];
    if shows_distribution {
        stack_keys.extend(unique_values.iter().cloned());
    } else {
        stack_keys.push(CompareConfig::FILLED_LABEL.to_string());
    }

    ColumnComparison {
        column: column.to_string(),
        rows,
        unique_values,
        shows_distribution,
        stack_keys,
    }
}

/// Compare each of `columns`, or [`CompareConfig::DEFAULT_COLUMNS`] when empty.
pub fn compare_columns<S: AsRef<str>>(
    sources: &[LabelledRecords<'_>],
    columns: &[S],
) -> Vec<ColumnComparison> {
    if columns.is_empty() {
        return CompareConfig::DEFAULT_COLUMNS
            .iter()
            .map(|column| compare_column(sources, column))
            .collect();
    }
    columns
        .iter()
        .map(|column| compare_column(sources, column.as_ref()))
        .collect()
}

/// Empty/filled totals of a row, whichever mode produced it.
pub fn density(row: &ChartRow) -> (usize, usize) {
    let empty = row.get(CompareConfig::EMPTY_LABEL);
    let total: usize = row.values.values().sum();
    (empty, total - empty)
}
