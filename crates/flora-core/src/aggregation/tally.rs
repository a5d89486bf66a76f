//! Counting primitives shared by the summary and the chart series.

use crate::config::DashboardConfig;
use crate::models::{ChartDataPoint, Column, CountMap, CrossTab, Record};

/// Count occurrences of each value, keeping first-seen order.
pub fn tally<'a, I>(values: I) -> CountMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = CountMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Tally the non-empty values of one column.
pub fn tally_column(records: &[Record], column: Column) -> CountMap {
    tally(records.iter().filter_map(|r| r.value(column)))
}

/// GENERAL LOCATION when present, otherwise GEOGRAPHIC ORIGIN.
pub fn geographic_source(record: &Record) -> Option<&str> {
    record
        .value(Column::GeneralLocation)
        .or_else(|| record.value(Column::GeographicOrigin))
}

/// Two-level count over `(outer, inner)` pairs.
pub fn cross_tab<'a, I>(pairs: I) -> CrossTab
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut table = CrossTab::new();
    for (outer, inner) in pairs {
        *table
            .entry(outer.to_string())
            .or_default()
            .entry(inner.to_string())
            .or_insert(0) += 1;
    }
    table
}

/// Cross-tab of two columns; a record counts only when both are present.
pub fn cross_tab_columns(records: &[Record], outer: Column, inner: Column) -> CrossTab {
    cross_tab(
        records
            .iter()
            .filter_map(|r| Some((r.value(outer)?, r.value(inner)?))),
    )
}

/// Entries by descending count. Equal counts keep map order.
pub fn sorted_desc(counts: &CountMap) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// The `n` largest entries, without a remainder bucket.
pub fn top_n(counts: &CountMap, n: usize) -> Vec<ChartDataPoint> {
    sorted_desc(counts)
        .into_iter()
        .take(n)
        .map(|(name, value)| ChartDataPoint::new(name, value))
        .collect()
}

/// The `n` largest entries plus one "Other" entry summing the rest.
///
/// "Other" is omitted when nothing falls outside the top `n`.
pub fn top_n_with_other(counts: &CountMap, n: usize) -> Vec<ChartDataPoint> {
    let sorted = sorted_desc(counts);
    let split = n.min(sorted.len());
    let (top, rest) = sorted.split_at(split);

    let mut result: Vec<ChartDataPoint> = top
        .iter()
        .map(|(name, value)| ChartDataPoint::new(*name, *value))
        .collect();

    if !rest.is_empty() {
        let other = rest.iter().map(|(_, value)| value).sum();
        result.push(ChartDataPoint::new(DashboardConfig::OTHER_LABEL, other));
    }

    result
}

/// Integer percentage of `part / total`, rounding halves up.
pub fn rounded_percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * part + total) / (2 * total)) as u32
}
