//! Species table views: filtering, sorting, paging and CSV export.

mod filter;
mod sort;

pub use filter::{FilterValue, Filters};
pub use sort::{SortConfig, SortDirection};

use crate::error::{FloraError, Result};
use crate::models::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A table request from the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub offset: usize,
    /// `None` returns every remaining row.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One page of filtered, sorted rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub columns: Vec<String>,
    pub total_records: usize,
    pub filtered_count: usize,
    pub offset: usize,
    pub rows: Vec<Record>,
}

/// Records passing `filters`, in `sort` order.
pub fn filter_and_sort<'a>(
    records: &'a [Record],
    filters: &Filters,
    sort: &SortConfig,
) -> Vec<&'a Record> {
    let mut view: Vec<&Record> = records.iter().filter(|r| filters.matches(r)).collect();
    sort.sort(&mut view);
    view
}

pub fn query_table(records: &[Record], columns: &[String], query: &TableQuery) -> TablePage {
    let view = filter_and_sort(records, &query.filters, &query.sort);
    let filtered_count = view.len();
    let rows = view
        .into_iter()
        .skip(query.offset)
        .take(query.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    TablePage {
        columns: columns.to_vec(),
        total_records: records.len(),
        filtered_count,
        offset: query.offset,
        rows,
    }
}

/// Distinct non-empty values of `column`, sorted.
pub fn unique_values(records: &[Record], column: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get(column))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Write `records` as CSV with `columns` as the header row.
pub fn export_csv<'a, I>(columns: &[String], records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|c| record.raw(c).unwrap_or("")))?;
    }
    let bytes = writer.into_inner().map_err(|e| FloraError::Csv {
        message: e.to_string(),
        source: None,
    })?;
    String::from_utf8(bytes).map_err(|e| FloraError::Csv {
        message: e.to_string(),
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new().with("GENUS", "Rosa").with("FAMILY", "Rosaceae"),
            Record::new().with("GENUS", "Acer").with("FAMILY", "Sapindaceae"),
            Record::new().with("GENUS", "Prunus").with("FAMILY", "Rosaceae"),
            Record::new().with("GENUS", "").with("FAMILY", "Rosaceae"),
        ]
    }

    fn columns() -> Vec<String> {
        vec!["GENUS".into(), "FAMILY".into()]
    }

    #[test]
    fn test_query_filters_sorts_and_pages() {
        let mut query = TableQuery::default();
        query.filters.set_text("FAMILY", "rosa");
        query.sort.toggle("GENUS");
        query.offset = 1;
        query.limit = Some(1);

        let page = query_table(&records(), &columns(), &query);
        assert_eq!(page.total_records, 4);
        assert_eq!(page.filtered_count, 3);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].raw("GENUS"), Some("Prunus"));
        assert_eq!(page.columns, columns());
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let query = TableQuery {
            offset: 10,
            ..TableQuery::default()
        };
        let page = query_table(&records(), &columns(), &query);
        assert!(page.rows.is_empty());
        assert_eq!(page.filtered_count, 4);
    }

    #[test]
    fn test_unique_values_sorted_non_empty() {
        assert_eq!(
            unique_values(&records(), "GENUS"),
            vec!["Acer", "Prunus", "Rosa"]
        );
        assert_eq!(
            unique_values(&records(), "FAMILY"),
            vec!["Rosaceae", "Sapindaceae"]
        );
        assert!(unique_values(&records(), "HEMISPHERE").is_empty());
    }

    #[test]
    fn test_export_csv_uses_header_order() {
        let data = records();
        let mut filters = Filters::new();
        filters.set_text("GENUS", "a");
        let view = filter_and_sort(&data, &filters, &SortConfig::by("GENUS", SortDirection::Desc));
        let text = export_csv(&columns(), view).unwrap();
        assert_eq!(text, "GENUS,FAMILY\nRosa,Rosaceae\nAcer,Sapindaceae\n");
    }

    #[test]
    fn test_export_quotes_commas() {
        let data = vec![Record::new().with("GENUS", "Rosa").with("FAMILY", "Rosaceae, roses")];
        let text = export_csv(&columns(), &data).unwrap();
        assert_eq!(text, "GENUS,FAMILY\nRosa,\"Rosaceae, roses\"\n");
    }
}
