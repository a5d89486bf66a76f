//! CSV normalization into [`Record`]s.
//!
//! Header keys are trimmed, cell text is kept as written. Blank lines are
//! skipped, ragged rows are padded or truncated to the header width and rows
//! the reader rejects are logged and dropped.

use crate::error::{FloraError, Result};
use crate::models::Record;
use tracing::{info, warn};

/// Header row plus normalized records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    pub skipped_rows: usize,
}

/// Parse CSV text with a required header row.
pub fn parse_csv_content(content: &str) -> Result<ParsedCsv> {
    if content.trim().is_empty() {
        return Err(FloraError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| FloraError::Csv {
            message: format!("Failed to parse CSV headers: {}", e),
            source: Some(e),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(FloraError::Csv {
            message: "CSV file has no headers".to_string(),
            source: None,
        });
    }

    let mut records = Vec::new();
    let mut skipped_rows = 0;

    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(row) => records.push(normalize_row(&headers, &row)),
            Err(e) => {
                skipped_rows += 1;
                warn!("Skipping malformed CSV row {}: {}", index + 2, e);
            }
        }
    }

    if skipped_rows > 0 {
        info!(
            "CSV parsing complete: {} rows parsed, {} rows skipped",
            records.len(),
            skipped_rows
        );
    }

    Ok(ParsedCsv {
        headers,
        records,
        skipped_rows,
    })
}

/// Zip a row onto the headers: missing cells become "", extra cells are dropped.
fn normalize_row(headers: &[String], row: &csv::StringRecord) -> Record {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| (header.as_str(), row.get(i).unwrap_or("")))
        .collect()
}

/// blake3 digest over headers and every cell, in order.
///
/// Cells are length-prefixed so shifting text between neighbours changes
/// the digest.
pub fn fingerprint(headers: &[String], records: &[Record]) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut write_cell = |cell: &str| {
        hasher.update(&(cell.len() as u64).to_le_bytes());
        hasher.update(cell.as_bytes());
    };

    for header in headers {
        write_cell(header);
    }
    for record in records {
        for header in headers {
            write_cell(record.raw(header).unwrap_or(""));
        }
    }
    hasher.finalize().to_hex().to_string()
}
