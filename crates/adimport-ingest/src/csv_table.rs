use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use adimport_model::{CellValue, TabularData};

use crate::error::{IngestError, Result};

/// Collapse runs of whitespace and strip a UTF-8 BOM from a header cell.
fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into `TabularData`.
///
/// The first non-blank record is the header row; everything after it is
/// data. Blank records are skipped, ragged rows are padded to the header
/// width with nulls, and cells beyond it are dropped.
pub fn read_csv_table(path: &Path) -> Result<TabularData> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let data = parse_csv(BufReader::new(file)).map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        columns = data.headers.len(),
        rows = data.total_rows,
        "csv table loaded"
    );
    Ok(data)
}

pub fn parse_csv<R: Read>(input: R) -> std::result::Result<TabularData, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        records.push(row);
    }

    let Some((header_row, data_rows)) = records.split_first() else {
        return Ok(TabularData::empty());
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();

    let mut rows = Vec::with_capacity(data_rows.len());
    for record in data_rows {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(match record.get(idx) {
                Some(value) if !value.is_empty() => CellValue::Text(value.clone()),
                _ => CellValue::Null,
            });
        }
        rows.push(row);
    }
    Ok(TabularData::new(headers, rows))
}
