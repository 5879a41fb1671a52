use std::ffi::OsStr;
use std::path::Path;

use adimport_model::TabularData;

use crate::csv_table::read_csv_table;
use crate::error::{IngestError, Result};
use crate::json_table::read_json_table;

/// Supported table file formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Option<TableFormat> {
        let extension = path.extension().and_then(OsStr::to_str)?;
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(TableFormat::Csv),
            "json" => Some(TableFormat::Json),
            _ => None,
        }
    }
}

/// Read any supported table file, dispatching on its extension.
pub fn read_table(path: &Path) -> Result<TabularData> {
    match TableFormat::from_path(path) {
        Some(TableFormat::Csv) => read_csv_table(path),
        Some(TableFormat::Json) => read_json_table(path),
        None => Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}
