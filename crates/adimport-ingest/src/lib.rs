//! Table ingestion for bulk imports: CSV and JSON files become
//! `TabularData` with normalized headers and typed cells.

pub mod csv_table;
pub mod error;
pub mod format;
pub mod json_table;

pub use csv_table::{parse_csv, read_csv_table};
pub use error::{IngestError, JsonShapeError, Result};
pub use format::{TableFormat, read_table};
pub use json_table::{read_json_table, table_from_json_value};
