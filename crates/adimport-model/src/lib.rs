//! Core data model for bulk ad-platform imports: cell values, tabular data,
//! target schemas, field mappings, and validation/import results.

pub mod cell;
pub mod error;
pub mod import;
pub mod mapping;
pub mod schema;
pub mod schema_file;
pub mod table;
pub mod validation;

pub use cell::CellValue;
pub use error::{ModelError, Result};
pub use import::{ImportResult, RowError};
pub use mapping::{FieldMapping, MappedRecord};
pub use schema::{FieldDef, FieldType, ImportKind, TargetSchema, ValueRange};
pub use schema_file::{SchemaOverrides, load_schema_overrides, parse_schema_overrides};
pub use table::TabularData;
pub use validation::{IssueKind, ValidationIssue, ValidationResult, ValidationSummary};
