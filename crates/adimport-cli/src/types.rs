use std::path::PathBuf;

use serde::Serialize;

use adimport_map::MappingResult;
use adimport_model::{FieldMapping, ImportKind, ImportResult, ValidationResult};

/// Everything the check stage learned about one input file.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub kind: ImportKind,
    pub source: PathBuf,
    pub rows: usize,
    /// Engine output: scored suggestions plus the headers left unmapped.
    pub suggestions: MappingResult,
    /// The mapping the import would use: the suggestions, unless a mapping
    /// file replaced them.
    pub mapping: FieldMapping,
    /// Mapping-file targets that named no schema field and were dropped.
    pub dropped_targets: Vec<String>,
    pub validation: ValidationResult,
}

/// Outcome of an import run, including the check that preceded it.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    #[serde(flatten)]
    pub check: CheckReport,
    /// True when validation errors blocked the import.
    pub gated: bool,
    pub output: Option<PathBuf>,
    /// Absent when the import was gated or run with --dry-run.
    pub import: Option<ImportResult>,
}
