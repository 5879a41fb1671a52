use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// What a validation issue is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// A required column or value is missing.
    Required,
    /// A cell does not match the expected field type.
    Type,
    /// A cell is malformed for its format.
    Format,
    /// A numeric value falls outside the expected bounds.
    Range,
    /// A value appears more than once where it should be unique.
    Duplicate,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Required => "required",
            IssueKind::Type => "type",
            IssueKind::Format => "format",
            IssueKind::Range => "range",
            IssueKind::Duplicate => "duplicate",
        }
    }
}

/// One problem found during validation.
///
/// `row` is 1-based for data rows; row 0 marks header-level issues such as
/// a missing required column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row: usize,
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CellValue>,
    pub message: String,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn new(
        row: usize,
        column: impl Into<String>,
        message: impl Into<String>,
        kind: IssueKind,
    ) -> Self {
        Self {
            row,
            column: column.into(),
            value: None,
            message: message.into(),
            kind,
        }
    }

    pub fn with_value(mut self, value: CellValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is_header_level(&self) -> bool {
        self.row == 0
    }
}

/// Aggregate counts over one validation pass.
///
/// `invalid_rows` counts Required-kind errors, not distinct rows; a row
/// missing two required values contributes twice, and header-level issues
/// count as well. `valid_rows` is the saturating complement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

/// Output of a validation pass. Validation is fail-soft: all issues for the
/// whole table are collected, never just the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// Assemble a result and derive its summary. Issue order is preserved.
    pub fn from_issues(
        total_rows: usize,
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationIssue>,
    ) -> Self {
        let invalid_rows = errors
            .iter()
            .filter(|issue| issue.kind == IssueKind::Required)
            .count();
        let summary = ValidationSummary {
            total_rows,
            valid_rows: total_rows.saturating_sub(invalid_rows),
            invalid_rows,
            error_count: errors.len(),
            warning_count: warnings.len(),
        };
        Self {
            errors,
            warnings,
            summary,
        }
    }

    /// True when no errors were found. Warnings do not affect validity.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
