//! Fail-soft table validation.
//!
//! One pass collects every issue in the table instead of stopping at the
//! first: header-level checks come first (reported as row 0), then rows in
//! order, columns in header order within each row. Errors block an import
//! unless forced; warnings never do.

use adimport_model::{
    CellValue, IssueKind, TabularData, TargetSchema, ValidationIssue, ValidationResult,
};

use crate::rules::{check_type, expected_range, expected_type};

/// Validates `TabularData` against one target schema.
pub struct Validator<'a> {
    schema: &'a TargetSchema,
}

impl<'a> Validator<'a> {
    pub fn new(schema: &'a TargetSchema) -> Self {
        Self { schema }
    }

    pub fn validate(&self, data: &TabularData) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        self.check_required_columns(data, &mut errors);
        for (index, row) in data.rows.iter().enumerate() {
            self.check_row(index + 1, &data.headers, row, &mut errors, &mut warnings);
        }

        ValidationResult::from_issues(data.total_rows, errors, warnings)
    }

    /// Every required field must appear verbatim among the headers. The
    /// match is exact: a renamed column is the mapping layer's concern, not
    /// a substitute for the schema's own name.
    fn check_required_columns(&self, data: &TabularData, errors: &mut Vec<ValidationIssue>) {
        for field in self.schema.required_fields() {
            if !data.headers.iter().any(|header| header == &field.name) {
                errors.push(ValidationIssue::new(
                    0,
                    field.name.clone(),
                    format!("Missing required column {}", field.name),
                    IssueKind::Required,
                ));
            }
        }
    }

    fn check_row(
        &self,
        row_number: usize,
        headers: &[String],
        row: &[CellValue],
        errors: &mut Vec<ValidationIssue>,
        warnings: &mut Vec<ValidationIssue>,
    ) {
        for (column, header) in headers.iter().enumerate() {
            let cell = row.get(column).unwrap_or(&CellValue::Null);

            if cell.is_empty() {
                if self
                    .schema
                    .field(header)
                    .is_some_and(|field| field.required)
                {
                    errors.push(ValidationIssue::new(
                        row_number,
                        header.clone(),
                        "Missing required value",
                        IssueKind::Required,
                    ));
                }
                continue;
            }

            let expected = expected_type(self.schema, header);
            match check_type(cell, expected) {
                Ok(()) => {
                    if let Some(range) = expected_range(self.schema, header)
                        && let Some(value) = cell.as_number()
                        && !range.contains(value)
                    {
                        warnings.push(
                            ValidationIssue::new(
                                row_number,
                                header.clone(),
                                format!("Value {value} is outside the expected range {range}"),
                                IssueKind::Range,
                            )
                            .with_value(cell.clone()),
                        );
                    }
                }
                Err(message) => {
                    errors.push(
                        ValidationIssue::new(row_number, header.clone(), message, IssueKind::Type)
                            .with_value(cell.clone()),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use adimport_model::{FieldDef, ImportKind};

    use super::*;

    fn table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> TabularData {
        TabularData::new(
            headers.iter().map(|header| (*header).to_string()).collect(),
            rows,
        )
    }

    #[test]
    fn missing_required_column_is_a_header_level_error() {
        let schema = TargetSchema::new(
            ImportKind::Budgets,
            vec![FieldDef::number("budget").required()],
        );
        let data = table(&["name"], vec![vec![CellValue::from("x")]]);

        let result = Validator::new(&schema).validate(&data);
        assert_eq!(result.errors.len(), 1);
        let issue = &result.errors[0];
        assert_eq!(issue.row, 0);
        assert_eq!(issue.column, "budget");
        assert_eq!(issue.kind, IssueKind::Required);
        assert!(issue.is_header_level());
    }

    #[test]
    fn required_column_match_is_exact() {
        let schema = TargetSchema::new(
            ImportKind::Budgets,
            vec![FieldDef::number("budget").required()],
        );
        let data = table(&["Budget"], vec![vec![CellValue::Number(10.0)]]);

        let result = Validator::new(&schema).validate(&data);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 0);
    }

    #[test]
    fn empty_required_cells_error_per_row() {
        let schema = TargetSchema::new(
            ImportKind::Campaigns,
            vec![FieldDef::text("name").required()],
        );
        let data = table(
            &["name"],
            vec![
                vec![CellValue::from("Spring Launch")],
                vec![CellValue::Null],
                vec![CellValue::from("   ")],
            ],
        );

        let result = Validator::new(&schema).validate(&data);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].row, 2);
        assert_eq!(result.errors[1].row, 3);
        assert_eq!(result.summary.invalid_rows, 2);
        assert_eq!(result.summary.valid_rows, 1);
    }

    #[test]
    fn optional_empty_cells_are_fine() {
        let schema = TargetSchema::new(ImportKind::Campaigns, vec![FieldDef::text("status")]);
        let data = table(&["status"], vec![vec![CellValue::Null]]);

        let result = Validator::new(&schema).validate(&data);
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn issues_keep_table_order() {
        let schema = TargetSchema::new(
            ImportKind::Campaigns,
            vec![
                FieldDef::text("name").required(),
                FieldDef::number("budget").required(),
            ],
        );
        let data = table(
            &["name", "budget"],
            vec![
                vec![CellValue::Null, CellValue::from("abc")],
                vec![CellValue::Null, CellValue::Null],
            ],
        );

        let result = Validator::new(&schema).validate(&data);
        let positions: Vec<(usize, &str)> = result
            .errors
            .iter()
            .map(|issue| (issue.row, issue.column.as_str()))
            .collect();
        assert_eq!(
            positions,
            vec![(1, "name"), (1, "budget"), (2, "name"), (2, "budget")]
        );
    }
}
