//! Field typing and value-checking rules.
//!
//! The schema's field table is the source of truth for type and range.
//! Headers that name no schema field fall back to substring inference, so
//! unmapped spreadsheet columns still get sensible checks. Inference is a
//! plain substring scan: "sizeable_campaign" counts as numeric because it
//! contains "size".

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use adimport_model::{CellValue, FieldType, TargetSchema, ValueRange};

const NUMBER_HINTS: [&str; 4] = ["budget", "amount", "bid", "size"];
const DATE_HINTS: [&str; 4] = ["start_date", "end_date", "created_at", "updated_at"];

const BUDGET_RANGE: ValueRange = ValueRange::new(0.0, 1_000_000.0);
const BID_RANGE: ValueRange = ValueRange::new(0.0, 100.0);

const DATE_ONLY_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Infer a field type from a header name alone. Number hints win over date
/// hints when a header contains both.
pub fn infer_field_type(header: &str) -> FieldType {
    let lowered = header.to_lowercase();
    if NUMBER_HINTS.iter().any(|hint| lowered.contains(hint)) {
        return FieldType::Number;
    }
    if DATE_HINTS.iter().any(|hint| lowered.contains(hint)) {
        return FieldType::Date;
    }
    FieldType::Text
}

/// Expected type for a column: the declared field type when the header
/// names a schema field, substring inference otherwise.
pub fn expected_type(schema: &TargetSchema, header: &str) -> FieldType {
    match schema.field(header) {
        Some(field) => field.field_type,
        None => infer_field_type(header),
    }
}

/// Expected numeric bounds for a column. A schema field's declared range
/// wins; a declared field without one suppresses the fallback entirely.
pub fn expected_range(schema: &TargetSchema, header: &str) -> Option<ValueRange> {
    if let Some(field) = schema.field(header) {
        return field.range;
    }
    inferred_range(header)
}

/// Fallback bounds for headers outside the schema. Budget and amount
/// columns take the budget range even when the header also mentions a bid.
pub fn inferred_range(header: &str) -> Option<ValueRange> {
    let lowered = header.to_lowercase();
    if lowered.contains("budget") || lowered.contains("amount") {
        Some(BUDGET_RANGE)
    } else if lowered.contains("bid") {
        Some(BID_RANGE)
    } else {
        None
    }
}

/// Check a non-empty cell against an expected type. Returns the message for
/// a type-kind issue on failure.
///
/// Text fields take only text cells; numeric-looking strings still count as
/// text. Number fields accept numbers, booleans, and parseable text. Date
/// fields accept recognized date text and raw numbers (epoch timestamps),
/// but never booleans.
pub fn check_type(cell: &CellValue, expected: FieldType) -> Result<(), String> {
    match expected {
        FieldType::Text => match cell {
            CellValue::Text(_) | CellValue::Null => Ok(()),
            other => Err(format!("Expected a text value, got {}", other.kind_name())),
        },
        FieldType::Number => {
            if cell.as_number().is_some() {
                Ok(())
            } else {
                Err(format!("Expected a numeric value, got '{cell}'"))
            }
        }
        FieldType::Date => match cell {
            CellValue::Number(_) | CellValue::Null => Ok(()),
            CellValue::Text(text) => {
                if is_date_text(text) {
                    Ok(())
                } else {
                    Err(format!("Expected a date value, got '{}'", text.trim()))
                }
            }
            CellValue::Bool(_) => Err("Expected a date value, got a boolean".to_string()),
        },
    }
}

/// Accepts RFC 3339, `T`- and space-separated datetimes, and the common
/// date-only layouts (ISO, slashed ISO, US).
pub fn is_date_text(text: &str) -> bool {
    let trimmed = text.trim();
    if DateTime::parse_from_rfc3339(trimmed).is_ok() {
        return true;
    }
    if DATETIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(trimmed, format).is_ok())
    {
        return true;
    }
    DATE_ONLY_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(trimmed, format).is_ok())
}
