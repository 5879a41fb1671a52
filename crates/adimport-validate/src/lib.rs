//! Table validation for bulk imports.
//!
//! A [`Validator`] checks `TabularData` against one `TargetSchema`:
//! required columns and values, cell types, and numeric bounds. Validation
//! never touches the field mapping; it sees raw headers only.

pub mod rules;
pub mod validator;

pub use rules::{check_type, expected_range, expected_type, infer_field_type, is_date_text};
pub use validator::Validator;
