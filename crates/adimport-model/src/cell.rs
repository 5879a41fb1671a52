use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of imported tabular data.
///
/// CSV parsing produces `Text` and `Null` cells only; JSON parsing maps
/// scalars onto the matching variant. Variant order matters for untagged
/// deserialization: JSON `null` must match `Null` before anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// An empty cell is `Null` or text that is blank after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }

    /// Numeric coercion: numbers pass through, booleans become 1/0, and
    /// text is accepted when it parses as a finite-or-infinite float
    /// (`NaN` spellings are rejected).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            CellValue::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) if !value.is_nan() => Some(value),
                _ => None,
            },
            CellValue::Null => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Human-readable variant name, used in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CellValue::Null => "empty",
            CellValue::Bool(_) => "a boolean",
            CellValue::Number(_) => "a number",
            CellValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(flag) => write!(f, "{flag}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(flag: bool) -> Self {
        CellValue::Bool(flag)
    }
}
