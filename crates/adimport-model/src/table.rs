use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Parsed tabular data: one ordered header row plus row-major cells.
///
/// Every row holds exactly `headers.len()` cells; ingestion pads short rows
/// with `CellValue::Null` and drops cells beyond the header width.
/// `total_rows` mirrors `rows.len()` and is carried separately so result
/// summaries and progress reporting agree on the denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub total_rows: usize,
}

impl TabularData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let total_rows = rows.len();
        Self {
            headers,
            rows,
            total_rows,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, matched exactly.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|candidate| candidate == header)
    }

    /// Cell at (row, column), where rows are zero-indexed. Missing trailing
    /// cells read as `Null` even if a ragged row slipped past ingestion.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        const NULL: &CellValue = &CellValue::Null;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(NULL)
    }
}
