use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// A row that failed submission, with enough context to retry it by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based data row number.
    pub row: usize,
    pub row_data: Vec<CellValue>,
    pub message: String,
}

/// Outcome of one import run.
///
/// `imported + failed + skipped` covers every data row: `failed` rows were
/// submitted and rejected, `skipped` rows were never attempted because the
/// run was cancelled first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
    pub created_ids: Vec<String>,
}

impl ImportResult {
    /// True when no submitted row was rejected. Rows skipped by
    /// cancellation do not count against success; callers that care check
    /// `skipped` directly.
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    pub fn attempted(&self) -> usize {
        self.imported + self.failed
    }
}
