//! The import loop: strictly sequential row submission.
//!
//! Rows are mapped and submitted one at a time, in table order, waiting
//! for each submission before starting the next. A failed row is recorded
//! and the loop continues; only cancellation stops it early.

use std::time::Instant;

use tracing::{debug, info, info_span};

use adimport_model::{CellValue, FieldMapping, ImportResult, MappedRecord, RowError, TabularData};

use crate::cancel::CancelFlag;
use crate::sink::RecordSink;

/// Progress after one row has been processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportProgress {
    /// 1-based row number just processed.
    pub row: usize,
    pub total_rows: usize,
    /// `processed / total_rows * 100`.
    pub percent: f64,
}

/// Sequential importer with optional cancellation and progress reporting.
///
/// ```no_run
/// use adimport_engine::{Importer, MemorySink};
/// # let data = adimport_model::TabularData::empty();
/// # let mapping = adimport_model::FieldMapping::new();
/// let mut sink = MemorySink::new();
/// let result = Importer::new()
///     .with_progress(|progress| eprintln!("{:.0}%", progress.percent))
///     .run(&data, &mapping, &mut sink);
/// ```
pub struct Importer<'a> {
    cancel: Option<&'a CancelFlag>,
    progress: Option<Box<dyn FnMut(ImportProgress) + 'a>>,
}

impl<'a> Importer<'a> {
    pub fn new() -> Self {
        Self {
            cancel: None,
            progress: None,
        }
    }

    /// Observe this flag before every submission.
    pub fn with_cancel_flag(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Invoke `callback` after every processed row, success or failure.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ImportProgress) + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Run the import. Only columns present in `mapping` contribute to the
    /// submitted records; a missing trailing cell submits as null. The
    /// partial result is returned even when cancelled.
    pub fn run(
        mut self,
        data: &TabularData,
        mapping: &FieldMapping,
        sink: &mut dyn RecordSink,
    ) -> ImportResult {
        let span = info_span!("import", rows = data.rows.len());
        let _guard = span.enter();
        let started = Instant::now();

        let columns: Vec<(usize, &str)> = data
            .headers
            .iter()
            .enumerate()
            .filter_map(|(index, header)| {
                mapping.target_for(header).map(|target| (index, target))
            })
            .collect();
        debug!(
            mapped_columns = columns.len(),
            unmapped_columns = data.headers.len() - columns.len(),
            "column plan ready"
        );

        let total = data.total_rows.max(1);
        let mut result = ImportResult::default();
        let mut cancelled = false;

        for (index, row) in data.rows.iter().enumerate() {
            let row_number = index + 1;

            if self.cancel.is_some_and(CancelFlag::is_cancelled) {
                debug!(row = row_number, "cancelled before submission");
                cancelled = true;
                break;
            }

            let record = build_record(&columns, row);
            match sink.submit(&record) {
                Ok(id) => {
                    result.imported += 1;
                    result.created_ids.push(id);
                }
                Err(error) => {
                    let message = format!("{error:#}");
                    debug!(row = row_number, error = %message, "row rejected");
                    result.failed += 1;
                    result.errors.push(RowError {
                        row: row_number,
                        row_data: row.clone(),
                        message,
                    });
                }
            }

            if let Some(callback) = self.progress.as_mut() {
                callback(ImportProgress {
                    row: row_number,
                    total_rows: data.total_rows,
                    percent: row_number as f64 / total as f64 * 100.0,
                });
            }
        }

        result.skipped = data.rows.len() - result.imported - result.failed;
        info!(
            imported = result.imported,
            failed = result.failed,
            skipped = result.skipped,
            cancelled,
            duration_ms = started.elapsed().as_millis(),
            "import finished"
        );
        result
    }
}

impl Default for Importer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn build_record(columns: &[(usize, &str)], row: &[CellValue]) -> MappedRecord {
    columns
        .iter()
        .map(|(index, target)| {
            let cell = row.get(*index).cloned().unwrap_or(CellValue::Null);
            ((*target).to_string(), cell)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use adimport_model::FieldMapping;

    use super::*;
    use crate::sink::MemorySink;

    fn mapping(pairs: &[(&str, &str)]) -> FieldMapping {
        let mut mapping = FieldMapping::new();
        for (source, target) in pairs {
            mapping.insert(*source, *target);
        }
        mapping
    }

    fn data(headers: &[&str], rows: Vec<Vec<CellValue>>) -> TabularData {
        TabularData::new(
            headers.iter().map(|header| (*header).to_string()).collect(),
            rows,
        )
    }

    #[test]
    fn unmapped_columns_stay_out_of_the_record() {
        let data = data(
            &["campaign", "internal_notes", "spend"],
            vec![vec![
                CellValue::from("Spring Launch"),
                CellValue::from("do not import"),
                CellValue::from("120"),
            ]],
        );
        let mapping = mapping(&[("campaign", "name"), ("spend", "budget")]);
        let mut sink = MemorySink::new();

        let result = Importer::new().run(&data, &mapping, &mut sink);
        assert!(result.success());
        let record = &sink.records()[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("name"), Some(&CellValue::from("Spring Launch")));
        assert_eq!(record.get("budget"), Some(&CellValue::from("120")));
        assert!(!record.contains_key("internal_notes"));
    }

    #[test]
    fn short_rows_submit_null_for_missing_cells() {
        let data = data(
            &["campaign", "spend"],
            vec![vec![CellValue::from("Spring Launch")]],
        );
        let mapping = mapping(&[("campaign", "name"), ("spend", "budget")]);
        let mut sink = MemorySink::new();

        Importer::new().run(&data, &mapping, &mut sink);
        assert_eq!(sink.records()[0].get("budget"), Some(&CellValue::Null));
    }

    #[test]
    fn empty_table_yields_an_empty_result() {
        let mut sink = MemorySink::new();
        let result = Importer::new().run(
            &TabularData::empty(),
            &FieldMapping::new(),
            &mut sink,
        );
        assert!(result.success());
        assert_eq!(result.attempted(), 0);
        assert_eq!(sink.calls(), 0);
    }
}
