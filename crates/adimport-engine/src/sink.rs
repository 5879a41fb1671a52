//! Record sinks: where mapped records go when they are submitted.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sha2::{Digest, Sha256};

use adimport_model::MappedRecord;

/// Destination for mapped records. One call per row; a successful call
/// returns the created record's id.
///
/// Implementations report per-record failures through the `Result`; the
/// importer treats each failure as that row's outcome and moves on.
pub trait RecordSink {
    fn submit(&mut self, record: &MappedRecord) -> Result<String>;
}

/// In-memory sink with scriptable failures.
///
/// `failing_on` takes 1-based submission ordinals that should fail, which
/// makes partial-failure behavior easy to stage in tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<MappedRecord>,
    fail_on: BTreeSet<usize>,
    calls: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(ordinals: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_on: ordinals.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[MappedRecord] {
        &self.records
    }

    /// Total submissions seen, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl RecordSink for MemorySink {
    fn submit(&mut self, record: &MappedRecord) -> Result<String> {
        self.calls += 1;
        if self.fail_on.contains(&self.calls) {
            bail!("submission {} rejected", self.calls);
        }
        self.records.push(record.clone());
        Ok(format!("mem-{:04}", self.calls))
    }
}

/// Sink that appends records to a JSON Lines file.
///
/// Each line is `{"id": ..., "fields": {...}}`. Ids are derived from the
/// record content plus its submission ordinal, so identical rows still get
/// distinct ids.
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl JsonlSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("create output file {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and return the number of records written.
    pub fn finish(mut self) -> Result<u64> {
        self.writer
            .flush()
            .with_context(|| format!("flush output file {}", self.path.display()))?;
        Ok(self.written)
    }
}

impl RecordSink for JsonlSink {
    fn submit(&mut self, record: &MappedRecord) -> Result<String> {
        let payload = serde_json::to_string(record).context("serialize record")?;
        let id = record_id(&payload, self.written);
        let line = serde_json::json!({ "id": id, "fields": record });
        writeln!(self.writer, "{line}")
            .with_context(|| format!("write record to {}", self.path.display()))?;
        self.written += 1;
        Ok(id)
    }
}

fn record_id(payload: &str, ordinal: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(ordinal.to_be_bytes());
    let digest = hasher.finalize();
    format!("imp-{}", hex::encode(&digest[..8]))
}

#[cfg(test)]
mod tests {
    use adimport_model::CellValue;

    use super::*;

    fn record(pairs: &[(&str, &str)]) -> MappedRecord {
        pairs
            .iter()
            .map(|(field, value)| ((*field).to_string(), CellValue::from(*value)))
            .collect()
    }

    #[test]
    fn memory_sink_fails_on_scripted_ordinals() {
        let mut sink = MemorySink::failing_on([2]);
        let row = record(&[("name", "a")]);

        assert!(sink.submit(&row).is_ok());
        assert!(sink.submit(&row).is_err());
        assert!(sink.submit(&row).is_ok());
        assert_eq!(sink.calls(), 3);
        assert_eq!(sink.records().len(), 2);
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_record() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.jsonl");

        let mut sink = JsonlSink::create(&path).expect("create sink");
        let first = sink.submit(&record(&[("name", "a"), ("budget", "10")])).expect("submit");
        let second = sink.submit(&record(&[("name", "a"), ("budget", "10")])).expect("submit");
        assert_ne!(first, second, "identical rows still get distinct ids");
        assert_eq!(sink.finish().expect("finish"), 2);

        let contents = std::fs::read_to_string(&path).expect("read output");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).expect("valid json");
        assert_eq!(parsed["id"].as_str(), Some(first.as_str()));
        assert_eq!(parsed["fields"]["name"].as_str(), Some("a"));
    }

    #[test]
    fn record_ids_are_stable_for_the_same_payload_and_ordinal() {
        assert_eq!(record_id("x", 0), record_id("x", 0));
        assert_ne!(record_id("x", 0), record_id("x", 1));
        assert!(record_id("x", 0).starts_with("imp-"));
        assert_eq!(record_id("x", 0).len(), 4 + 16);
    }
}
