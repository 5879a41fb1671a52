//! Import engine for mapped tabular data.
//!
//! The [`Importer`] walks rows strictly in order, applies a `FieldMapping`
//! to build each record, and submits through a [`RecordSink`]. Failures
//! are per-row, cancellation is cooperative, and the partial
//! `ImportResult` is always returned.

pub mod cancel;
pub mod importer;
pub mod sink;

pub use cancel::CancelFlag;
pub use importer::{ImportProgress, Importer};
pub use sink::{JsonlSink, MemorySink, RecordSink};
