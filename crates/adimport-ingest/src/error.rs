use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported table shape in {path}: {source}")]
    Shape {
        path: PathBuf,
        #[source]
        source: JsonShapeError,
    },

    #[error("unsupported file extension: {path} (expected .csv or .json)")]
    UnsupportedExtension { path: PathBuf },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A JSON document that is syntactically valid but not a flat array of
/// records.
#[derive(Debug, thiserror::Error)]
pub enum JsonShapeError {
    #[error("top-level value is not an array")]
    NotAnArray,

    #[error("row {row} is not an object")]
    RowNotObject { row: usize },

    #[error("row {row} field {key} holds a nested value; only scalars are supported")]
    Nested { row: usize, key: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
