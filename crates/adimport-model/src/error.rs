use std::path::PathBuf;

use crate::schema::ImportKind;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema file: {message}")]
    TomlParse { message: String },

    #[error("unknown import kind in schema file: {kind}")]
    UnknownKind { kind: String },

    #[error("schema for {kind} defines no fields")]
    EmptyKind { kind: ImportKind },

    #[error("schema for {kind} contains a field with an empty name")]
    EmptyFieldName { kind: ImportKind },

    #[error("schema for {kind} defines field {field} more than once")]
    DuplicateField { kind: ImportKind, field: String },

    #[error("field {field} declares only one of min/max; ranges need both")]
    IncompleteRange { field: String },

    #[error("field {field} declares an empty range ({min} > {max})")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("field {field} declares a range but is not a number field")]
    RangeOnNonNumeric { field: String },
}

impl ModelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
