//! Schema overrides loaded from a TOML file.
//!
//! A schema file replaces the built-in field table wholesale for each kind
//! it names; kinds it does not name keep their built-ins. Example:
//!
//! ```toml
//! [kinds.campaigns]
//! fields = [
//!     { name = "name", required = true },
//!     { name = "budget", required = true, type = "number", min = 0.0, max = 50000.0 },
//!     { name = "launch_date", type = "date" },
//! ]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ModelError, Result};
use crate::schema::{FieldDef, FieldType, ImportKind, TargetSchema, ValueRange};

#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    kinds: BTreeMap<String, KindOverride>,
}

#[derive(Debug, Deserialize)]
struct KindOverride {
    fields: Vec<FieldOverride>,
}

#[derive(Debug, Deserialize)]
struct FieldOverride {
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(rename = "type", default)]
    field_type: Option<FieldType>,
    min: Option<f64>,
    max: Option<f64>,
}

/// Validated per-kind schema replacements.
#[derive(Debug, Clone, Default)]
pub struct SchemaOverrides {
    schemas: BTreeMap<ImportKind, TargetSchema>,
}

impl SchemaOverrides {
    pub fn get(&self, kind: ImportKind) -> Option<&TargetSchema> {
        self.schemas.get(&kind)
    }

    /// The effective schema for a kind: the override if present, otherwise
    /// the built-in.
    pub fn schema_for(&self, kind: ImportKind) -> TargetSchema {
        self.schemas
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| TargetSchema::builtin(kind))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

pub fn load_schema_overrides(path: &Path) -> Result<SchemaOverrides> {
    let contents = fs::read_to_string(path).map_err(|e| ModelError::io(path, e))?;
    parse_schema_overrides(&contents)
}

pub fn parse_schema_overrides(source: &str) -> Result<SchemaOverrides> {
    let file: SchemaFile = toml::from_str(source).map_err(|e| ModelError::TomlParse {
        message: e.to_string(),
    })?;

    let mut schemas = BTreeMap::new();
    for (kind_name, overrides) in file.kinds {
        let kind: ImportKind = kind_name
            .parse()
            .map_err(|_| ModelError::UnknownKind { kind: kind_name })?;
        schemas.insert(kind, build_schema(kind, overrides.fields)?);
    }
    Ok(SchemaOverrides { schemas })
}

fn build_schema(kind: ImportKind, fields: Vec<FieldOverride>) -> Result<TargetSchema> {
    if fields.is_empty() {
        return Err(ModelError::EmptyKind { kind });
    }

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut defs = Vec::with_capacity(fields.len());
    for field in fields {
        let name = field.name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyFieldName { kind });
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(ModelError::DuplicateField { kind, field: name });
        }

        let field_type = field.field_type.unwrap_or(FieldType::Text);
        let range = match (field.min, field.max) {
            (Some(min), Some(max)) => {
                if field_type != FieldType::Number {
                    return Err(ModelError::RangeOnNonNumeric { field: name });
                }
                if min > max {
                    return Err(ModelError::InvalidRange {
                        field: name,
                        min,
                        max,
                    });
                }
                Some(ValueRange::new(min, max))
            }
            (None, None) => None,
            _ => return Err(ModelError::IncompleteRange { field: name }),
        };

        let mut def = FieldDef::new(name, field_type);
        def.required = field.required;
        def.range = range;
        defs.push(def);
    }
    Ok(TargetSchema::new(kind, defs))
}
