use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use adimport_model::{CellValue, TabularData};

use crate::error::{IngestError, JsonShapeError, Result};

/// Read a JSON file into `TabularData`.
///
/// The document must be an array of flat objects. Headers are the sorted
/// union of all keys; objects missing a key get a null cell, so ragged
/// records behave exactly like short CSV rows.
pub fn read_json_table(path: &Path) -> Result<TabularData> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let data = table_from_json_value(&value).map_err(|source| IngestError::Shape {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        columns = data.headers.len(),
        rows = data.total_rows,
        "json table loaded"
    );
    Ok(data)
}

pub fn table_from_json_value(value: &Value) -> std::result::Result<TabularData, JsonShapeError> {
    let Value::Array(items) = value else {
        return Err(JsonShapeError::NotAnArray);
    };

    let mut objects = Vec::with_capacity(items.len());
    let mut keys: BTreeSet<&str> = BTreeSet::new();
    for (index, item) in items.iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(JsonShapeError::RowNotObject { row: index + 1 });
        };
        keys.extend(fields.keys().map(String::as_str));
        objects.push(fields);
    }
    let headers: Vec<String> = keys.iter().map(|key| (*key).to_string()).collect();

    let mut rows = Vec::with_capacity(objects.len());
    for (index, fields) in objects.iter().enumerate() {
        let mut row = Vec::with_capacity(headers.len());
        for key in &keys {
            let cell = match fields.get(*key) {
                Some(value) => cell_from_json(value).ok_or_else(|| JsonShapeError::Nested {
                    row: index + 1,
                    key: (*key).to_string(),
                })?,
                None => CellValue::Null,
            };
            row.push(cell);
        }
        rows.push(row);
    }
    Ok(TabularData::new(headers, rows))
}

/// Scalar JSON values map directly onto cells; arrays and objects have no
/// cell representation.
fn cell_from_json(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Null),
        Value::Bool(flag) => Some(CellValue::Bool(*flag)),
        Value::Number(number) => Some(match number.as_f64() {
            Some(float) => CellValue::Number(float),
            None => CellValue::Text(number.to_string()),
        }),
        Value::String(text) => Some(CellValue::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn headers_are_the_sorted_union_of_keys() {
        let data = table_from_json_value(&json!([
            { "name": "Spring Launch", "budget": 1200 },
            { "name": "Brand Push", "platform": "meta" },
        ]))
        .expect("parse json table");
        assert_eq!(data.headers, vec!["budget", "name", "platform"]);
        assert_eq!(data.total_rows, 2);
        assert_eq!(data.cell(0, 0), &CellValue::Number(1200.0));
        assert_eq!(data.cell(0, 2), &CellValue::Null);
        assert_eq!(data.cell(1, 1), &CellValue::from("Brand Push"));
    }

    #[test]
    fn scalars_keep_their_json_types() {
        let data = table_from_json_value(&json!([
            { "active": true, "bid": 2.5, "note": null, "name": "x" },
        ]))
        .expect("parse json table");
        assert_eq!(
            data.rows[0],
            vec![
                CellValue::Bool(true),
                CellValue::Number(2.5),
                CellValue::from("x"),
                CellValue::Null,
            ]
        );
    }

    #[test]
    fn empty_array_is_an_empty_table() {
        let data = table_from_json_value(&json!([])).expect("parse json table");
        assert!(data.headers.is_empty());
        assert!(data.is_empty());
    }

    #[test]
    fn non_array_documents_are_rejected() {
        let err = table_from_json_value(&json!({ "rows": [] })).expect_err("not an array");
        assert!(matches!(err, JsonShapeError::NotAnArray));
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let err = table_from_json_value(&json!([1, 2])).expect_err("row not object");
        assert!(matches!(err, JsonShapeError::RowNotObject { row: 1 }));
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = table_from_json_value(&json!([{ "meta": { "a": 1 } }]))
            .expect_err("nested value");
        assert!(matches!(err, JsonShapeError::Nested { row: 1, key } if key == "meta"));
    }
}
