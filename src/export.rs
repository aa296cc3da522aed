//! Key/value dump of a single record for the spreadsheet export. Writing the
//! workbook is left to the caller.

use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub key: String,
    pub value: String,
}

/// Depth-first flattening: objects become `a.b`, arrays `a[0]`, null an empty cell.
pub fn flatten_record<T: Serialize>(record: &T) -> Result<Vec<ExportRow>, serde_json::Error> {
    let value = serde_json::to_value(record)?;
    let mut rows = Vec::new();
    flatten_into(&mut rows, String::new(), &value);
    Ok(rows)
}

fn flatten_into(rows: &mut Vec<ExportRow>, path: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let child = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", path, k)
                };
                flatten_into(rows, child, v);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_into(rows, format!("{}[{}]", path, i), v);
            }
        }
        Value::Null => rows.push(ExportRow {
            key: path,
            value: String::new(),
        }),
        Value::String(s) => rows.push(ExportRow {
            key: path,
            value: s.clone(),
        }),
        other => rows.push(ExportRow {
            key: path,
            value: other.to_string(),
        }),
    }
}
