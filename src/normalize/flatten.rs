use std::collections::HashMap;

use serde_json::{Map, Value};

/// Column-major view of a list of JSON records.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct RawColumns {
    pub(crate) names: Vec<String>,
    pub(crate) columns: Vec<Vec<Value>>,
    pub(crate) rows: usize,
}

impl RawColumns {
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub(crate) fn rename(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.position(from) {
            self.names[idx] = to.to_string();
        }
    }

    /// Removes a column and returns its values.
    pub(crate) fn take(&mut self, name: &str) -> Option<Vec<Value>> {
        let idx = self.position(name)?;
        self.names.remove(idx);
        Some(self.columns.remove(idx))
    }

    /// Reorders every column by `order` (a permutation of row positions).
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        for column in &mut self.columns {
            *column = order.iter().map(|&i| column[i].clone()).collect();
        }
    }
}

/// Flattens a payload into columns.
///
/// An array yields one row per element, an object a single row. Nested
/// objects become `parent.child` columns; columns keep first-seen order and
/// missing keys are null.
pub(crate) fn flatten_records(payload: &Value) -> RawColumns {
    let records: Vec<Vec<(String, Value)>> = match payload {
        Value::Array(items) => items.iter().map(flatten_record).collect(),
        Value::Null => Vec::new(),
        other => vec![flatten_record(other)],
    };

    let mut out = RawColumns {
        rows: records.len(),
        ..RawColumns::default()
    };
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (row, record) in records.into_iter().enumerate() {
        for (name, value) in record {
            let idx = *positions.entry(name.clone()).or_insert_with(|| {
                out.names.push(name);
                out.columns.push(vec![Value::Null; out.rows]);
                out.columns.len() - 1
            });
            out.columns[idx][row] = value;
        }
    }
    out
}

fn flatten_record(record: &Value) -> Vec<(String, Value)> {
    let mut fields = Vec::new();
    match record {
        Value::Object(map) => flatten_into("", map, &mut fields),
        scalar => fields.push(("value".to_string(), scalar.clone())),
    }
    fields
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => flatten_into(&name, nested, out),
            other => out.push((name, other.clone())),
        }
    }
}
