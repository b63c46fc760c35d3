use polars::prelude::*;
use serde_json::Value;

/// What a column's non-null values turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Int,
    Float,
    Bool,
    Text,
}

/// Numeric reading of a single JSON value. `Err` means "not numeric".
fn as_number(value: &Value, parse_strings: bool) -> Result<Option<Number>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(Number::Int(i))),
            None => n.as_f64().map(|f| Some(Number::Float(f))).ok_or(()),
        },
        Value::String(s) if parse_strings => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else if let Ok(i) = s.parse::<i64>() {
                Ok(Some(Number::Int(i)))
            } else {
                s.parse::<f64>().map(|f| Some(Number::Float(f))).map_err(|_| ())
            }
        }
        _ => Err(()),
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

fn classify(values: &[Value], parse_strings: bool) -> Kind {
    let non_null = || values.iter().filter(|v| !v.is_null());

    if non_null().count() > 0 && non_null().all(Value::is_boolean) {
        return Kind::Bool;
    }

    let mut has_null = false;
    let mut all_int = true;
    for value in values {
        match as_number(value, parse_strings) {
            Ok(Some(Number::Int(_))) => {}
            Ok(Some(Number::Float(_))) => all_int = false,
            Ok(None) => has_null = true,
            Err(()) => return Kind::Text,
        }
    }
    if all_int && !has_null && !values.is_empty() {
        Kind::Int
    } else {
        Kind::Float
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn build(name: &str, values: &[Value], parse_strings: bool) -> Series {
    match classify(values, parse_strings) {
        Kind::Int => {
            let ints: Vec<i64> = values
                .iter()
                .filter_map(|v| match as_number(v, parse_strings) {
                    Ok(Some(Number::Int(i))) => Some(i),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), ints)
        }
        Kind::Float => {
            let floats: Vec<Option<f64>> = values
                .iter()
                .map(|v| {
                    as_number(v, parse_strings)
                        .ok()
                        .flatten()
                        .map(Number::as_f64)
                })
                .collect();
            Series::new(name.into(), floats)
        }
        Kind::Bool => {
            let bools: Vec<Option<bool>> = values.iter().map(Value::as_bool).collect();
            Series::new(name.into(), bools)
        }
        Kind::Text => {
            let strings: Vec<Option<String>> = values.iter().map(text).collect();
            Series::new(name.into(), strings)
        }
    }
}

/// Builds a column, turning numeric-looking strings into numbers.
///
/// Integral columns without nulls become `Int64`, other numeric columns
/// `Float64`. A column with a single non-numeric value stays as provided.
pub(crate) fn coerce_numeric(name: &str, values: &[Value]) -> Series {
    build(name, values, true)
}

/// Builds a column from the JSON types as they are, strings untouched.
pub(crate) fn as_provided(name: &str, values: &[Value]) -> Series {
    build(name, values, false)
}
