//! Turns the provider's JSON payloads into [`Table`]s.
//!
//! Every data endpoint answers with an object holding a `result` member and
//! one more member carrying the records, e.g.
//!
//! ```json
//! {"result": {...}, "total_load": [{"date": "2023-01-15 10:00:00", "total_load_MW": "23105.2"}]}
//! ```
//!
//! The records are flattened into columns; a `Date` (or `date`) column
//! becomes a Europe/Rome time index, a `Year` column a year index, and the
//! remaining columns are coerced to numbers where possible.

use chrono::DateTime;
use chrono_tz::Tz;
use polars::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

mod coerce;
mod flatten;
mod table;
mod timestamp;

pub use table::{Table, TableIndex};
pub use timestamp::{adjust_tz, parse_timestamp, MARKET_TZ};

/// Normalizes a response body. Returns `Ok(None)` when the body carries no
/// `result` member, or nothing besides it.
pub fn normalize(body: &Value) -> Result<Option<Table>> {
    let Some(object) = body.as_object() else {
        return Ok(None);
    };
    if !object.contains_key("result") {
        return Ok(None);
    }
    let Some((key, payload)) = object.iter().find(|(k, _)| k.as_str() != "result") else {
        return Ok(None);
    };

    let mut raw = flatten::flatten_records(payload);
    debug!(key = key.as_str(), rows = raw.rows, "Normalizing payload");

    if raw.position("date").is_some() && raw.position("Date").is_none() {
        raw.rename("date", "Date");
    }

    let index = if raw.position("Date").is_some() {
        let mut stamps = Vec::with_capacity(raw.rows);
        for value in raw.take("Date").unwrap_or_default() {
            let text = match &value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let naive = parse_timestamp(&text).ok_or_else(|| Error::Timestamp {
                column: "Date".to_string(),
                value: text.clone(),
            })?;
            stamps.push(adjust_tz(naive, MARKET_TZ)?);
        }

        let mut keyed: Vec<(DateTime<Tz>, usize)> = stamps.into_iter().zip(0..).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let (stamps, order): (Vec<DateTime<Tz>>, Vec<usize>) = keyed.into_iter().unzip();
        raw.reorder(&order);
        TableIndex::Time(stamps)
    } else if let Some(years) = raw.take("Year") {
        TableIndex::Year(coerce::as_provided("Year", &years))
    } else {
        TableIndex::Range(raw.rows)
    };

    let columns: Vec<Series> = raw
        .names
        .iter()
        .zip(&raw.columns)
        .map(|(name, values)| coerce::coerce_numeric(name, values))
        .collect();
    let frame = DataFrame::new(columns)?;

    Ok(Some(Table::new(index, frame)))
}

/// Parses `body` as JSON and normalizes it.
pub fn normalize_str(body: &str) -> Result<Option<Table>> {
    let value: Value = serde_json::from_str(body)?;
    normalize(&value)
}
