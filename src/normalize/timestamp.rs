use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike,
};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Zone the provider's wall-clock timestamps are expressed in.
pub const MARKET_TZ: Tz = chrono_tz::Europe::Rome;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Reads a naive wall-clock timestamp. Offsets in RFC 3339 input are dropped
/// and the local part kept; bare dates are read as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Localizes `dt` to `tz`, snapping it onto the quarter-hour grid.
///
/// On-grid times are localized as they are, picking the earlier instant of
/// an ambiguous (fall-back) hour. Off-grid times are moved by
/// `delta + 15 * (4 - delta)` minutes backwards, `delta` being
/// `minute % 15` (so `10:07` lands on `10:45`), and take the later instant
/// if ambiguous.
pub fn adjust_tz(dt: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    let delta = i64::from(dt.minute() % 15);
    if delta == 0 {
        return match tz.from_local_datetime(&dt) {
            LocalResult::Single(t) => Ok(t),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => Err(Error::NonexistentLocalTime(dt)),
        };
    }

    let shifted = dt - TimeDelta::minutes(delta + 15 * (4 - delta));
    match tz.from_local_datetime(&shifted) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(_, latest) => Ok(latest),
        LocalResult::None => Err(Error::NonexistentLocalTime(shifted)),
    }
}
