use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

pub mod adequacy;
pub mod generation;
pub mod load;
pub mod market;
pub mod outages;
pub mod transmission;

pub trait FormatToApiFmt {
    fn to_api_format(&self) -> String;
}

impl FormatToApiFmt for NaiveDate {
    fn to_api_format(&self) -> String {
        self.format("%d/%m/%Y").to_string()
    }
}

impl FormatToApiFmt for NaiveDateTime {
    fn to_api_format(&self) -> String {
        self.date().to_api_format()
    }
}

impl<Tz: TimeZone> FormatToApiFmt for DateTime<Tz> {
    fn to_api_format(&self) -> String {
        self.date_naive().to_api_format()
    }
}

/// Inclusive range of days, sent as `dateFrom`/`dateTo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub(crate) fn to_query_string(self) -> Vec<(String, String)> {
        vec![
            ("dateFrom".to_string(), self.start.to_api_format()),
            ("dateTo".to_string(), self.end.to_api_format()),
        ]
    }
}

/// Direction of balancing market offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Upward regulation (selling to Terna)
    Up,
    /// Downward regulation (buying from Terna)
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        };
        write!(f, "{}", d)
    }
}

/// Builds the query of an endpoint: the date range if any, then every
/// filter that is set, in order.
pub(crate) fn query(
    date_range: Option<DateRange>,
    filters: &[(&str, Option<String>)],
) -> Vec<(String, String)> {
    let mut qs: Vec<(String, String)> = vec![];

    if let Some(date_range) = date_range {
        qs.append(&mut date_range.to_query_string());
    }
    for (key, value) in filters {
        if let Some(value) = value {
            qs.push((key.to_string(), value.clone()));
        }
    }
    qs
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dates_are_day_month_year() {
        assert_eq!(day(2023, 1, 5).to_api_format(), "05/01/2023");
        let dt = Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(dt.to_api_format(), "31/12/2023");
    }

    #[test]
    fn query_skips_unset_filters() {
        let qs = query(
            Some(DateRange::new(day(2023, 1, 1), day(2023, 1, 31))),
            &[
                ("sessionType", Some("MSD1".to_string())),
                ("direction", None),
                ("priceType", Some("MARGINAL".to_string())),
            ],
        );
        assert_eq!(
            qs,
            vec![
                ("dateFrom".to_string(), "01/01/2023".to_string()),
                ("dateTo".to_string(), "31/01/2023".to_string()),
                ("sessionType".to_string(), "MSD1".to_string()),
                ("priceType".to_string(), "MARGINAL".to_string()),
            ]
        );
    }

    #[test]
    fn no_range_no_dates() {
        let qs = query(None, &[("year", Some("2023".to_string()))]);
        assert_eq!(qs, vec![("year".to_string(), "2023".to_string())]);
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Up.to_string(), "UP");
        assert_eq!(Direction::Down.to_string(), "DOWN");
    }
}
