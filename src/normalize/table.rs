use chrono::DateTime;
use chrono_tz::Tz;
use polars::prelude::*;

use crate::error::Result;

use super::timestamp::MARKET_TZ;

/// Row labels of a [`Table`].
#[derive(Debug, Clone)]
pub enum TableIndex {
    /// Quarter-hour timestamps in Europe/Rome, ascending.
    Time(Vec<DateTime<Tz>>),
    /// The `Year` column of the payload, in arrival order.
    Year(Series),
    /// No special index: rows are numbered in arrival order.
    Range(usize),
}

impl TableIndex {
    pub fn len(&self) -> usize {
        match self {
            TableIndex::Time(ts) => ts.len(),
            TableIndex::Year(s) => s.len(),
            TableIndex::Range(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_time(&self) -> Option<&[DateTime<Tz>]> {
        match self {
            TableIndex::Time(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_year(&self) -> Option<&Series> {
        match self {
            TableIndex::Year(s) => Some(s),
            _ => None,
        }
    }
}

/// A normalized response: an index plus the remaining columns.
#[derive(Debug, Clone)]
pub struct Table {
    index: TableIndex,
    frame: DataFrame,
}

impl Table {
    pub(crate) fn new(index: TableIndex, frame: DataFrame) -> Self {
        Table { index, frame }
    }

    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    /// Data columns, without the index.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_parts(self) -> (TableIndex, DataFrame) {
        (self.index, self.frame)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Series> {
        self.frame.column(name).ok()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Returns the data with the index materialized as the first column:
    /// a `Datetime(ms, Europe/Rome)` column named `index` for time-indexed
    /// tables, the `Year` column for year-indexed ones. If the payload
    /// already has an `index` column, the time column is named `_index`
    /// (with more leading underscores as needed).
    pub fn to_polars_df(&self) -> Result<DataFrame> {
        let mut df = self.frame.clone();
        match &self.index {
            TableIndex::Time(ts) => {
                let millis: Vec<i64> = ts.iter().map(|t| t.timestamp_millis()).collect();
                let index = Int64Chunked::from_vec(self.free_name("index").into(), millis)
                    .into_datetime(TimeUnit::Milliseconds, Some(MARKET_TZ.name().into()))
                    .into_series();
                df.insert_column(0, index)?;
            }
            TableIndex::Year(years) => {
                df.insert_column(0, years.clone())?;
            }
            TableIndex::Range(_) => {}
        }
        Ok(df)
    }

    fn free_name(&self, base: &str) -> String {
        let taken = self.column_names();
        let mut name = base.to_string();
        while taken.contains(&name) {
            name.insert(0, '_');
        }
        name
    }
}
