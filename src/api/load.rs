use crate::error::Result;
use crate::normalize::Table;
use crate::ApiClient;

use super::{query, DateRange};

/// Electricity demand: total and market load, peaks and the IMCEI index.
pub struct Load<'a> {
    client: &'a dyn ApiClient,
}

impl<'a> Load<'a> {
    const TOTAL_LOAD_URL: &'static str = "load/v2.0/total-load";
    const MARKET_LOAD_URL: &'static str = "load/v2.0/market-load";
    const PEAK_VALLEY_URL: &'static str = "load/v2.0/peak-valley-load";
    const PEAK_VALLEY_DETAILS_URL: &'static str = "load/v2.0/peak-valley-load-details";
    const IMCEI_URL: &'static str = "load/v2.0/monthly-index-industrial-electrical-consumption";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    /// Total load, optionally restricted to one bidding zone.
    pub fn total_load(
        &self,
        date_range: Option<DateRange>,
        bidding_zone: Option<&str>,
    ) -> Result<Option<Table>> {
        let qs = query(
            date_range,
            &[("biddingZone", bidding_zone.map(str::to_string))],
        );
        self.client.fetch(Load::TOTAL_LOAD_URL, &qs)
    }

    /// Load served by the market, optionally restricted to one bidding zone.
    pub fn market_load(
        &self,
        date_range: Option<DateRange>,
        bidding_zone: Option<&str>,
    ) -> Result<Option<Table>> {
        let qs = query(
            date_range,
            &[("biddingZone", bidding_zone.map(str::to_string))],
        );
        self.client.fetch(Load::MARKET_LOAD_URL, &qs)
    }

    pub fn peak_valley_load(&self, date_range: Option<DateRange>) -> Result<Option<Table>> {
        self.client
            .fetch(Load::PEAK_VALLEY_URL, &query(date_range, &[]))
    }

    pub fn peak_valley_load_details(&self, date_range: Option<DateRange>) -> Result<Option<Table>> {
        self.client
            .fetch(Load::PEAK_VALLEY_DETAILS_URL, &query(date_range, &[]))
    }

    /// Monthly index of industrial electrical consumption (IMCEI).
    pub fn monthly_industrial_consumption_index(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Option<Table>> {
        let qs = query(
            None,
            &[
                ("year", year.map(|y| y.to_string())),
                ("month", month.map(|m| m.to_string())),
            ],
        );
        self.client.fetch(Load::IMCEI_URL, &qs)
    }
}
