use crate::error::Result;
use crate::normalize::Table;
use crate::ApiClient;

use super::{query, DateRange, Direction};

/// Dispatching services market (MSD) inputs and outcomes.
///
/// `session_type` is the market session (e.g. "MSD1"), `price_type` the
/// price kind (e.g. "MARGINAL").
pub struct Market<'a> {
    client: &'a dyn ApiClient,
}

impl<'a> Market<'a> {
    const FORECAST_LOAD_URL: &'static str = "market/v1.0/input/forecast-load";
    const SUBMITTED_OFFERS_URL: &'static str = "market/v1.0/input/submitted-offers";
    const COSTS_URL: &'static str = "market/v1.0/output/costs";
    const QUANTITY_URL: &'static str = "market/v1.0/output/quantity";
    const ACCEPTED_OFFERS_URL: &'static str = "market/v1.0/output/accepted-offers";
    const PRICES_URL: &'static str = "market/v1.0/output/prices";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    fn session_and_direction(
        &self,
        url: &str,
        date_range: Option<DateRange>,
        session_type: Option<&str>,
        direction: Option<Direction>,
    ) -> Result<Option<Table>> {
        let qs = query(
            date_range,
            &[
                ("sessionType", session_type.map(str::to_string)),
                ("direction", direction.map(|d| d.to_string())),
            ],
        );
        self.client.fetch(url, &qs)
    }

    pub fn forecast_load(
        &self,
        date_range: Option<DateRange>,
        session_type: Option<&str>,
    ) -> Result<Option<Table>> {
        let qs = query(
            date_range,
            &[("sessionType", session_type.map(str::to_string))],
        );
        self.client.fetch(Market::FORECAST_LOAD_URL, &qs)
    }

    pub fn costs(
        &self,
        date_range: Option<DateRange>,
        session_type: Option<&str>,
        direction: Option<Direction>,
    ) -> Result<Option<Table>> {
        self.session_and_direction(Market::COSTS_URL, date_range, session_type, direction)
    }

    pub fn quantity(
        &self,
        date_range: Option<DateRange>,
        session_type: Option<&str>,
        direction: Option<Direction>,
    ) -> Result<Option<Table>> {
        self.session_and_direction(Market::QUANTITY_URL, date_range, session_type, direction)
    }

    pub fn accepted_offers(
        &self,
        date_range: Option<DateRange>,
        session_type: Option<&str>,
        direction: Option<Direction>,
    ) -> Result<Option<Table>> {
        self.session_and_direction(
            Market::ACCEPTED_OFFERS_URL,
            date_range,
            session_type,
            direction,
        )
    }

    pub fn submitted_offers(
        &self,
        date_range: Option<DateRange>,
        session_type: Option<&str>,
        direction: Option<Direction>,
    ) -> Result<Option<Table>> {
        self.session_and_direction(
            Market::SUBMITTED_OFFERS_URL,
            date_range,
            session_type,
            direction,
        )
    }

    pub fn prices(
        &self,
        date_range: Option<DateRange>,
        price_type: Option<&str>,
        session_type: Option<&str>,
        direction: Option<Direction>,
    ) -> Result<Option<Table>> {
        let qs = query(
            date_range,
            &[
                ("priceType", price_type.map(str::to_string)),
                ("sessionType", session_type.map(str::to_string)),
                ("direction", direction.map(|d| d.to_string())),
            ],
        );
        self.client.fetch(Market::PRICES_URL, &qs)
    }
}
