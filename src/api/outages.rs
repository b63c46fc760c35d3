use crate::error::Result;
use crate::normalize::Table;
use crate::ApiClient;

use super::{query, DateRange};

pub struct Outages<'a> {
    client: &'a dyn ApiClient,
}

impl<'a> Outages<'a> {
    const PLANT_OUTAGES_URL: &'static str = "outages/v1.0/generation-unit-unavailability";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    /// Unavailability of generation units.
    pub fn plant_outages(&self, date_range: Option<DateRange>) -> Result<Option<Table>> {
        self.client
            .fetch(Outages::PLANT_OUTAGES_URL, &query(date_range, &[]))
    }
}
