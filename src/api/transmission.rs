use crate::error::Result;
use crate::normalize::Table;
use crate::ApiClient;

use super::{query, DateRange};

/// Scheduled exchanges and physical flows, with foreign countries and
/// between internal bidding zones.
pub struct Transmission<'a> {
    client: &'a dyn ApiClient,
}

impl<'a> Transmission<'a> {
    const SCHEDULED_FOREIGN_URL: &'static str = "transmission/v2.0/scheduled-foreign-exchange";
    const SCHEDULED_INTERNAL_URL: &'static str = "transmission/v2.0/scheduled-internal-exchange";
    const PHYSICAL_FOREIGN_URL: &'static str = "transmission/v2.0/physical-foreign-flow";
    const PHYSICAL_INTERNAL_URL: &'static str = "transmission/v2.0/physical-internal-flow";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    pub fn scheduled_foreign_exchange(
        &self,
        date_range: Option<DateRange>,
    ) -> Result<Option<Table>> {
        self.client
            .fetch(Transmission::SCHEDULED_FOREIGN_URL, &query(date_range, &[]))
    }

    pub fn scheduled_internal_exchange(
        &self,
        date_range: Option<DateRange>,
    ) -> Result<Option<Table>> {
        self.client
            .fetch(Transmission::SCHEDULED_INTERNAL_URL, &query(date_range, &[]))
    }

    pub fn physical_foreign_flow(&self, date_range: Option<DateRange>) -> Result<Option<Table>> {
        self.client
            .fetch(Transmission::PHYSICAL_FOREIGN_URL, &query(date_range, &[]))
    }

    pub fn physical_internal_flow(&self, date_range: Option<DateRange>) -> Result<Option<Table>> {
        self.client
            .fetch(Transmission::PHYSICAL_INTERNAL_URL, &query(date_range, &[]))
    }
}
