use crate::error::Result;
use crate::normalize::Table;
use crate::ApiClient;

use super::{query, DateRange};

pub struct Adequacy<'a> {
    client: &'a dyn ApiClient,
}

impl<'a> Adequacy<'a> {
    const DETAIL_AVAILABLE_CAPACITY_URL: &'static str = "adequacy/v1.0/detail-available-capacity";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    pub fn detail_available_capacity(
        &self,
        date_range: Option<DateRange>,
    ) -> Result<Option<Table>> {
        self.client.fetch(
            Adequacy::DETAIL_AVAILABLE_CAPACITY_URL,
            &query(date_range, &[]),
        )
    }
}
