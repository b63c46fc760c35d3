use crate::error::Result;
use crate::normalize::Table;
use crate::ApiClient;

use super::{query, DateRange};

/// Generation data. `gen_type` filters map to the API's `type` parameter
/// (e.g. "Thermal", "Wind", "Photovoltaic").
pub struct Generation<'a> {
    client: &'a dyn ApiClient,
}

impl<'a> Generation<'a> {
    const ACTUAL_URL: &'static str = "generation/v2.0/actual-generation";
    const RENEWABLE_URL: &'static str = "generation/v2.0/renewable-generation";
    const ENERGY_BALANCE_URL: &'static str = "generation/v2.0/energy-balance";
    const INSTALLED_CAPACITY_URL: &'static str = "generation/v2.0/installed-capacity";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    fn typed(
        &self,
        url: &str,
        date_range: Option<DateRange>,
        ty: Option<&str>,
    ) -> Result<Option<Table>> {
        let qs = query(date_range, &[("type", ty.map(str::to_string))]);
        self.client.fetch(url, &qs)
    }

    pub fn actual_generation(
        &self,
        date_range: Option<DateRange>,
        gen_type: Option<&str>,
    ) -> Result<Option<Table>> {
        self.typed(Generation::ACTUAL_URL, date_range, gen_type)
    }

    pub fn renewable_generation(
        &self,
        date_range: Option<DateRange>,
        res_gen_type: Option<&str>,
    ) -> Result<Option<Table>> {
        self.typed(Generation::RENEWABLE_URL, date_range, res_gen_type)
    }

    pub fn energy_balance(
        &self,
        date_range: Option<DateRange>,
        energy_bal_type: Option<&str>,
    ) -> Result<Option<Table>> {
        self.typed(Generation::ENERGY_BALANCE_URL, date_range, energy_bal_type)
    }

    /// Installed capacity per year; the result is indexed by `Year`.
    pub fn installed_capacity(
        &self,
        year: Option<i32>,
        gen_type: Option<&str>,
    ) -> Result<Option<Table>> {
        let qs = query(
            None,
            &[
                ("year", year.map(|y| y.to_string())),
                ("type", gen_type.map(str::to_string)),
            ],
        );
        self.client.fetch(Generation::INSTALLED_CAPACITY_URL, &qs)
    }
}
