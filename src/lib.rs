//! A blocking client for the Terna transparency API.
//!
//! The client authenticates with the OAuth2 client-credentials grant, keeps
//! one bearer token until it is about to expire, spaces every outbound call
//! by at least 1.1 s and turns each JSON answer into a [`Table`] indexed by
//! Europe/Rome timestamps or by year.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use terna::api::DateRange;
//! use terna::TernaClient;
//!
//! let client = TernaClient::from_env_values()?;
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 1, 7).unwrap(),
//! );
//! if let Some(table) = client.load().total_load(Some(range), Some("Italy"))? {
//!     println!("{}", table.to_polars_df()?);
//! }
//! # Ok::<(), terna::Error>(())
//! ```

use std::fmt;

use oauth2::{AccessToken, ClientId, TokenUrl};
use serde_json::Value;
use tracing::{debug, error, instrument};

pub mod api;
pub mod config;
pub mod error;
pub mod normalize;
pub mod rate_limit;
pub mod token;
pub mod transport;

use api::adequacy::Adequacy;
use api::generation::Generation;
use api::load::Load;
use api::market::Market;
use api::outages::Outages;
use api::transmission::Transmission;
use api::DateRange;
use rate_limit::RateLimiter;
use token::TokenManager;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use normalize::{Table, TableIndex};
pub use transport::{HttpReply, HttpTransport, Transport};

/// Longest prefix of a response body written to the debug log.
const LOGGED_BODY_CHARS: usize = 500;

/// Something that can fetch an endpoint and normalize its answer.
pub trait ApiClient {
    /// GETs `path` (relative to the API root) with `query` and normalizes
    /// the JSON answer. `Ok(None)` means the answer carried no data.
    fn fetch(&self, path: &str, query: &[(String, String)]) -> Result<Option<Table>>;
}

pub struct TernaClient<T = HttpTransport> {
    base_url: String,
    tokens: TokenManager,
    limiter: RateLimiter,
    transport: T,
}

impl TernaClient<HttpTransport> {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        TernaClient::with_config(ClientConfig::new(api_key, api_secret))
    }

    /// Credentials from `TERNA_API_KEY` / `TERNA_API_SECRET`.
    pub fn from_env_values() -> Result<Self> {
        TernaClient::with_config(ClientConfig::from_env_values()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout, config.proxy.as_deref())?;
        TernaClient::with_transport(config, transport)
    }

    /// Shares an existing HTTP client; `timeout` and `proxy` of `config`
    /// are ignored in favour of the client's own settings.
    pub fn with_http_client(config: ClientConfig, http: reqwest::blocking::Client) -> Result<Self> {
        TernaClient::with_transport(config, HttpTransport::with_client(http))
    }
}

impl<T: Transport> TernaClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        if let Some(level) = config.log_level {
            config::init_logging(level);
        }
        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| Error::Config(format!("invalid token URL {:?}: {e}", config.token_url)))?;

        let client = TernaClient {
            base_url: config.base_url,
            tokens: TokenManager::new(ClientId::new(config.api_key), config.api_secret, token_url),
            limiter: RateLimiter::new(config.rate_limit),
            transport,
        };
        debug!(?client, "Client initialized");
        Ok(client)
    }

    /// Returns a bearer token, requesting a new one only when the cached
    /// one is missing or expires within five seconds.
    pub fn obtain_token(&self) -> Result<AccessToken> {
        self.tokens.obtain_token(&self.transport, &self.limiter)
    }

    /// Fetches any endpoint. Dates are sent only when `date_range` is set;
    /// `extra_params` are appended as they are.
    pub fn fetch_data(
        &self,
        path: &str,
        date_range: Option<DateRange>,
        extra_params: &[(&str, &str)],
    ) -> Result<Option<Table>> {
        let filters: Vec<(&str, Option<String>)> = extra_params
            .iter()
            .map(|(k, v)| (*k, Some(v.to_string())))
            .collect();
        self.fetch(path, &api::query(date_range, &filters))
    }

    pub fn load(&self) -> Load<'_> {
        Load::new(self)
    }

    pub fn generation(&self) -> Generation<'_> {
        Generation::new(self)
    }

    pub fn transmission(&self) -> Transmission<'_> {
        Transmission::new(self)
    }

    pub fn market(&self) -> Market<'_> {
        Market::new(self)
    }

    pub fn outages(&self) -> Outages<'_> {
        Outages::new(self)
    }

    pub fn adequacy(&self) -> Adequacy<'_> {
        Adequacy::new(self)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl<T: Transport> ApiClient for TernaClient<T> {
    #[instrument(level = "debug", skip(self, query))]
    fn fetch(&self, path: &str, query: &[(String, String)]) -> Result<Option<Table>> {
        let token = self.obtain_token()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("API endpoint: {}", url);
        debug!("Request data: {:?}", query);

        let reply = self.limiter.throttle("base request", || {
            self.transport.get(&url, query, token.secret())
        })?;
        debug!("Request URL: {}", reply.url);

        if !reply.is_success() {
            if error::RETRYABLE_STATUSES.contains(&reply.status) {
                error!("Request failed with status code {}", reply.status);
            }
            return Err(Error::Status {
                status: reply.status,
                url: reply.url,
                body: reply.body,
            });
        }
        debug!("Response status: {}", reply.status);
        debug!(
            "Response content: {}",
            reply.body.chars().take(LOGGED_BODY_CHARS).collect::<String>()
        );

        if reply.status != 200 {
            error!("Request failed with status code {}", reply.status);
            return Ok(None);
        }

        let body: Value = serde_json::from_str(&reply.body)?;
        normalize::normalize(&body)
    }
}

impl<T> fmt::Debug for TernaClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key: String = self.tokens.client_id().chars().take(4).collect();
        f.debug_struct("TernaClient")
            .field("api_key", &format_args!("{key}***"))
            .field("api_secret", &format_args!("***"))
            .field("base_url", &self.base_url)
            .field("token_url", &self.tokens.token_url().as_str())
            .field("rate_limit", &self.limiter.interval())
            .finish()
    }
}
