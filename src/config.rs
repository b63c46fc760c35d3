use std::time::Duration;

use oauth2::ClientSecret;

use crate::error::{Error, Result};
use crate::rate_limit::RATE_LIMIT;

pub const PRODUCTION_BASE_URL: &str = "https://api.terna.it/";
pub const PRODUCTION_TOKEN_URL: &str = "https://api.terna.it/transparency/oauth/accessToken";

pub const API_KEY_ENV: &str = "TERNA_API_KEY";
pub const API_SECRET_ENV: &str = "TERNA_API_SECRET";

/// Construction parameters of a [`TernaClient`](crate::TernaClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_secret: ClientSecret,
    pub base_url: String,
    pub token_url: String,
    /// Per-request timeout handed to the HTTP client.
    pub timeout: Option<Duration>,
    /// Proxy URL used for every request.
    pub proxy: Option<String>,
    /// When set, a `tracing` subscriber at this level is installed unless
    /// the application already has one.
    pub log_level: Option<tracing::Level>,
    pub rate_limit: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        ClientConfig {
            api_key: api_key.into(),
            api_secret: ClientSecret::new(api_secret.into()),
            base_url: PRODUCTION_BASE_URL.to_string(),
            token_url: PRODUCTION_TOKEN_URL.to_string(),
            timeout: None,
            proxy: None,
            log_level: None,
            rate_limit: RATE_LIMIT,
        }
    }

    /// Reads the credentials from `TERNA_API_KEY` and `TERNA_API_SECRET`.
    pub fn from_env_values() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| Error::Config(format!("{name} must be set")))
        };
        Ok(ClientConfig::new(var(API_KEY_ENV)?, var(API_SECRET_ENV)?))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = format!("{}/", base_url.trim_end_matches('/'));
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_rate_limit(mut self, interval: Duration) -> Self {
        self.rate_limit = interval;
        self
    }

    /// Fails fast on missing credentials.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("API key cannot be empty".to_string()));
        }
        if self.api_secret.secret().trim().is_empty() {
            return Err(Error::Config("API secret cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Installs a formatted `tracing` subscriber at `level`. Does nothing when
/// a global subscriber is already set.
pub fn init_logging(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init();
}
