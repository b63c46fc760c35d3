use std::cell::RefCell;
use std::time::{Duration, Instant};

use oauth2::{AccessToken, ClientId, ClientSecret, TokenUrl};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::rate_limit::RateLimiter;
use crate::transport::Transport;

/// A cached token is reused only while it has more than this left to live.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(5);

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<Value>,
}

/// Lifetime in whole seconds, sent either as an integer or an integral float.
fn lifetime(expires_in: &Value) -> Option<Duration> {
    if let Some(secs) = expires_in.as_u64() {
        return Some(Duration::from_secs(secs));
    }
    let secs = expires_in.as_f64()?;
    if secs.is_finite() && secs >= 0.0 && secs.fract() == 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: AccessToken,
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid_at(&self, now: Instant) -> bool {
        self.expires_at
            .checked_sub(EXPIRY_MARGIN)
            .is_some_and(|deadline| deadline > now)
    }
}

/// Obtains bearer tokens with the client-credentials grant and keeps the
/// last one until it is about to expire.
#[derive(Debug)]
pub struct TokenManager {
    client_id: ClientId,
    client_secret: ClientSecret,
    token_url: TokenUrl,
    cached: RefCell<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(client_id: ClientId, client_secret: ClientSecret, token_url: TokenUrl) -> Self {
        TokenManager {
            client_id,
            client_secret,
            token_url,
            cached: RefCell::new(None),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn token_url(&self) -> &TokenUrl {
        &self.token_url
    }

    /// Returns the cached token if still valid, otherwise requests a new one
    /// through `transport`, gated by `limiter`.
    pub fn obtain_token(
        &self,
        transport: &dyn Transport,
        limiter: &RateLimiter,
    ) -> Result<AccessToken> {
        if let Some(cached) = self.cached.borrow().as_ref() {
            if cached.is_valid_at(Instant::now()) {
                debug!("Using cached token");
                return Ok(cached.token.clone());
            }
        }

        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.secret().as_str()),
            ("grant_type", "client_credentials"),
        ];
        let url = self.token_url.as_str();
        let reply = limiter.throttle("token", || transport.post_form(url, &form))?;

        if !reply.is_success() {
            if crate::error::RETRYABLE_STATUSES.contains(&reply.status) {
                error!(status = reply.status, "Token request failed");
            }
            return Err(Error::Status {
                status: reply.status,
                url: reply.url,
                body: reply.body,
            });
        }
        debug!("Response content: {}", reply.body);

        if reply.status != 200 {
            error!("Request failed with status code {}", reply.status);
            return Err(Error::Auth(format!(
                "token endpoint answered with status {}",
                reply.status
            )));
        }

        let response: TokenResponse = serde_json::from_str(&reply.body)?;
        let (Some(access_token), Some(expires_in)) = (response.access_token, response.expires_in)
        else {
            return Err(Error::Auth(
                "token response lacks access_token or expires_in".to_string(),
            ));
        };

        let expires_at = lifetime(&expires_in)
            .and_then(|lifetime| Instant::now().checked_add(lifetime))
            .ok_or_else(|| {
                Error::Auth(format!(
                    "token response has an unusable expires_in: {expires_in}"
                ))
            })?;

        let token = AccessToken::new(access_token);
        *self.cached.borrow_mut() = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });
        Ok(token)
    }
}
