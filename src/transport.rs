//! HTTP plumbing behind the client.
//!
//! [`Transport`] is the seam the client talks through; [`HttpTransport`] is
//! the `reqwest` implementation used in production.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::{Error, Result};

/// Raw answer of the provider, before any status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    /// Final URL, query string included.
    pub url: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// POST `form` as `application/x-www-form-urlencoded`.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpReply>;

    /// GET `url` with `query`, authenticated with a bearer token.
    fn get(&self, url: &str, query: &[(String, String)], bearer: &str) -> Result<HttpReply>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds a dedicated HTTP client with an optional per-request timeout
    /// and an optional proxy applied to every scheme.
    pub fn new(timeout: Option<Duration>, proxy: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("terna/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("invalid proxy {proxy:?}: {e}")))?;
            builder = builder.proxy(proxy);
        }
        Ok(HttpTransport {
            http: builder.build()?,
        })
    }

    /// Reuses an existing HTTP client (shared connection pool, custom TLS...).
    pub fn with_client(http: reqwest::blocking::Client) -> Self {
        HttpTransport { http }
    }

    fn reply(response: reqwest::blocking::Response) -> Result<HttpReply> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text()?;
        Ok(HttpReply { status, url, body })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpReply> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(form)
            .send()?;
        HttpTransport::reply(response)
    }

    fn get(&self, url: &str, query: &[(String, String)], bearer: &str) -> Result<HttpReply> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .bearer_auth(bearer)
            .query(query)
            .send()?;
        HttpTransport::reply(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let reply = |status| HttpReply {
            status,
            url: String::new(),
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(301).is_success());
        assert!(!reply(500).is_success());
    }

    #[test]
    fn rejects_bad_proxy() {
        let err = HttpTransport::new(None, Some("::not a url::")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
