//! HTTP implementation of the characters-fetch port
//!
//! [`RickMortyClient`] talks to the public Rick and Morty API (or anything serving the
//! same `/character` payload, such as a local mock). Each fetch:
//! 1. Builds the listing URL ([`endpoint::characters_url`])
//! 2. Sends a GET with the configured timeout and user agent
//! 3. Turns non-2xx statuses into [`Error::HttpStatus`] and empty bodies into
//!    [`Error::InvalidResponse`]
//! 4. Decodes the JSON payload ([`dto`]) into a domain [`Page`]
//!
//! Transient failures are retried with backoff according to the client's
//! [`RetryConfig`].

pub(crate) mod dto;
pub mod endpoint;


use crate::config::{ApiConfig, Config, RetryConfig};
use crate::error::{Error, Result};
use crate::fetcher::CharacterFetcher;
use crate::retry::fetch_with_retry;
use crate::types::Page;
use async_trait::async_trait;
use dto::{ApiErrorBody, CharactersPageResponse};
use std::time::Duration;
use tracing::debug;

/// Client for the character catalog
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct RickMortyClient {
    /// HTTP client with timeout and user agent applied
    http_client: reqwest::Client,
    /// API base URL, without the `/character` path
    base_url: String,
    /// Request timeout, reported in [`Error::Timeout`]
    timeout: Duration,
    /// Backoff policy for transient failures
    retry: RetryConfig,
}

impl RickMortyClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(api: &ApiConfig, retry: RetryConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(api.timeout)
            .user_agent(api.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: api.base_url.trim().to_string(),
            timeout: api.timeout,
            retry,
        })
    }

    /// Validate `config` and create a client from its API and retry sections
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(&config.api, config.retry.clone())
    }

    /// The base URL requests are built from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One attempt at fetching a page, without retries
    async fn fetch_once(&self, page: Option<u32>, status: Option<&str>) -> Result<Page> {
        let url = endpoint::characters_url(&self.base_url, page, status)?;
        debug!(url = %url, "Fetching characters page");

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let http_status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !http_status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .map(|b| b.error);
            return Err(Error::HttpStatus {
                status: http_status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(Error::InvalidResponse(format!(
                "empty response body from {}",
                url
            )));
        }

        let payload: CharactersPageResponse = serde_json::from_slice(&body)?;
        let page = Page::from(payload);
        debug!(
            url = %url,
            received = page.results.len(),
            has_next = page.has_next(),
            "Decoded characters page"
        );
        Ok(page)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                after: self.timeout,
            }
        } else {
            Error::Network(e)
        }
    }
}

#[async_trait]
impl CharacterFetcher for RickMortyClient {
    async fn fetch_characters(&self, page: Option<u32>, status: Option<&str>) -> Result<Page> {
        fetch_with_retry(&self.retry, || self.fetch_once(page, status)).await
    }
}
