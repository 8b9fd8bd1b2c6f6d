//! # mks-source
//!
//! HTTP clients for the two draw endpoints:
//! - the live endpoint, returning a JSON array of the most recent draws
//! - the history endpoint, returning `{ "data": [...] }` for one calendar year
//!
//! Both hand back raw JSON items; turning them into records (and dropping
//! items without an identifier) is left to the caller.

mod error;
mod history;
mod http;
mod live;

pub use error::SourceError;

use std::future::Future;
use std::time::Duration;

use mks_config::SourcesConfig;
use serde_json::Value;

/// Anything that can supply live and per-year history draws.
///
/// The synchronizer is generic over this so runs can be driven by fixtures.
pub trait DrawSource {
    /// Fetch the most recent draws.
    fn fetch_live(&self) -> impl Future<Output = Result<Vec<Value>, SourceError>> + Send;

    /// Fetch every draw of one calendar year.
    fn fetch_history(
        &self,
        year: i32,
    ) -> impl Future<Output = Result<Vec<Value>, SourceError>> + Send;
}

/// HTTP implementation of [`DrawSource`].
pub struct HttpDrawSource {
    http: reqwest::Client,
    config: SourcesConfig,
}

impl HttpDrawSource {
    /// Build a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (e.g. TLS backend initialisation failure).
    pub fn new(config: SourcesConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &SourcesConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        tracing::debug!(url, "GET");
        let resp = http::check_response(self.http.get(url).send().await?).await?;
        Ok(resp.text().await?)
    }
}

impl DrawSource for HttpDrawSource {
    async fn fetch_live(&self) -> Result<Vec<Value>, SourceError> {
        let body = self.get_text(&self.config.live_url).await?;
        live::parse_live(&body)
    }

    async fn fetch_history(&self, year: i32) -> Result<Vec<Value>, SourceError> {
        let body = self.get_text(&self.config.history_url_for(year)).await?;
        history::parse_history(&body)
    }
}
