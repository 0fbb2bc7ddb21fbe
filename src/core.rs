use reqwest::header::USER_AGENT;
use std::time::Duration;

use super::config::Config;
use super::error::{DivscanError, Result};

/// HTTP client for the Twelve Data API and the SEC content host.
///
/// The client wraps a single `reqwest::Client` built once from [`Config`].
/// There is deliberately no retry or backoff machinery: every failure is
/// surfaced to the caller, which decides whether the absence of data is a
/// valid business outcome (an empty result set) or a reason to skip the
/// current unit of work. The only throttling in the system is the fixed
/// post-download pause owned by the exhibit scanner, not this client.
///
/// Two request shapes are supported:
/// - [`get_json`](TwelveData::get_json) for authenticated API endpoints,
///   which appends the `apikey` query parameter and decodes the body;
/// - [`get_document`](TwelveData::get_document) for raw SEC exhibit
///   downloads, which sends an explicit per-request `User-Agent` and
///   returns the body verbatim.
#[derive(Debug, Clone)]
pub struct TwelveData {
    pub(crate) client: reqwest::Client,
    pub(crate) config: Config,
}

const BODY_PREVIEW_CHARS: usize = 200;

impl TwelveData {
    /// Builds a client from the given configuration.
    ///
    /// Fails with `DivscanError::ConfigError` when the API key is empty or
    /// the underlying HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DivscanError::ConfigError(
                "API key must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DivscanError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(TwelveData { client, config })
    }

    /// Issues a GET against an API endpoint and decodes the JSON body.
    ///
    /// The `apikey` parameter is appended here and never logged. A non-2xx
    /// status becomes `DivscanError::HttpStatus` carrying a preview of the
    /// body so callers can interpret API-level error documents.
    pub async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/{}",
            self.config.base_urls.api.trim_end_matches('/'),
            endpoint
        );
        tracing::debug!(endpoint, ?params, "requesting API endpoint");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apikey", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(DivscanError::RequestError)?;

        let status = response.status();
        let body = response.text().await.map_err(DivscanError::RequestError)?;
        tracing::debug!(endpoint, %status, body_len = body.len(), "API response received");

        if !status.is_success() {
            return Err(DivscanError::HttpStatus {
                status,
                url,
                body_preview: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Downloads a document as raw text, identifying with the supplied
    /// user-agent for this request only.
    pub async fn get_document(&self, url: &str, user_agent: &str) -> Result<String> {
        tracing::debug!(url, user_agent, "downloading document");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(DivscanError::RequestError)?;

        let status = response.status();
        let body = response.text().await.map_err(DivscanError::RequestError)?;
        tracing::debug!(url, %status, body_len = body.len(), "document downloaded");

        if !status.is_success() {
            return Err(DivscanError::HttpStatus {
                status,
                url: url.to_string(),
                body_preview: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        Ok(body)
    }

    /// Prefix used to absolutize bare SEC exhibit paths.
    pub fn sec_archives_url(&self) -> &str {
        &self.config.base_urls.sec_archives
    }

    /// Pause applied by the scanner after every exhibit download.
    pub fn fetch_delay(&self) -> Duration {
        self.config.fetch_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let result = TwelveData::new(Config::new(""));
        assert!(matches!(result, Err(DivscanError::ConfigError(_))));
    }

    #[test]
    fn client_builds_with_key() {
        let client = TwelveData::new(Config::new("demo")).unwrap();
        assert_eq!(client.sec_archives_url(), "https://www.sec.gov/Archives/edgar/data/");
        assert_eq!(client.fetch_delay(), Duration::from_secs(1));
    }
}
