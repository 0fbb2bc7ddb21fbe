//! Filing retrieval from the `/edgar_filings/archive` endpoint.
//!
//! The archive returns raw filing entries with a nested attachment list.
//! The raw wire shapes live here next to the cleaned-up [`Filing`] and
//! [`FilingFile`] records that survive exhibit scanning and end up in the
//! output document.

use super::TwelveData;
use super::error::Result;
use super::traits::FilingOperations;
use async_trait::async_trait;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One filing entry as returned by the archive endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFiling {
    #[serde(default)]
    pub filing_url: String,
    /// Unix timestamp of the filing date; 0 when absent.
    #[serde(default)]
    pub filed_at: i64,
    #[serde(default)]
    pub files: Vec<RawAttachment>,
}

/// One attachment listed by a filing, before eligibility and content checks.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAttachment {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default)]
    pub mime: String,
}

/// A filing that retained at least one matching exhibit after scanning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filing {
    pub url: String,
    pub filed_at: String,
    pub files: Vec<FilingFile>,
}

/// An exhibit whose content matched the dividend marker. Type and mime are
/// carried over from the attachment unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilingFile {
    pub url: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub mime: String,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    values: Vec<RawFiling>,
}

/// Decodes the archive response. API error documents deserialize to an
/// empty `values` list, which callers treat as "no filings".
pub(crate) fn parse_archive_response(value: Value) -> Result<Vec<RawFiling>> {
    let response: ArchiveResponse = serde_json::from_value(value)?;
    Ok(response.values)
}

/// Renders a unix filing timestamp as `YYYY-MM-DD`, or an empty string when
/// the archive did not provide one.
pub(crate) fn format_filed_at(timestamp: i64) -> String {
    if timestamp == 0 {
        return String::new();
    }
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[async_trait]
impl FilingOperations for TwelveData {
    async fn fetch_filings(
        &self,
        ticker: &str,
        exchange: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<RawFiling>> {
        tracing::info!(ticker, start_date, end_date, "fetching SEC filings");

        let value = self
            .get_json(
                "edgar_filings/archive",
                &[
                    ("symbol", ticker),
                    ("filled_from", start_date),
                    ("filled_to", end_date),
                    ("exchange", exchange),
                    ("form_type", "8-K"),
                ],
            )
            .await?;

        let filings = parse_archive_response(value)?;
        tracing::debug!(ticker, count = filings.len(), "filings retrieved");
        Ok(filings)
    }

    async fn fetch_document(&self, url: &str, user_agent: &str) -> Result<String> {
        self.get_document(url, user_agent).await
    }
}
