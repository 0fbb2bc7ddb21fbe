//! Trait definitions organizing the remote operations by data source.
//!
//! Each external collaborator gets its own trait: the reference API that
//! resolves tickers, the filings archive plus the SEC content host, and the
//! dividend calendar. The [`TwelveData`](crate::TwelveData) client
//! implements all three; the pipeline is generic over them so tests can
//! drive the orchestration against canned responses without any network.

use super::calendar::DividendEvent;
use super::error::Result;
use super::filings::RawFiling;
use super::resolver::InstrumentInfo;
use async_trait::async_trait;

/// Ticker identity lookups against the reference data API.
#[async_trait]
pub trait ReferenceOperations {
    /// Resolves a ticker into instrument name and exchange.
    ///
    /// An empty result set is `DivscanError::NotFound`; a first entry with
    /// missing fields is `DivscanError::MalformedResponse`.
    async fn resolve_symbol(&self, ticker: &str) -> Result<InstrumentInfo>;
}

/// Regulatory filings for a symbol and the exhibit documents they link to.
#[async_trait]
pub trait FilingOperations {
    /// Fetches the raw filing entries for a symbol within a date window.
    async fn fetch_filings(
        &self,
        ticker: &str,
        exchange: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<RawFiling>>;

    /// Downloads one exhibit document as raw text, identifying with the
    /// given user-agent for this request only.
    async fn fetch_document(&self, url: &str, user_agent: &str) -> Result<String>;
}

/// Dividend events for a symbol, scoped to its resolved exchange.
#[async_trait]
pub trait CalendarOperations {
    /// Fetches the dividend events for a symbol within a date window. An
    /// empty calendar is a valid outcome, not an error.
    async fn fetch_dividends(
        &self,
        ticker: &str,
        exchange: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DividendEvent>>;
}
