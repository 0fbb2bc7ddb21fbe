//! Per-symbol orchestration and the run loop over the symbol list.
//!
//! Each symbol walks the same sequential stages: resolve identity, fetch
//! filings, scan each filing's exhibits, fetch the dividend calendar, emit.
//! A failure at any stage logs the reason and skips that symbol; the run as
//! a whole never aborts because of one symbol. Everything executes one
//! request at a time, in input order.

use std::time::Duration;

use super::TwelveData;
use super::agent::AgentRotator;
use super::calendar::DividendEvent;
use super::config::{DEFAULT_FETCH_DELAY, DEFAULT_SEC_ARCHIVES_URL};
use super::error::{DivscanError, Result};
use super::filings::Filing;
use super::scanner::scan_filing;
use super::traits::{CalendarOperations, FilingOperations, ReferenceOperations};
use serde::Serialize;

/// The record emitted for every symbol that passed resolution. Both
/// `dividends` and `sec_reports` may legitimately be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolResult {
    pub ticker: String,
    pub instrument_name: String,
    pub exchange: String,
    pub dividends: Vec<DividendEvent>,
    pub sec_reports: Vec<Filing>,
}

/// Date window and processing limit for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub start_date: String,
    pub end_date: String,
    /// Number of symbols to process; 0 means the whole list.
    pub limit: usize,
}

impl RunOptions {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            limit: 0,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Drives the extraction for a list of symbols.
///
/// Generic over the operation traits so the orchestration logic can be
/// exercised against canned responses in tests. In production `A` is
/// [`TwelveData`](crate::TwelveData) and `R` is
/// [`UserAgentPool`](crate::UserAgentPool).
#[derive(Debug)]
pub struct Pipeline<A, R> {
    api: A,
    rotator: R,
    options: RunOptions,
    archive_base: String,
    fetch_delay: Duration,
}

impl<A, R> Pipeline<A, R>
where
    A: ReferenceOperations + FilingOperations + CalendarOperations + Sync,
    R: AgentRotator + Sync,
{
    pub fn new(api: A, rotator: R, options: RunOptions) -> Self {
        Self {
            api,
            rotator,
            options,
            archive_base: DEFAULT_SEC_ARCHIVES_URL.to_string(),
            fetch_delay: DEFAULT_FETCH_DELAY,
        }
    }

    /// Overrides the SEC archive prefix used to absolutize exhibit paths.
    pub fn with_archive_base(mut self, archive_base: impl Into<String>) -> Self {
        self.archive_base = archive_base.into();
        self
    }

    /// Overrides the pause applied after every exhibit download.
    pub fn with_fetch_delay(mut self, fetch_delay: Duration) -> Self {
        self.fetch_delay = fetch_delay;
        self
    }

    /// Returns the underlying API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Processes the symbol list in order, truncated to the configured
    /// limit, and returns the emitted records in input order.
    ///
    /// Always returns, possibly with an empty list; per-symbol failures are
    /// visible only in the logs.
    pub async fn run(&self, symbols: &[String]) -> Vec<SymbolResult> {
        let take = if self.options.limit > 0 {
            self.options.limit.min(symbols.len())
        } else {
            symbols.len()
        };

        let mut results = Vec::new();
        for (i, ticker) in symbols.iter().take(take).enumerate() {
            tracing::info!(ticker = %ticker, index = i + 1, total = take, "processing symbol");

            match self.process_symbol(ticker).await {
                Ok(result) => {
                    tracing::info!(
                        ticker = %ticker,
                        dividends = result.dividends.len(),
                        sec_reports = result.sec_reports.len(),
                        "symbol processed"
                    );
                    results.push(result);
                }
                Err(DivscanError::NotFound) => {
                    tracing::warn!(ticker = %ticker, "no reference data, skipping symbol");
                }
                Err(e) => {
                    tracing::error!(ticker = %ticker, error = %e, "failed to process symbol, skipping");
                }
            }
        }

        results
    }

    /// Runs the sequential stages for one symbol. Any stage error bubbles
    /// to [`run`](Pipeline::run), which converts it into a skip.
    async fn process_symbol(&self, ticker: &str) -> Result<SymbolResult> {
        let info = self.api.resolve_symbol(ticker).await?;

        let raw_filings = self
            .api
            .fetch_filings(
                ticker,
                &info.exchange,
                &self.options.start_date,
                &self.options.end_date,
            )
            .await?;

        let mut sec_reports = Vec::new();
        for raw in &raw_filings {
            if let Some(filing) = scan_filing(
                &self.api,
                &self.rotator,
                &self.archive_base,
                self.fetch_delay,
                raw,
            )
            .await
            {
                sec_reports.push(filing);
            }
        }

        let dividends = self
            .api
            .fetch_dividends(
                ticker,
                &info.exchange,
                &self.options.start_date,
                &self.options.end_date,
            )
            .await?;

        Ok(SymbolResult {
            ticker: info.ticker,
            instrument_name: info.instrument_name,
            exchange: info.exchange,
            dividends,
            sec_reports,
        })
    }
}

impl<R> Pipeline<TwelveData, R>
where
    R: AgentRotator + Sync,
{
    /// Builds a pipeline whose archive base and fetch delay come from the
    /// client's own configuration, so they are set in one place.
    pub fn from_client(api: TwelveData, rotator: R, options: RunOptions) -> Self {
        let archive_base = api.sec_archives_url().to_string();
        let fetch_delay = api.fetch_delay();
        Pipeline::new(api, rotator, options)
            .with_archive_base(archive_base)
            .with_fetch_delay(fetch_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::UserAgentPool;
    use crate::config::{BaseUrls, Config};

    #[test]
    fn from_client_wires_config_values() {
        let config = Config::new("demo")
            .with_fetch_delay(Duration::from_millis(250))
            .with_base_urls(BaseUrls {
                api: "https://api.example.test".to_string(),
                sec_archives: "https://sec.example.test/archives/".to_string(),
            });
        let client = TwelveData::new(config).unwrap();

        let pipeline = Pipeline::from_client(
            client,
            UserAgentPool::new(),
            RunOptions::new("2025-04-01", "2025-06-30"),
        );

        assert_eq!(pipeline.archive_base, "https://sec.example.test/archives/");
        assert_eq!(pipeline.fetch_delay, Duration::from_millis(250));
    }
}
