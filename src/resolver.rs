//! Ticker identity resolution against the `/stocks` reference endpoint.

use super::TwelveData;
use super::error::{DivscanError, Result};
use super::traits::ReferenceOperations;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Identity metadata for one resolved ticker.
///
/// Created from the first matching entry of the reference API response and
/// immutable afterwards. The exchange is retained for the downstream
/// calendar lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentInfo {
    pub ticker: String,
    pub instrument_name: String,
    pub exchange: String,
}

#[derive(Debug, Deserialize)]
struct StocksResponse {
    #[serde(default)]
    data: Option<DataSection>,
}

// The API returns a list for most tickers but a bare object for some; both
// shapes carry the same entry fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataSection {
    Many(Vec<StockEntry>),
    One(StockEntry),
}

#[derive(Debug, Deserialize)]
struct StockEntry {
    name: Option<String>,
    exchange: Option<String>,
}

pub(crate) fn parse_stocks_response(value: Value, ticker: &str) -> Result<InstrumentInfo> {
    let response: StocksResponse = serde_json::from_value(value)?;

    let entries = match response.data {
        Some(DataSection::Many(entries)) => entries,
        Some(DataSection::One(entry)) => vec![entry],
        None => Vec::new(),
    };

    let first = entries.into_iter().next().ok_or(DivscanError::NotFound)?;

    let instrument_name = first.name.ok_or_else(|| {
        DivscanError::MalformedResponse(format!("stocks entry for {} is missing 'name'", ticker))
    })?;
    let exchange = first.exchange.ok_or_else(|| {
        DivscanError::MalformedResponse(format!(
            "stocks entry for {} is missing 'exchange'",
            ticker
        ))
    })?;

    Ok(InstrumentInfo {
        ticker: ticker.to_string(),
        instrument_name,
        exchange,
    })
}

#[async_trait]
impl ReferenceOperations for TwelveData {
    async fn resolve_symbol(&self, ticker: &str) -> Result<InstrumentInfo> {
        tracing::info!(ticker, "resolving symbol");
        let value = self.get_json("stocks", &[("symbol", ticker)]).await?;
        let info = parse_stocks_response(value, ticker)?;
        tracing::debug!(
            ticker,
            name = %info.instrument_name,
            exchange = %info.exchange,
            "symbol resolved"
        );
        Ok(info)
    }
}
