//! Dividend calendar lookups against the `/dividends_calendar` endpoint.

use super::TwelveData;
use super::error::Result;
use super::traits::CalendarOperations;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One dividend event, passed through from the calendar API verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub mic_code: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub ex_date: String,
    #[serde(default)]
    pub amount: f64,
}

/// Decodes the calendar response and keeps only the requested symbol's
/// events. The endpoint returns a flat array when it has data; anything
/// else (error documents, empty objects) means "no dividends", which is a
/// valid business outcome.
pub(crate) fn parse_calendar_response(value: Value, ticker: &str) -> Vec<DividendEvent> {
    let events: Vec<DividendEvent> = match serde_json::from_value(value) {
        Ok(events) => events,
        Err(_) => {
            tracing::debug!(ticker, "calendar response is not a list, treating as empty");
            return Vec::new();
        }
    };

    // The API may return neighbouring symbols in the same window.
    events
        .into_iter()
        .filter(|event| event.symbol == ticker)
        .collect()
}

#[async_trait]
impl CalendarOperations for TwelveData {
    async fn fetch_dividends(
        &self,
        ticker: &str,
        exchange: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DividendEvent>> {
        tracing::info!(ticker, exchange, "fetching dividend calendar");

        let value = self
            .get_json(
                "dividends_calendar",
                &[
                    ("symbol", ticker),
                    ("exchange", exchange),
                    ("start_date", start_date),
                    ("end_date", end_date),
                ],
            )
            .await?;

        let events = parse_calendar_response(value, ticker);
        tracing::debug!(ticker, count = events.len(), "dividend events retrieved");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_pass_through_verbatim() {
        let value = json!([
            { "symbol": "MGEE", "mic_code": "XNAS", "exchange": "NASDAQ",
              "ex_date": "2025-05-30", "amount": 0.45 }
        ]);

        let events = parse_calendar_response(value, "MGEE");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].mic_code, "XNAS");
        assert_eq!(events[0].ex_date, "2025-05-30");
        assert_eq!(events[0].amount, 0.45);
    }

    #[test]
    fn foreign_symbols_are_filtered_out() {
        let value = json!([
            { "symbol": "MGEE", "ex_date": "2025-05-30", "amount": 0.45 },
            { "symbol": "AEP", "ex_date": "2025-05-09", "amount": 0.93 }
        ]);

        let events = parse_calendar_response(value, "MGEE");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].symbol, "MGEE");
    }

    #[test]
    fn error_document_is_empty_calendar() {
        let value = json!({ "code": 404, "message": "no data" });
        assert!(parse_calendar_response(value, "MGEE").is_empty());
    }
}
