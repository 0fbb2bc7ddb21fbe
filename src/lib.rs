//! # divscan - dividend disclosure extraction for stock tickers
//!
//! divscan combines three external data sources into one JSON document per
//! run: the Twelve Data reference API (ticker identity), its EDGAR filings
//! archive (regulatory filings with exhibit attachments), and its dividend
//! calendar. For each ticker it resolves name and exchange, pulls the
//! filings inside a date window, downloads every `.htm` exhibit and keeps
//! the ones that mention dividends, then merges the result with the
//! structured dividend calendar.
//!
//! ## Design
//!
//! - **Sequential by construction** - symbols, filings and exhibits are
//!   processed one at a time; a fixed pause follows every exhibit download
//!   to stay on the SEC host's good side.
//! - **Skip, never abort** - every remote failure is logged with its
//!   symbol/filing/file context and converted into skipping that unit; a
//!   run always completes and always yields a (possibly empty) result list.
//! - **No retries** - failed calls are not repeated; absence of data is a
//!   valid outcome for the calendar and the archive.
//!
//! ## Basic usage
//!
//! ```ignore
//! use divscan::{Config, Pipeline, RunOptions, TwelveData, UserAgentPool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TwelveData::new(Config::new(std::env::var("TWELVE_DATA_API_KEY")?))?;
//!     let options = RunOptions::new("2025-04-01", "2025-06-30").with_limit(10);
//!     let pipeline = Pipeline::new(client, UserAgentPool::new(), options);
//!
//!     let symbols = vec!["MGEE".to_string(), "AEP".to_string()];
//!     let results = pipeline.run(&symbols).await;
//!
//!     println!("{}", serde_json::to_string_pretty(&results)?);
//!     Ok(())
//! }
//! ```

mod agent;
mod calendar;
mod config;
mod core;
mod error;
mod filings;
mod pipeline;
mod resolver;
mod scanner;
mod traits;

pub use agent::{AgentRotator, UserAgentPool};
pub use calendar::DividendEvent;
pub use config::{BaseUrls, Config};
pub use core::TwelveData;
pub use error::{DivscanError, Result};
pub use filings::{Filing, FilingFile, RawAttachment, RawFiling};
pub use pipeline::{Pipeline, RunOptions, SymbolResult};
pub use resolver::InstrumentInfo;
pub use scanner::{DIVIDEND_MARKER, contains_marker, is_eligible, normalize_url};
pub use traits::{CalendarOperations, FilingOperations, ReferenceOperations};

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
