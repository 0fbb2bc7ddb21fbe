use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use divscan::{Config, Pipeline, RunOptions, TwelveData, UserAgentPool};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "divscan")]
#[command(about = "Extract dividends and SEC reports data for a list of tickers")]
struct Args {
    /// Start date for API requests (YYYY-MM-DD)
    start_date: String,

    /// End date for API requests (YYYY-MM-DD)
    end_date: String,

    /// Limit symbols for processing (0 = no limit)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// CSV file with a symbol_ticker column
    #[arg(long, default_value = "symbols.csv")]
    symbols: PathBuf,

    /// Output file (default: output/dividends_data_<start>_<end>.json)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) -> Result<()> {
    fs::create_dir_all("logs")?;
    let log_path = format!(
        "logs/divscan_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let log_file = fs::File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "divscan=debug" } else { "divscan=info" }));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .init();

    Ok(())
}

/// Reads tickers from the `symbol_ticker` column of the symbols CSV,
/// looked up by header name so column order does not matter. Rows with an
/// empty ticker cell are skipped.
fn load_symbols(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to read symbols file {}", path.display()))?;

    let column = reader
        .headers()
        .context("failed to read symbols file header")?
        .iter()
        .position(|h| h == "symbol_ticker")
        .context("symbols file has no symbol_ticker column")?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse symbols file row")?;
        let ticker = record.get(column).unwrap_or("");
        if ticker.is_empty() {
            continue;
        }
        symbols.push(ticker.to_string());
    }
    Ok(symbols)
}

fn validate_date(value: &str, name: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("{} must be in YYYY-MM-DD format, got '{}'", name, value))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_logging(args.debug)?;

    tracing::info!(
        start_date = %args.start_date,
        end_date = %args.end_date,
        limit = args.limit,
        "starting dividends extractor"
    );

    validate_date(&args.start_date, "start_date")?;
    validate_date(&args.end_date, "end_date")?;

    let api_key = std::env::var("TWELVE_DATA_API_KEY")
        .context("TWELVE_DATA_API_KEY environment variable is required")?;

    let symbols = load_symbols(&args.symbols)?;
    tracing::info!(count = symbols.len(), file = %args.symbols.display(), "loaded symbols");

    let client = TwelveData::new(Config::new(api_key)).context("failed to build API client")?;

    let options = RunOptions::new(&args.start_date, &args.end_date).with_limit(args.limit);
    let pipeline = Pipeline::from_client(client, UserAgentPool::new(), options);

    let results = pipeline.run(&symbols).await;

    let output_path = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "output/dividends_data_{}_{}.json",
            args.start_date, args.end_date
        ))
    });
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = fs::File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    serde_json::to_writer_pretty(file, &results).context("failed to write results")?;

    tracing::info!(
        exported = results.len(),
        output = %output_path.display(),
        "processing complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_validation() {
        assert!(validate_date("2025-04-01", "start_date").is_ok());
        assert!(validate_date("04/01/2025", "start_date").is_err());
        assert!(validate_date("2025-13-01", "start_date").is_err());
    }

    fn write_temp_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn symbols_are_read_by_header_name() {
        // ticker column is not first, and fields are quoted
        let path = write_temp_csv(
            "divscan_symbols_reordered.csv",
            "exchange,symbol_ticker\nNASDAQ,WASH\n\"NYSE\",\"NWN\"\nNASDAQ,\n",
        );
        let symbols = load_symbols(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(symbols, vec!["WASH".to_string(), "NWN".to_string()]);
    }

    #[test]
    fn missing_ticker_column_is_an_error() {
        let path = write_temp_csv(
            "divscan_symbols_no_column.csv",
            "symbol,exchange\nWASH,NASDAQ\n",
        );
        let result = load_symbols(&path);
        fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
