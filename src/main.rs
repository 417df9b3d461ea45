//! CLI entry point for the NEO feed reporter.
//!
//! Fetches the near-Earth objects approaching today, maps each one to an
//! output record and prints the collection to stdout.

use anyhow::Result;
use clap::Parser;
use neo_feed::{
    config::{DEFAULT_TIMEOUT, FEED_URL, RequestConfig},
    date::{format_date, parse_date},
    error::FeedError,
    fetch::{BasicClient, fetch_today},
    output::{OutputFormat, append_records, report},
};
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "neo_feed")]
#[command(about = "Print today's near-Earth objects from the NASA NeoWs feed", long_about = None)]
struct Cli {
    /// Day to fetch instead of today's local date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Output format for the printed records
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Optional: CSV file to append the records to
    #[arg(long)]
    csv: Option<String>,

    /// Feed endpoint
    #[arg(long, default_value = FEED_URL)]
    feed_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = match init_logging() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<FeedError>() {
                Some(feed_err) if feed_err.is_transport() => {
                    let url = feed_err.url().unwrap_or(FEED_URL);
                    eprintln!(
                        "Terminating.  Problem Accessing {url} for asteroid information:\n{feed_err}"
                    );
                    error!(url, error = %feed_err, "Feed fetch failed");
                }
                Some(feed_err) if feed_err.is_config() => {
                    eprintln!("Configuration error: {feed_err}");
                    error!(error = %feed_err, "Invalid configuration");
                }
                _ => {
                    eprintln!("Error: {e:#}");
                    error!(error = %e, "Run failed");
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Configure, fetch, map and print. Every failure propagates here
/// untouched so `main` alone picks the exit code.
#[tracing::instrument(skip_all)]
async fn run(cli: Cli) -> Result<()> {
    let mut config = RequestConfig::from_env()?
        .with_url(&cli.feed_url)?
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(date) = &cli.date {
        config = config.with_date(format_date(parse_date(date)?));
    }

    info!(url = %config.url(), date = config.date(), "Fetching near-Earth objects");

    let client = BasicClient::new(config.timeout()).map_err(|e| FeedError::Transport {
        url: config.url().to_string(),
        source: e,
    })?;
    let objects = fetch_today(&client, &config).await?;

    let stdout = std::io::stdout();
    let records = report(&objects, cli.format, &mut stdout.lock())?;

    if let Some(path) = &cli.csv {
        append_records(path, &records)?;
        info!(path, rows = records.len(), "Records appended to CSV");
    }

    Ok(())
}

/// Colored stderr plus a JSON rolling log file. The returned guard must be
/// held until exit so buffered lines reach the file.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/neo_feed.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("neo_feed.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(file_guard)
}
