//! Stratalis main entry point
//!
//! This is the command-line interface for the Stratalis mayors directory crawler.

use clap::{Parser, ValueEnum};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use stratalis::config::{load_config_with_hash, Config};
use stratalis::crawler::RunContext;
use stratalis::output::CsvSink;
use stratalis::{pipeline, DIRECTORY_URL};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Stratalis: a mayors directory crawler
///
/// Walks every region of the mayors directory, follows its listing pages and
/// writes one CSV row per mayor whose page could be extracted.
#[derive(Parser, Debug)]
#[command(name = "stratalis")]
#[command(version)]
#[command(about = "Extract French mayors' contact details to CSV", long_about = None)]
struct Cli {
    /// Path of the CSV file to write
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Logging verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Stop after about this many mayors
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    limit: Option<u64>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "stratalis=warn,warn",
            Self::Info => "stratalis=info,warn",
            Self::Debug => "stratalis=debug,info",
            Self::Trace => "stratalis=trace,debug",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.log_level, cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((config, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    config
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    let limit = cli.limit.map(|limit| limit as usize);
    handle_run(&config, &cli.output, limit).await
}

/// Sets up the logging/tracing subscriber
///
/// Logs go to stderr, or are appended to `log_file` without colours.
fn setup_logging(level: LogLevel, log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::new(level.directive());

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .init();
        }
    }

    Ok(())
}

/// Handles the crawl and extraction run
async fn handle_run(
    config: &Config,
    output: &Path,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let directory_url = Url::parse(DIRECTORY_URL)?;
    let ctx = RunContext::from_config(config)?;

    tracing::info!(
        "Starting run: output {}, limit {}, max connections {}",
        output.display(),
        limit.map_or_else(|| "none".to_string(), |l| l.to_string()),
        config.http.max_connections
    );

    let mut sink = CsvSink::create(output)?;

    match pipeline::run(&ctx, &directory_url, limit, &mut sink).await {
        Ok(summary) => {
            tracing::info!(
                "Wrote {} records to {}",
                summary.records_extracted,
                output.display()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
