// Copyright 2025 Martin Pool

//! Browse AWS Lambda and SQS CloudWatch logs from the terminal.
//!
//! # Concepts
//!
//! A *log group* holds many *log streams*, one per Lambda execution environment. `cwlens`
//! lists the most recently active streams of a group and prints one stream, or all of them
//! merged by time.
//!
//! SQS queues don't log to CloudWatch themselves, so browsing a queue shows the logs of the
//! Lambda functions that consume it.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schemars::schema_for;
use tempfile::NamedTempFile;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::{Layer, filter::filter_fn, fmt, layer::SubscriberExt};

mod cloud;
mod config;
mod credentials;
mod display;
mod error;
mod logs;
mod paginate;
mod regions;
mod resources;
mod screen;
mod select;
mod shorttime;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::screen::{BrowseArgs, LogsArgs};

static TOOL_NAME: &str = "cwlens";

#[derive(Parser)]
#[command(name = "cwlens", version)]
#[command(about = "Browse AWS Lambda and SQS CloudWatch logs from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to cwlens configuration file.
    ///
    /// If not provided, the default is ~/.config/cwlens.toml. If that does
    /// not exist, built-in defaults will be used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs on stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a region, service, and log stream (the default)
    #[command(visible_alias = "b")]
    Browse(BrowseArgs),

    /// Print recent events from a log group without prompting
    Logs(LogsArgs),

    /// Print the JSON schema for the configuration file.
    ConfigSchema {},
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);
    match inner_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_interrupt() => {
            println!("Cancelled.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn inner_main(cli: Cli) -> Result<()> {
    let config = Config::new(cli.config.as_deref())?;
    debug!(?config);

    match cli.command {
        None => screen::browse(&BrowseArgs::default(), &config).await,
        Some(Commands::Browse(args)) => screen::browse(&args, &config).await,
        Some(Commands::Logs(args)) => screen::logs(&args, &config).await,
        Some(Commands::ConfigSchema {}) => {
            let schema = serde_json::to_string_pretty(&schema_for!(Config))
                .map_err(|err| Error::Config(err.to_string()))?;
            println!("{schema}");
            Ok(())
        }
    }
}

/// Log our own events at debug level to a kept temporary file, and warnings (or everything,
/// if verbose) to stderr.
///
/// Failing to make the log file only loses the file layer.
fn setup_tracing(verbose: bool) {
    let log_file = NamedTempFile::with_prefix(format!("{TOOL_NAME}-"))
        .and_then(|tmp| tmp.keep().map_err(|err| err.error));
    let (file_layer, log_path) = match log_file {
        Ok((file, path)) => (Some(debug_file_layer(file)), Some(path)),
        Err(err) => {
            eprintln!("Failed to create log file: {err}");
            (None, None)
        }
    };
    let stderr_layer = fmt::Layer::new()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(|metadata| metadata.target().starts_with(TOOL_NAME)))
        .with_filter(if verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        });
    let subscriber = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize tracing: {err}");
    }
    if let Some(log_path) = log_path {
        debug!("Tracing initialized to file {}", log_path.display());
    }
}

fn debug_file_layer<S>(log_file: File) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    fmt::Layer::new()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_writer(log_file)
        .with_filter(filter_fn(|metadata| {
            // AWS SDK logs are very verbose so we only keep our own.
            metadata.target().starts_with(TOOL_NAME)
        }))
        .with_filter(LevelFilter::DEBUG)
}
