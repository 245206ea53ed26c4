//! Cardiorisk CLI: serve the heart-disease prediction API or talk to one.

mod client;
mod commands;

use cardiorisk_core::config::LoggingConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Cardiorisk: heart disease risk prediction
#[derive(Parser, Debug)]
#[command(name = "cardiorisk", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (searched for cardiorisk.toml)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Load the model and serve the prediction API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Path to the model artifact
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Send a clinical record to a running service and print the risk label
    Predict {
        /// JSON file holding one clinical record
        #[arg(short, long)]
        input: PathBuf,
        /// Base URL of the service (defaults to the configured server address)
        #[arg(long)]
        url: Option<String>,
    },
    /// Request a full assessment and write a text report
    Assess {
        /// JSON file holding one clinical record
        #[arg(short, long)]
        input: PathBuf,
        /// Base URL of the service (defaults to the configured server address)
        #[arg(long)]
        url: Option<String>,
        /// Report file (defaults to heart_assessment_<timestamp>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode a clinical record locally and print the feature vector
    Encode {
        /// JSON file holding one clinical record
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the feature schema the classifier expects
    Schema,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved configuration as TOML
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let config = cardiorisk_core::load_config(Some(&workspace), cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    let _guard = init_tracing(cli.verbose, cli.quiet, &config.logging);

    commands::handle_command(cli.command, config).await
}

/// Human-readable stderr logging plus optional JSON file logging.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(verbose: u8, quiet: bool, logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 if quiet => "error",
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let (json_layer, guard) = if logging.json_file {
        let log_dir = logging
            .log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("dev", "cardiorisk", "cardiorisk")
                    .map(|d| d.data_dir().join("logs"))
            })
            .unwrap_or_else(|| PathBuf::from("."));
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "cardiorisk.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_filter(EnvFilter::new("debug"));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
