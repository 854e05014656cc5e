//! Claims Workbench - Command Line Binary
//!
//! Queues the given claim documents, runs the simulated claims workflow and
//! prints progress and results as each step completes.
//!
//! # Usage
//!
//! ```bash
//! # Run with the default timing
//! cargo run --bin claims-workbench -- acord-form.pdf rear-bumper.jpg
//!
//! # No delays, JSON lines on stdout
//! cargo run --bin claims-workbench -- --fast --json acord-form.pdf
//!
//! # Abandon the run when the third step starts
//! cargo run --bin claims-workbench -- --abandon-after 3 acord-form.pdf
//! ```
//!
//! # Environment Variables
//!
//! * `WORKBENCH_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `WORKBENCH_BASE_DELAY_MS` - Minimum processing time per step (default: 2000)
//! * `WORKBENCH_JITTER_MS` - Random extra processing time per step (default: 1000)
//! * `WORKBENCH_INTER_STEP_PAUSE_MS` - Pause between steps (default: 500)
//! * `WORKBENCH_EVENT_CAPACITY` - Event buffer size (default: 64)

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::cli::Cli;
use interface_cli::config::WorkbenchConfig;
use interface_cli::documents;
use interface_cli::session::{run_session, OutputFormat, SessionOptions, SessionOutcome};

/// Main entry point for the workbench.
///
/// Initializes logging, loads configuration, queues the documents and drives
/// a single run to completion or abandonment.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - A document path cannot be read
/// - No documents were given
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config();
    if cli.fast {
        config = config.without_delays();
    }

    init_tracing(&config.log_level);

    tracing::info!(
        documents = cli.files.len(),
        base_delay_ms = config.base_delay_ms,
        jitter_ms = config.jitter_ms,
        "Starting claims workbench"
    );

    let mut workbench =
        interface_cli::build_workbench(&config).context("failed to build the workbench")?;
    let queued = documents::describe_paths(&cli.files).context("failed to queue documents")?;
    workbench.upload(queued);
    if let Some(prompt) = cli.prompt {
        workbench.set_prompt(prompt);
    }

    let options = SessionOptions {
        format: if cli.json {
            OutputFormat::JsonLines
        } else {
            OutputFormat::Text
        },
        abandon_after: cli.abandon_after,
    };

    let mut stdout = std::io::stdout().lock();
    let outcome = run_session(&mut workbench, options, shutdown_signal(), &mut stdout).await?;

    match outcome {
        SessionOutcome::Completed(run_id) => tracing::info!(run_id = %run_id, "Run complete"),
        SessionOutcome::Abandoned(run_id) => {
            tracing::info!(run_id = ?run_id.map(|id| id.to_string()), "Run abandoned")
        }
    }
    Ok(())
}

/// Loads configuration from `WORKBENCH_*` environment variables.
///
/// Falls back to defaults if the environment holds invalid values.
fn load_config() -> WorkbenchConfig {
    WorkbenchConfig::from_env().unwrap_or_else(|error| {
        eprintln!("Ignoring invalid workbench configuration: {error}");
        WorkbenchConfig::default()
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so rendered output and JSON lines own stdout.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// The session resets the window when this resolves, abandoning the run.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, abandoning run");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, abandoning run");
        }
    }
}
