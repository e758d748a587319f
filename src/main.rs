// Standard library
use std::process::ExitCode;
use std::sync::Arc;

// 3rd party crates
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project imports
use crpt_client::functions::{run, BatchReport};
use crpt_client::settings::ConfigManager;

/// Crates whose own logging is only interesting when it reports an error.
const QUIET_CRATES: [&str; 3] = ["hyper", "hyper_util", "reqwest"];

/// Submits the configured document repeatedly through the rate-limited client.
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv_override().ok();

    let config = match ConfigManager::new().await {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.get_log_level().await);
    info!("⚙️ Settings have been loaded.");

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(forward_ctrl_c(shutdown_tx));

    match run(config, shutdown_rx).await {
        Ok(report) => summarize(&report),
        Err(e) => {
            error!("Batch aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = QUIET_CRATES.iter().fold(
        EnvFilter::builder()
            .with_default_directive(LevelFilter::ERROR.into())
            .parse_lossy(level),
        |filter, krate| match format!("{krate}=error").parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        },
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .init();
}

/// Turns Ctrl+C into a shutdown broadcast.
async fn forward_ctrl_c(shutdown_tx: broadcast::Sender<()>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Received Ctrl+C, stopping the batch...");
    // No receiver left means the batch already finished.
    let _ = shutdown_tx.send(());
}

fn summarize(report: &BatchReport) -> ExitCode {
    info!(
        "📨 {} of {} documents accepted",
        report.succeeded,
        report.total()
    );

    if report.failed > 0 {
        warn!("{} submissions failed after spending a permit", report.failed);
    }

    ExitCode::SUCCESS
}
