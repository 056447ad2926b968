use std::env;
use std::process::ExitCode;

use tracing::{info, warn};

use CircularQueueMini::core::config::StressConfig;
use CircularQueueMini::core::log::{append_logs, Logger};
use CircularQueueMini::core::stress::stress_kind;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Optional JSON config path as the only argument
    let config = match env::args().nth(1) {
        Some(path) => match StressConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, %path, "failed to load stress config");
                return ExitCode::FAILURE;
            }
        },
        None => StressConfig::default(),
    };

    let mut logger = Logger::new();
    for &kind in &config.kinds {
        match stress_kind(kind, &config, &mut logger) {
            Ok(report) => info!(
                %kind,
                rounds = report.rounds,
                appended = report.appended,
                rejected = report.rejected,
                evicted = report.evicted,
                millis = report.elapsed_micros / 1000,
                "stress report"
            ),
            Err(err) => {
                warn!(%err, %kind, "stress run failed");
                return ExitCode::FAILURE;
            }
        }
    }

    // Append the round log as NDJSON
    if let Some(path) = &config.report_path {
        if let Err(err) = append_logs(logger.entries(), path) {
            warn!(%err, %path, "failed to write round log");
            return ExitCode::FAILURE;
        }
        info!(%path, entries = logger.entries().len(), "round log written");
    }
    ExitCode::SUCCESS
}
