//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the RankBuddy core.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// Returns the appender guard; dropping it stops the background writer,
/// so the caller must hold it for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "rankbuddy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log quota decisions with structured data
pub fn log_quota_decision(resource: &str, plan: &str, used: u32, granted: bool) {
    if granted {
        debug!(
            resource = resource,
            plan = plan,
            used = used,
            "Quota consumption granted"
        );
    } else {
        warn!(
            resource = resource,
            plan = plan,
            used = used,
            "Quota consumption denied"
        );
    }
}

/// Log locale changes
pub fn log_locale_change(from: &str, to: &str, persisted: bool) {
    info!(
        from = from,
        to = to,
        persisted = persisted,
        "Active locale changed"
    );
}

/// Log storage degradation events
pub fn log_storage_degraded(key: &str, operation: &str, error: &str) {
    warn!(
        key = key,
        operation = operation,
        error = error,
        "Storage unavailable, continuing with in-memory state"
    );
}
