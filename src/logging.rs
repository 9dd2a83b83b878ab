//! Verbosity from `RUST_LOG`
//!
//! Read once at startup. The same threshold caps the `log` facade and decides
//! which activity-log entries the dashboard draws.

pub use crate::error_classifier::LogLevel;
use log::LevelFilter;

const RUST_LOG_VAR: &str = "RUST_LOG";

/// Threshold taken from `RUST_LOG`, `info` when unset.
pub fn threshold_from_env() -> LogLevel {
    std::env::var(RUST_LOG_VAR)
        .map(|value| parse_threshold(&value))
        .unwrap_or(LogLevel::Info)
}

/// Only the first directive counts, with or without a target:
/// `starosta_dashboard=debug,reqwest=warn` gives `debug`.
pub fn parse_threshold(rust_log: &str) -> LogLevel {
    let directive = rust_log.split(',').next().unwrap_or_default();
    let level = directive.rsplit('=').next().unwrap_or_default().trim();

    match level.to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

/// Caps the `log` facade at `threshold`.
pub fn apply_threshold(threshold: LogLevel) {
    log::set_max_level(LevelFilter::from(threshold));
}
