use crate::api::error::ApiError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Severity of a failed read (stats, tables, dropdowns, topic details).
    pub fn classify_read_error(&self, error: &ApiError) -> LogLevel {
        // Backend and dashboard disagree on the payload
        if let ApiError::Decode(_) = error {
            return LogLevel::Error;
        }
        match error.status() {
            // Session handling lives outside the dashboard; worth flagging loudly
            Some(401 | 403) => LogLevel::Error,
            // Server hiccups, missing records and unreachable hosts
            _ => LogLevel::Warn,
        }
    }

    /// Severity of a rejected assignment.
    pub fn classify_write_error(&self, error: &ApiError) -> LogLevel {
        match error.status() {
            // The backend refused the combination (topic taken, unknown ids, ...)
            Some(400..=499) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
