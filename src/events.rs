//! Activity log events
//!
//! What the dashboard records about its own requests, shown in the activity panel
//! and printed line by line in headless mode.

use crate::logging::LogLevel;
use chrono::Local;
use std::fmt::Display;

/// The part of the dashboard an event originates from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    Stats,
    Students,
    Topics,
    Supervisors,
    /// Student options of the assignment form.
    AssignForm,
    Assignment,
    TopicDetails,
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        // Mirror to the `log` facade so a configured logger sees the same stream.
        log::log!(log::Level::from(log_level), "[{}] {}", source, msg);
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn success(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Success, LogLevel::Info)
    }

    pub fn refresh(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Refresh, LogLevel::Debug)
    }

    pub fn info(source: Source, msg: impl Into<String>) -> Self {
        Self::new(source, msg.into(), EventType::Info, LogLevel::Info)
    }

    pub fn error(source: Source, msg: impl Into<String>, log_level: LogLevel) -> Self {
        Self::new(source, msg.into(), EventType::Error, log_level)
    }

    /// Successes, warnings and errors are always drawn; chatter below `info`
    /// only when `threshold` lets it through.
    pub fn should_display(&self, threshold: LogLevel) -> bool {
        self.event_type == EventType::Success || self.log_level >= threshold.min(LogLevel::Info)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_and_successes_are_displayed() {
        assert!(Event::success(Source::Assignment, "ok").should_display(LogLevel::Error));
        assert!(Event::error(Source::Topics, "boom", LogLevel::Warn).should_display(LogLevel::Error));
    }

    #[test]
    fn refresh_chatter_needs_debug() {
        let event = Event::refresh(Source::Students, "Загружено записей: 3");
        assert!(!event.should_display(LogLevel::Info));
        assert!(event.should_display(LogLevel::Debug));
    }

    #[test]
    fn display_includes_source_and_message() {
        let event = Event::info(Source::TopicDetails, "Детали темы: 3");
        let text = event.to_string();
        assert!(text.starts_with("Info ["));
        assert!(text.ends_with("TopicDetails: Детали темы: 3"));
    }
}
