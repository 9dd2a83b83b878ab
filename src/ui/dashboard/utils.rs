//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use crate::models::Badge;
use crate::ui::notifications::Severity;
use crate::ui::table::RowAction;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Color;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Stats => Color::Magenta,
        Source::Students => Color::Cyan,
        Source::Topics => Color::LightBlue,
        Source::Supervisors => Color::Blue,
        Source::AssignForm | Source::Assignment => Color::Yellow,
        Source::TopicDetails => Color::LightGreen,
        Source::Dashboard => Color::Gray,
    }
}

pub fn badge_color(badge: Badge) -> Color {
    match badge {
        Badge::Free => Color::Green,
        Badge::Taken => Color::Yellow,
        Badge::Assigned => Color::Cyan,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    }
}

pub fn action_label(action: &RowAction) -> &'static str {
    match action {
        RowAction::AssignToStudent(_) | RowAction::AssignTopic(_) => "Назначить",
        RowAction::ViewTopicDetails(_) => "Детали",
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") || msg.contains("Connection refused") {
        if let Some((prefix, _)) = msg.split_once(": ") {
            return format!("{}: сервер недоступен", prefix);
        }
        return "Сервер недоступен".to_string();
    }
    msg.to_string()
}

/// Rectangle of `percent_x` by `height` lines centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Where the assignment form is drawn. Clicks outside it close the form.
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(60, 13, area)
}
