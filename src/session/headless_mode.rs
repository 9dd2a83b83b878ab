//! Headless mode execution
//!
//! One-shot commands that reuse the dashboard's views and request paths but print
//! to stdout instead of drawing a terminal UI.

use super::{SessionData, announce};
use crate::consts::cli_consts::messages::{ASSIGN_FAILED_PREFIX, ASSIGN_FAILED_REASON, ASSIGN_SUCCESS};
use crate::events::EventType;
use crate::models::{AssignmentRequest, EntityId};
use crate::sync::snapshot::Snapshot;
use crate::sync::{AssignmentOutcome, Update};
use crate::ui::renderers::{
    populate_students_table, populate_supervisors_dropdown, populate_topics_table,
    update_statistics,
};
use crate::ui::table::TableView;
use crate::ui::views::{Dropdown, StatsView, Views};
use crate::{print_cmd_error, print_cmd_success};
use std::error::Error;
use std::fmt::Write;

/// Runs one full sync and prints the four results.
///
/// Each read is reported on its own; a failed one does not hide the others.
pub async fn run_snapshot(session: SessionData) -> Result<(), Box<dyn Error>> {
    announce("snapshot", &session.environment);

    let snapshot = Snapshot::fetch(session.sync.api().as_ref()).await;
    let mut views = Views::new();

    match &snapshot.stats {
        Ok(stats) => {
            update_statistics(&mut views.stats, stats);
            print!("{}", format_stats(&views.stats));
        }
        Err(e) => print_cmd_error!("Статистика недоступна", e.to_string().as_str()),
    }
    match &snapshot.students {
        Ok(students) => {
            populate_students_table(&mut views.students, students);
            print!("{}", format_table("Студенты", &views.students));
        }
        Err(e) => print_cmd_error!("Студенты недоступны", e.to_string().as_str()),
    }
    match &snapshot.topics {
        Ok(topics) => {
            populate_topics_table(&mut views.topics, topics);
            print!("{}", format_table("Темы", &views.topics));
        }
        Err(e) => print_cmd_error!("Темы недоступны", e.to_string().as_str()),
    }
    match &snapshot.supervisors {
        Ok(supervisors) => {
            populate_supervisors_dropdown(&mut views.supervisors, supervisors);
            print!("{}", format_dropdown("Руководители", &views.supervisors));
        }
        Err(e) => print_cmd_error!("Руководители недоступны", e.to_string().as_str()),
    }

    match snapshot.failures() {
        0 => {
            print_cmd_success!("Snapshot complete", "");
            Ok(())
        }
        n => Err(format!("{} of 4 reads failed", n).into()),
    }
}

/// Sends one assignment and waits for the backend's answer.
pub async fn run_assign(
    mut session: SessionData,
    request: AssignmentRequest,
) -> Result<(), Box<dyn Error>> {
    announce("assign", &session.environment);
    // No form here: the answer is tagged with a placeholder opening.
    let _handle = session.sync.assign_topic(request, 0);

    while let Some(update) = session.update_receiver.recv().await {
        match update {
            Update::Log(event) => println!("{}", event),
            Update::AssignmentFinished {
                outcome: AssignmentOutcome::Assigned,
                ..
            } => {
                print_cmd_success!(ASSIGN_SUCCESS, "");
                return Ok(());
            }
            Update::AssignmentFinished {
                outcome: AssignmentOutcome::Rejected,
                ..
            } => {
                return Err(format!("{}{}", ASSIGN_FAILED_PREFIX, ASSIGN_FAILED_REASON).into());
            }
            other => log::debug!("ignoring unrelated update: {:?}", other),
        }
    }
    Err("assignment task ended without an answer".into())
}

/// Fetches one topic and prints what the dashboard would log for it.
pub async fn run_topic_details(
    mut session: SessionData,
    topic_id: EntityId,
) -> Result<(), Box<dyn Error>> {
    if topic_id.is_empty() {
        return Err("topic id is empty".into());
    }
    let _handle = session.sync.view_topic_details(topic_id);

    match session.update_receiver.recv().await {
        Some(Update::Log(event)) => {
            println!("{}", event);
            if event.event_type == EventType::Error {
                return Err(event.msg.into());
            }
            Ok(())
        }
        Some(other) => Err(format!("unexpected update: {:?}", other).into()),
        None => Err("topic lookup ended without an answer".into()),
    }
}

fn format_stats(stats: &StatsView) -> String {
    let mut out = String::new();
    for (caption, value) in stats.cards() {
        let _ = writeln!(out, "{:<18} {}", caption, value);
    }
    out.push('\n');
    out
}

/// Plain-text rendering of the visible rows. The action column is left out.
fn format_table(title: &str, table: &TableView) -> String {
    let columns = table
        .rows
        .first()
        .map(|row| row.cells.len())
        .unwrap_or(table.headers.len() - 1)
        .min(table.headers.len());
    let headers = &table.headers[..columns];

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in table.visible_rows() {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "== {} ({}) ==", title, table.visible_count());
    let _ = writeln!(out, "{}", pad_line(headers.iter().copied(), &widths));
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in table.visible_rows() {
        let _ = writeln!(out, "{}", pad_line(row.cells.iter().map(String::as_str), &widths));
    }
    out.push('\n');
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn format_dropdown(title: &str, dropdown: &Dropdown) -> String {
    let options = &dropdown.options()[1..];
    let mut out = String::new();
    let _ = writeln!(out, "== {} ({}) ==", title, options.len());
    for option in options {
        let _ = writeln!(out, "{:>6}  {}", option.value, option.label);
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stats, Student, Supervisor};

    #[test]
    fn stats_print_one_card_per_line() {
        let mut view = StatsView::default();
        update_statistics(
            &mut view,
            &Stats {
                total_students: Some(12),
                ..Stats::default()
            },
        );
        let text = format_stats(&view);
        assert_eq!(text.trim_end().lines().count(), 4);
        assert!(text.lines().next().unwrap().ends_with(" 12"));
    }

    #[test]
    fn table_columns_are_aligned_and_filter_is_respected() {
        let mut views = Views::new();
        populate_students_table(
            &mut views.students,
            &[
                Student {
                    id: EntityId::new("1"),
                    full_name: "Иванов Иван".to_string(),
                    topic: None,
                    supervisor: None,
                },
                Student {
                    id: EntityId::new("2"),
                    full_name: "Петров".to_string(),
                    topic: Some("Компиляторы".to_string()),
                    supervisor: Some("Сидоров".to_string()),
                },
            ],
        );
        views.students.apply_filter("петров");

        let text = format_table("Студенты", &views.students);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Студенты (1) ==");
        assert_eq!(lines[1], "ФИО     Тема         Руководитель  Статус");
        assert_eq!(lines[3], "Петров  Компиляторы  Сидоров       Назначена");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn supervisors_skip_the_placeholder() {
        let mut dropdown = Dropdown::new("placeholder");
        populate_supervisors_dropdown(
            &mut dropdown,
            &[Supervisor {
                id: EntityId::new("4"),
                full_name: "Смирнова А.".to_string(),
                department: "ИВТ".to_string(),
            }],
        );
        let text = format_dropdown("Руководители", &dropdown);
        assert_eq!(text, "== Руководители (1) ==\n     4  Смирнова А. (ИВТ)\n\n");
    }
}
