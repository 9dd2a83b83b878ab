//! Renderers that turn fetched records into view contents
//!
//! Each renderer replaces its view entirely; rows keep the order the backend sent.

use crate::consts::cli_consts::messages::SUPERVISOR_PLACEHOLDER;
use crate::models::{Stats, Student, Supervisor, Topic, display_or_dash};
use crate::ui::table::{ActionButton, RowAction, TableRow, TableView};
use crate::ui::views::{Dropdown, StatsView};

pub fn populate_students_table(table: &mut TableView, students: &[Student]) {
    table.clear();

    for student in students {
        let status = student.status();
        table.push_row(TableRow::new(
            vec![
                display_or_dash(Some(&student.full_name)),
                display_or_dash(student.topic()),
                display_or_dash(student.supervisor()),
                status.label().to_string(),
            ],
            status.badge(),
            vec![ActionButton::new(
                RowAction::AssignToStudent(student.id.clone()),
                student.has_topic(),
            )],
        ));
    }

    table.refilter();
}

pub fn populate_topics_table(table: &mut TableView, topics: &[Topic]) {
    table.clear();

    for topic in topics {
        table.push_row(TableRow::new(
            vec![
                display_or_dash(Some(&topic.title)),
                display_or_dash(topic.subject.as_deref()),
                display_or_dash(topic.work_type.as_deref()),
                topic.status.label().to_string(),
            ],
            topic.status.badge(),
            vec![
                ActionButton::new(RowAction::ViewTopicDetails(topic.id.clone()), false),
                ActionButton::new(RowAction::AssignTopic(topic.id.clone()), !topic.is_free()),
            ],
        ));
    }

    table.refilter();
}

pub fn populate_supervisors_dropdown(dropdown: &mut Dropdown, supervisors: &[Supervisor]) {
    dropdown.reset(SUPERVISOR_PLACEHOLDER);
    for supervisor in supervisors {
        dropdown.push(supervisor.id.as_str(), supervisor.label(), false);
    }
}

pub fn update_statistics(view: &mut StatsView, stats: &Stats) {
    view.total_students = stats.total_students.unwrap_or(0);
    view.assigned_topics = stats.assigned_topics.unwrap_or(0);
    view.free_topics = stats.free_topics.unwrap_or(0);
    view.available_supervisors = stats.available_supervisors.unwrap_or(0);
}
