//! View registry
//!
//! Every region the dashboard draws into, built once at startup and handed to the
//! renderers and controllers by reference.

use crate::consts::cli_consts::messages::SUPERVISOR_PLACEHOLDER;
use crate::models::AssignmentRequest;
use crate::ui::modal::AssignModal;
use crate::ui::notifications::ToastStack;
use crate::ui::table::{TableId, TableView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

/// A select box: a leading placeholder with an empty value, then real options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    options: Vec<DropdownOption>,
    selected: usize,
}

impl Dropdown {
    pub fn new(placeholder: &str) -> Self {
        let mut dropdown = Self {
            options: Vec::new(),
            selected: 0,
        };
        dropdown.reset(placeholder);
        dropdown
    }

    /// Replaces all options with the placeholder alone.
    pub fn reset(&mut self, placeholder: &str) {
        self.options = vec![DropdownOption {
            value: String::new(),
            label: placeholder.to_string(),
        }];
        self.selected = 0;
    }

    pub fn push(&mut self, value: impl Into<String>, label: impl Into<String>, selected: bool) {
        self.options.push(DropdownOption {
            value: value.into(),
            label: label.into(),
        });
        if selected {
            self.selected = self.options.len() - 1;
        }
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Value of the selected option; empty while the placeholder is selected.
    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|option| option.value.as_str())
            .unwrap_or_default()
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|option| option.label.as_str())
            .unwrap_or_default()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.options.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Selects the option carrying `value`. Returns false and keeps the
    /// current selection when there is none.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| option.value == value) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }
}

/// The four stat cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsView {
    pub total_students: u64,
    pub assigned_topics: u64,
    pub free_topics: u64,
    pub available_supervisors: u64,
}

impl StatsView {
    /// Card captions paired with their values, in display order.
    pub fn cards(&self) -> [(&'static str, u64); 4] {
        [
            ("Всего студентов", self.total_students),
            ("Назначено тем", self.assigned_topics),
            ("Свободных тем", self.free_topics),
            ("Руководителей", self.available_supervisors),
        ]
    }
}

#[derive(Debug)]
pub struct Views {
    pub stats: StatsView,
    pub students: TableView,
    pub topics: TableView,
    /// Supervisor select of the assignment form.
    pub supervisors: Dropdown,
    pub modal: AssignModal,
    pub toasts: ToastStack,
}

impl Views {
    pub fn new() -> Self {
        Self {
            stats: StatsView::default(),
            students: TableView::new(
                TableId::Students,
                vec!["ФИО", "Тема", "Руководитель", "Статус", "Действия"],
            ),
            topics: TableView::new(
                TableId::Topics,
                vec!["Тема", "Предмет", "Тип работы", "Статус", "Действия"],
            ),
            supervisors: Dropdown::new(SUPERVISOR_PLACEHOLDER),
            modal: AssignModal::new(),
            toasts: ToastStack::new(),
        }
    }

    pub fn table(&self, id: TableId) -> &TableView {
        match id {
            TableId::Students => &self.students,
            TableId::Topics => &self.topics,
        }
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut TableView {
        match id {
            TableId::Students => &mut self.students,
            TableId::Topics => &mut self.topics,
        }
    }

    /// Reads the three form fields as they are; validity is the backend's call.
    pub fn assignment_request(&self) -> AssignmentRequest {
        AssignmentRequest {
            topic_id: self.modal.topic_id.trim().to_string(),
            student_id: self.modal.students.value().to_string(),
            supervisor_id: self.supervisors.value().to_string(),
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a search query to one table.
pub fn filter_table(views: &mut Views, query: &str, table: TableId) {
    views.table_mut(table).apply_filter(query);
}
