//! Table views and the search filter
//!
//! A table body is rebuilt wholesale on every render; filtering only toggles row
//! visibility and always looks at the full row set.

use crate::models::{Badge, EntityId};

/// The searchable tables of the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum TableId {
    #[strum(to_string = "studentsTable")]
    Students,
    #[strum(to_string = "topicsTable")]
    Topics,
}

impl TableId {
    pub fn other(self) -> Self {
        match self {
            TableId::Students => TableId::Topics,
            TableId::Topics => TableId::Students,
        }
    }
}

/// What a row button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    AssignToStudent(EntityId),
    AssignTopic(EntityId),
    ViewTopicDetails(EntityId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: RowAction,
    pub disabled: bool,
}

impl ActionButton {
    pub fn new(action: RowAction, disabled: bool) -> Self {
        Self { action, disabled }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Visible cell texts, status badge label included.
    pub cells: Vec<String>,
    pub badge: Badge,
    pub actions: Vec<ActionButton>,
    pub visible: bool,
}

impl TableRow {
    pub fn new(cells: Vec<String>, badge: Badge, actions: Vec<ActionButton>) -> Self {
        Self {
            cells,
            badge,
            actions,
            visible: true,
        }
    }

    /// Case-insensitive substring match over every cell.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.to_lowercase().contains(query_lower))
    }

    /// The first action of the given kind that is currently enabled.
    pub fn enabled_action(&self, wanted: fn(&RowAction) -> bool) -> Option<&RowAction> {
        self.actions
            .iter()
            .find(|button| wanted(&button.action))
            .filter(|button| !button.disabled)
            .map(|button| &button.action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub id: TableId,
    pub headers: Vec<&'static str>,
    pub rows: Vec<TableRow>,
    /// Current search text for this table.
    pub query: String,
    /// Cursor position among the visible rows.
    selected: usize,
}

impl TableView {
    pub fn new(id: TableId, headers: Vec<&'static str>) -> Self {
        Self {
            id,
            headers,
            rows: Vec::new(),
            query: String::new(),
            selected: 0,
        }
    }

    /// Drops every row, as clearing a table body does.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.selected = 0;
    }

    pub fn push_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Hides every row that does not contain `query`; an empty query shows all rows.
    pub fn apply_filter(&mut self, query: &str) {
        self.query = query.to_string();
        let needle = query.to_lowercase();
        for row in &mut self.rows {
            row.visible = row.matches(&needle);
        }
        self.clamp_selection();
    }

    /// Re-runs the current query, e.g. after the body was rebuilt.
    pub fn refilter(&mut self) {
        let query = std::mem::take(&mut self.query);
        self.apply_filter(&query);
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|row| row.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&TableRow> {
        self.visible_rows().nth(self.selected)
    }

    pub fn select_next(&mut self) {
        let count = self.visible_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        self.selected = if count == 0 {
            0
        } else {
            self.selected.min(count - 1)
        };
    }
}
