//! Students and topics tables
//!
//! Each table shows its visible rows, a status badge per row, the row buttons
//! and, above the body, the search line.

use super::super::state::{DashboardState, InputMode};
use super::super::utils::{action_label, badge_color};
use crate::ui::table::{TableId, TableView};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

pub fn render_tables(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_table(f, chunks[0], state, TableId::Students);
    render_table(f, chunks[1], state, TableId::Topics);
}

fn render_table(f: &mut Frame, area: Rect, state: &DashboardState, id: TableId) {
    let table = state.views.table(id);
    let focused = state.focus == id && !state.views.modal.is_open();
    let searching = state.input_mode == InputMode::Search(id);

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let title = match id {
        TableId::Students => "СТУДЕНТЫ",
        TableId::Topics => "ТЕМЫ",
    };
    let block = Block::default()
        .title(format!(
            "{} ({}/{})",
            title,
            table.visible_count(),
            table.rows.len()
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(inner);

    f.render_widget(search_line(table, searching), chunks[0]);

    let mut table_state = TableState::default();
    if focused && table.visible_count() > 0 {
        table_state.select(Some(table.selected()));
    }
    f.render_stateful_widget(body(table), chunks[1], &mut table_state);
}

fn search_line(table: &TableView, searching: bool) -> Paragraph<'_> {
    let style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if searching { "▏" } else { "" };
    Paragraph::new(Line::from(vec![
        Span::styled("🔍 ", style),
        Span::styled(format!("{}{}", table.query, cursor), style),
    ]))
}

fn body(table: &TableView) -> Table<'_> {
    let header = Row::new(table.headers.iter().copied())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows = table.visible_rows().map(|row| {
        let last = row.cells.len().saturating_sub(1);
        let mut cells: Vec<Cell> = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, text)| {
                if i == last {
                    Cell::from(text.as_str()).style(Style::default().fg(badge_color(row.badge)))
                } else {
                    Cell::from(text.as_str())
                }
            })
            .collect();

        let buttons: Vec<Span> = row
            .actions
            .iter()
            .map(|button| {
                let style = if button.disabled {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::LightGreen)
                };
                Span::styled(format!("[{}] ", action_label(&button.action)), style)
            })
            .collect();
        cells.push(Cell::from(Line::from(buttons)));
        Row::new(cells)
    });

    let widths = match table.id {
        TableId::Students => [
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(18),
        ],
        TableId::Topics => [
            Constraint::Percentage(28),
            Constraint::Percentage(16),
            Constraint::Percentage(14),
            Constraint::Percentage(12),
            Constraint::Percentage(30),
        ],
    };

    Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
}
