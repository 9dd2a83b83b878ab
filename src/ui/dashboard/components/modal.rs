//! Assignment form overlay

use super::super::state::DashboardState;
use super::super::utils::modal_area;
use crate::ui::modal::{ModalField, ModalState};
use crate::ui::views::Dropdown;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

pub fn render_assign_modal(f: &mut Frame, area: Rect, state: &DashboardState) {
    let modal = &state.views.modal;
    if !modal.is_open() {
        return;
    }

    let popup = modal_area(area);
    f.render_widget(Clear, popup);

    let title = match modal.state() {
        ModalState::OpenForStudent { student_id } => {
            format!("НАЗНАЧЕНИЕ ТЕМЫ (студент {})", student_id)
        }
        _ => "НАЗНАЧЕНИЕ ТЕМЫ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(inner);

    let cursor = if modal.focus == ModalField::TopicId { "▏" } else { "" };
    render_field(
        f,
        rows[0],
        "ID темы",
        format!("{}{}", modal.topic_id, cursor),
        modal.focus == ModalField::TopicId,
    );
    render_field(
        f,
        rows[1],
        "Студент",
        select_text(&modal.students),
        modal.focus == ModalField::Student,
    );
    render_field(
        f,
        rows[2],
        "Руководитель",
        select_text(&state.views.supervisors),
        modal.focus == ModalField::Supervisor,
    );

    let status = if modal.is_submitting() {
        Span::styled("Отправка...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("[Enter] Назначить  [Esc] Отмена", Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(Line::from(status)), rows[3]);
}

/// The selected option with its position among the real options.
fn select_text(dropdown: &Dropdown) -> String {
    format!(
        "◂ {} ▸  ({}/{})",
        dropdown.selected_label(),
        dropdown.selected_index(),
        dropdown.options().len().saturating_sub(1)
    )
}

fn render_field(f: &mut Frame, area: Rect, title: &str, value: String, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let field = Paragraph::new(value).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );
    f.render_widget(field, area);
}
