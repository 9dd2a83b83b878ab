//! Dashboard footer component
//!
//! Renders the key bindings of the current input mode

use super::super::state::{DashboardState, InputMode};

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = if state.views.modal.is_open() {
        "[Tab] Поле | [↑↓] Выбор | [Enter] Назначить | [Esc] Отмена"
    } else {
        match state.input_mode {
            InputMode::Search(_) => "Поиск: введите текст | [Enter/Esc] Готово",
            InputMode::Normal => {
                "[S/T] Таблица | [↑↓] Строка | [/] Поиск | [A] Назначить | [V] Детали | [R] Обновить | [Q] Выход"
            }
        }
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
