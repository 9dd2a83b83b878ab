//! Dashboard main renderer

use super::components::{footer, header, logs, modal, tables, toasts};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;
use std::time::Instant;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState, now: Instant) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    tables::render_tables(f, main_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);

    // Overlays
    modal::render_assign_modal(f, f.area(), state);
    if !state.views.toasts.is_empty() {
        toasts::render_toasts(f, f.area(), state, now);
    }
}
