//! Dashboard header component
//!
//! Renders the title line and the four stat cards

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render header with title, backend address and stat cards.
pub fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(4)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let sync_text = match state.last_sync() {
        Some(at) => format!(" | синхронизация {}", at),
        None => String::new(),
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("СТАРОСТА v{}", version),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}{}", state.environment.api_url(), sync_text),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    render_stat_cards(f, header_chunks[1], state);
}

fn render_stat_cards(f: &mut Frame, area: Rect, state: &DashboardState) {
    let cards = state.views.stats.cards();
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, cards.len() as u32); 4])
        .split(area);

    for ((caption, value), chunk) in cards.iter().zip(card_chunks.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*caption, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(card, *chunk);
    }
}
