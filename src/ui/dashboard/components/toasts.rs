//! Toast notifications, drawn in the top-right corner

use super::super::state::DashboardState;
use super::super::utils::severity_color;
use crate::ui::notifications::Severity;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use std::time::Instant;

const MIN_TOAST_WIDTH: u16 = 44;
const MAX_TOAST_WIDTH: u16 = 72;
/// Border plus one column of air on each side.
const TOAST_CHROME: u16 = 4;

/// Outer size of a toast holding `text`: as wide as the text allows, then taller
/// when the frame is too narrow for one line.
fn toast_size(text: &str, area: Rect) -> (u16, u16) {
    let text_width = u16::try_from(Line::from(text).width()).unwrap_or(u16::MAX);
    let width = text_width
        .saturating_add(TOAST_CHROME)
        .clamp(MIN_TOAST_WIDTH, MAX_TOAST_WIDTH)
        .min(area.width);
    let inner = width.saturating_sub(TOAST_CHROME).max(1);
    // Word wrapping can spill one line more than the plain division.
    let lines = if text_width <= inner {
        1
    } else {
        text_width.div_ceil(inner) + 1
    };
    (width, lines + 2)
}

pub fn render_toasts(f: &mut Frame, area: Rect, state: &DashboardState, now: Instant) {
    let mut y = area.y + 1;
    for (_, toast, phase) in state.views.toasts.visible(now) {
        let icon = match toast.severity {
            Severity::Success => "✅",
            Severity::Error => "❌",
        };
        let text = format!("{} {}", icon, toast.message);
        let (width, height) = toast_size(&text, area);
        if y + height > area.bottom() {
            break;
        }

        // Slide horizontally: the hidden part is pushed past the right edge.
        let hidden = (phase.hidden_fraction() * f64::from(width)).round() as u16;
        let shown = width.saturating_sub(hidden);
        let rect = Rect::new(area.right() - shown, y, shown, height);
        y += height;
        if shown == 0 {
            continue;
        }

        let color = severity_color(toast.severity);
        let widget = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}
