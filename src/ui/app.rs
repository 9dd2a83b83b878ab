//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::sync::{DataSync, Update};
use crate::ui::dashboard::{Control, DashboardState, render_dashboard};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::consts::cli_consts::INPUT_POLL_MS;
use crate::logging::LogLevel;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub log_threshold: LogLevel,
}

impl UIConfig {
    pub fn new(with_background_color: bool, log_threshold: LogLevel) -> Self {
        Self {
            with_background_color,
            log_threshold,
        }
    }
}

/// Application state
#[derive(Debug)]
pub struct App {
    dashboard: DashboardState,

    /// Receives responses from request tasks.
    update_receiver: mpsc::Receiver<Update>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(sync: DataSync, update_receiver: mpsc::Receiver<Update>, ui_config: UIConfig) -> Self {
        Self {
            dashboard: DashboardState::new(sync, ui_config),
            update_receiver,
        }
    }
}

/// Runs the dashboard in a loop: apply responses, draw, handle input.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let state = &mut app.dashboard;
    state.load_data();

    loop {
        // Queue all incoming responses for processing
        while let Ok(update) = app.update_receiver.try_recv() {
            state.add_update(update);
        }

        let now = Instant::now();
        state.update(now);
        terminal.draw(|f| render_dashboard(f, state, now))?;

        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                // Skip events that are not KeyEventKind::Press
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if state.handle_key(key) == Control::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    state.handle_click(mouse.column, mouse.row, area);
                }
            }
            _ => {}
        }
    }
}
