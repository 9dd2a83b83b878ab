//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event;
use crate::logging::LogLevel;
use crate::sync::{DataSync, Generation, RequestCounters, Resource, Update};
use crate::ui::app::UIConfig;
use crate::ui::table::TableId;
use crate::ui::views::Views;

use chrono::Local;
use std::collections::VecDeque;
use tokio::task::JoinHandle;

/// Where keystrokes go when no modal is open.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search line of a table.
    Search(TableId),
}

#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard is connected to.
    pub environment: Environment,
    /// Every drawable region.
    pub views: Views,
    /// Queue of responses waiting to be applied
    pub pending_updates: VecDeque<Update>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Table that receives navigation keys.
    pub focus: TableId,
    pub input_mode: InputMode,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Least severe activity-log entry that is drawn, from `RUST_LOG`.
    pub log_threshold: LogLevel,

    /// Timestamp of the last full sync that was started
    last_sync: Option<String>,
    counters: RequestCounters,
    sync: DataSync,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(sync: DataSync, ui_config: UIConfig) -> Self {
        Self {
            environment: sync.api().environment().clone(),
            views: Views::new(),
            pending_updates: VecDeque::new(),
            activity_logs: VecDeque::new(),
            focus: TableId::Students,
            input_mode: InputMode::Normal,
            with_background_color: ui_config.with_background_color,
            log_threshold: ui_config.log_threshold,
            last_sync: None,
            counters: RequestCounters::new(),
            sync,
        }
    }

    pub fn last_sync(&self) -> Option<&str> {
        self.last_sync.as_deref()
    }

    pub fn counters(&self) -> &RequestCounters {
        &self.counters
    }

    /// Starts a full sync: four independent reads, each tagged with a fresh generation.
    pub fn start_full_sync(&mut self) -> Vec<JoinHandle<()>> {
        self.last_sync = Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        self.sync.load_data(&mut self.counters)
    }

    /// Whether a response of `generation` may replace what `resource` shows now.
    pub fn accept_response(&mut self, resource: Resource, generation: Generation) -> bool {
        self.counters.accept(resource, generation)
    }

    pub fn sync(&self) -> &DataSync {
        &self.sync
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add a response to the processing queue
    pub fn add_update(&mut self, update: Update) {
        self.pending_updates.push_back(update);
    }
}
