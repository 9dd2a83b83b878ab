//! Session setup and initialization

use crate::api::{ApiClient, DashboardApi};
use crate::consts::cli_consts::UPDATE_QUEUE_SIZE;
use crate::environment::Environment;
use crate::sync::{DataSync, Update};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Issues backend requests and reports back over the update channel
    pub sync: DataSync,
    /// Responses from request tasks
    pub update_receiver: mpsc::Receiver<Update>,
    /// Backend the session talks to
    pub environment: Environment,
}

/// Sets up a session against `env`.
///
/// Builds the HTTP client and the update channel shared by every request task.
/// Nothing is sent to the backend yet.
pub fn setup_session(env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::new(env.clone())?;
    let api: Arc<dyn DashboardApi> = Arc::new(client);
    let (sender, update_receiver) = mpsc::channel(UPDATE_QUEUE_SIZE);

    Ok(SessionData {
        sync: DataSync::new(api, sender),
        update_receiver,
        environment: env,
    })
}
