pub mod headless_mode;
pub mod setup;
pub mod tui_mode;

pub use headless_mode::{run_assign, run_snapshot, run_topic_details};
pub use setup::{SessionData, setup_session};
pub use tui_mode::run_tui_mode;

use crate::environment::Environment;
use crate::print_cmd_info;

/// One line on stdout before a session talks to the backend.
fn announce(mode: &str, environment: &Environment) {
    print_cmd_info!("Starosta", "{} mode, backend {}", mode, environment.api_url());
}
