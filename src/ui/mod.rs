// Module declarations
mod app;
pub mod dashboard;
pub mod modal;
pub mod notifications;
pub mod renderers;
pub mod table;
pub mod views;
// Re-exports for external use
pub use app::{App, UIConfig, run};
