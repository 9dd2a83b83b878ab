mod api;
#[macro_use]
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod models;
mod session;
mod sync;
mod ui;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::models::{AssignmentRequest, EntityId};
use crate::session::{run_assign, run_snapshot, run_topic_details, run_tui_mode, setup_session};
use crate::ui::UIConfig;
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;

/// Environment variable naming the backend (`local` or a base URL).
const ENVIRONMENT_VAR: &str = "STAROSTA_ENVIRONMENT";
/// Environment variable holding the backend base URL.
const API_URL_VAR: &str = "STAROSTA_API_URL";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Student topic assignment dashboard
struct Args {
    /// Base URL of the backend, e.g. http://localhost:8080
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard
    Start {
        /// Paint the dashboard background
        #[arg(long = "with-background", action = ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Fetch statistics, students, topics and supervisors once and print them
    Snapshot,
    /// Assign a topic to a student
    Assign {
        #[arg(long, value_name = "TOPIC_ID")]
        topic: String,
        #[arg(long, value_name = "STUDENT_ID")]
        student: String,
        #[arg(long, value_name = "SUPERVISOR_ID", default_value = "")]
        supervisor: String,
    },
    /// Show the details of one topic
    Topic {
        #[arg(value_name = "TOPIC_ID")]
        id: String,
    },
    /// Manage the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Save the backend base URL
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Print the saved configuration and the backend that would be used
    Show,
    /// Delete the configuration file
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let log_threshold = logging::threshold_from_env();
    logging::apply_threshold(log_threshold);

    let config_path = get_config_path()?;
    let args = Args::parse();
    let config = Config::load_or_default(&config_path);

    match args.command {
        Command::Start { with_background } => {
            let environment = resolve_environment(args.api_url, &config);
            let session = setup_session(environment)?;
            let ui_config = UIConfig::new(
                with_background || config.with_background_color,
                log_threshold,
            );
            run_tui_mode(session, ui_config).await
        }
        Command::Snapshot => {
            let session = setup_session(resolve_environment(args.api_url, &config))?;
            run_snapshot(session).await
        }
        Command::Assign {
            topic,
            student,
            supervisor,
        } => {
            let session = setup_session(resolve_environment(args.api_url, &config))?;
            let request = AssignmentRequest {
                topic_id: topic.trim().to_string(),
                student_id: student,
                supervisor_id: supervisor,
            };
            run_assign(session, request).await
        }
        Command::Topic { id } => {
            let session = setup_session(resolve_environment(args.api_url, &config))?;
            run_topic_details(session, EntityId::new(id)).await
        }
        Command::Config { action } => run_config_command(action, config, &config_path),
    }
}

/// Flag, then `STAROSTA_API_URL`, then the config file; `STAROSTA_ENVIRONMENT`
/// and the local default apply when no URL was given anywhere.
fn resolve_environment(flag: Option<String>, config: &Config) -> Environment {
    let api_url = flag
        .or_else(|| std::env::var(API_URL_VAR).ok())
        .or_else(|| config.api_url.clone());
    let named = std::env::var(ENVIRONMENT_VAR).ok();

    if let Some(name) = named.as_deref() {
        if !name.is_empty() && name.parse::<Environment>().is_err() {
            print_cmd_warn!(
                "Unknown environment",
                "{}={} is neither `local` nor an http(s) URL, using the default",
                ENVIRONMENT_VAR,
                name
            );
        }
    }

    Environment::resolve(api_url.as_deref(), named.as_deref())
}

fn run_config_command(
    action: ConfigCommand,
    config: Config,
    config_path: &std::path::Path,
) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigCommand::SetUrl { url } => {
            let environment = url
                .parse::<Environment>()
                .map_err(|_| format!("Invalid backend URL: {}", url))?;
            Config::new(Some(environment.api_url()), config.with_background_color)
                .save(config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Backend URL saved", "{}", environment.api_url());
            Ok(())
        }
        ConfigCommand::Show => {
            print_cmd_info!("Config file", "{}", config_path.display());
            print_cmd_info!(
                "Saved URL",
                "{}",
                config.api_url.as_deref().unwrap_or("-")
            );
            print_cmd_info!(
                "Effective backend",
                "{}",
                resolve_environment(None, &config).api_url()
            );
            Ok(())
        }
        ConfigCommand::Clear => {
            println!("Clearing configuration file...");
            Config::clear(config_path).map_err(|e| {
                print_cmd_error!("Failed to clear config");
                e.into()
            })
        }
    }
}
