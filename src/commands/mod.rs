//! CLI Commands
//!
//! Command-line definitions and the handlers behind each subcommand.
//! These are the entry points into the pipeline, the chat session, the
//! saved configuration and the reference backend.

pub mod analyze;
pub mod chat;
pub mod config;
pub mod render;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use log_insight_clients::ServiceClients;

use self::config::ConfigAction;
use crate::models::settings::AppConfig;
use crate::state::AppState;
use crate::storage::ConfigService;
use crate::utils::error::AppResult;

#[derive(Parser, Debug)]
#[command(
    name = "log-insight",
    version,
    about = "Summarize, classify and chat about network logs"
)]
pub struct Cli {
    /// Config file to use instead of ~/.log-insight/config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Analysis backend base URL (overrides the config file and LOG_INSIGHT_BACKEND_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize and classify a log, and rank its critical keywords
    Analyze {
        /// .txt or .log file to analyze (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Summarize a log without classifying it
    Summarize {
        /// .txt or .log file to summarize (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Classify a single alert text
    Classify {
        /// Alert text to classify
        text: String,
    },
    /// Chat with the network assistant (type /quit to leave)
    Chat,
    /// Run the reference analysis backend
    Serve {
        /// Bind address (defaults to server_host from the config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (defaults to server_port from the config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Load configuration and run the selected subcommand.
pub async fn run(cli: Cli) -> AppResult<()> {
    let mut config_service = match &cli.config {
        Some(path) => ConfigService::open(path.clone())?,
        None => ConfigService::new()?,
    };
    let backend_url = cli.backend_url.as_deref();

    let mut stdout = std::io::stdout();
    match cli.command {
        Command::Analyze { file } => {
            let state = AppState::from_config(effective_config(&config_service, backend_url)?)?;
            let input = analyze::read_input(file.as_deref()).await?;
            analyze::analyze(state.pipeline(), input, &mut stdout).await
        }
        Command::Summarize { file } => {
            let config = effective_config(&config_service, backend_url)?;
            let clients = ServiceClients::connect(&config.client_config())?;
            let input = analyze::read_input(file.as_deref()).await?;
            analyze::summarize(clients.summarizer.as_ref(), input, &mut stdout).await
        }
        Command::Classify { text } => {
            let config = effective_config(&config_service, backend_url)?;
            let clients = ServiceClients::connect(&config.client_config())?;
            analyze::classify(clients.classifier.as_ref(), &text, &mut stdout).await
        }
        Command::Chat => {
            let state = AppState::from_config(effective_config(&config_service, backend_url)?)?;
            let input = BufReader::new(tokio::io::stdin());
            chat::chat_loop(state.chat(), input, &mut stdout).await
        }
        Command::Serve { host, port } => {
            let config = effective_config(&config_service, backend_url)?;
            serve::serve(&config, host.as_deref(), port).await
        }
        // The saved file is edited as is, without environment or flag overrides.
        Command::Config { action } => config::config(&mut config_service, action, &mut stdout),
    }
}

fn effective_config(service: &ConfigService, backend_url: Option<&str>) -> AppResult<AppConfig> {
    let config = service.effective_config(backend_url)?;
    tracing::debug!(
        config_path = %service.path().display(),
        backend_url = %config.backend_url,
        "configuration loaded"
    );
    Ok(config)
}
