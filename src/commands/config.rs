//! Config Commands
//!
//! Reading and updating the saved configuration file.

use std::io::Write;

use clap::{Args, Subcommand};

use crate::models::settings::SettingsUpdate;
use crate::storage::ConfigService;
use crate::utils::error::AppResult;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the saved configuration
    Show,
    /// Change saved settings; options left out keep their current value
    Set(SetArgs),
    /// Restore the default configuration
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Analysis backend base URL
    #[arg(long = "url", value_name = "URL")]
    pub backend_url: Option<String>,
    /// Timeout for a single service request, in seconds
    #[arg(long, value_name = "SECS")]
    pub request_timeout_secs: Option<u64>,
    /// Extra attempts after a transient service failure
    #[arg(long)]
    pub max_retries: Option<u32>,
    /// Minimum perceived response time for chat replies, in milliseconds
    #[arg(long, value_name = "MS")]
    pub min_response_delay_ms: Option<u64>,
    /// Number of keywords kept in the ranking
    #[arg(long)]
    pub keyword_limit: Option<usize>,
    /// Critical terms, comma-separated, in tie-breaking order
    #[arg(long, value_delimiter = ',')]
    pub vocabulary: Option<Vec<String>>,
    /// Bind address for `serve`
    #[arg(long)]
    pub server_host: Option<String>,
    /// Bind port for `serve`
    #[arg(long)]
    pub server_port: Option<u16>,
}

impl From<SetArgs> for SettingsUpdate {
    fn from(args: SetArgs) -> Self {
        SettingsUpdate {
            backend_url: args.backend_url,
            request_timeout_secs: args.request_timeout_secs,
            max_retries: args.max_retries,
            min_response_delay_ms: args.min_response_delay_ms,
            keyword_limit: args.keyword_limit,
            vocabulary: args.vocabulary,
            server_host: args.server_host,
            server_port: args.server_port,
        }
    }
}

/// Apply `action` to the saved configuration, then print the result.
///
/// An update that fails validation is rejected and the file is left as it was.
pub fn config<W: Write>(
    service: &mut ConfigService,
    action: ConfigAction,
    out: &mut W,
) -> AppResult<()> {
    match action {
        ConfigAction::Show => {}
        ConfigAction::Set(args) => {
            service.update_config(args.into())?;
            tracing::info!(path = %service.path().display(), "configuration updated");
        }
        ConfigAction::Reset => {
            service.reset()?;
            tracing::info!(path = %service.path().display(), "configuration reset to defaults");
        }
    }

    writeln!(out, "# {}", service.path().display())?;
    writeln!(out, "{}", serde_json::to_string_pretty(service.get_config())?)?;
    Ok(())
}
