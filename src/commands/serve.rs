//! Run the reference analysis backend in the foreground.

use crate::models::settings::AppConfig;
use crate::services::backend;
use crate::utils::error::AppResult;

/// Serve on `host`/`port`, falling back to the configured bind address.
pub async fn serve(config: &AppConfig, host: Option<&str>, port: Option<u16>) -> AppResult<()> {
    let host = host.unwrap_or(&config.server_host);
    let port = port.unwrap_or(config.server_port);
    backend::serve(host, port).await
}
