//! HTTP Client Factory
//!
//! Builds the `reqwest::Client` shared by the service clients, with the
//! per-attempt timeout and optional proxy applied.

use std::time::Duration;

use log_insight_core::proxy::ProxyConfig;

/// Build a `reqwest::Client` with a request timeout and proxy configuration.
///
/// - `Some(proxy)` -> route every request through the proxy
/// - `None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
pub fn build_http_client(
    proxy: Option<&ProxyConfig>,
    timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)));
    match proxy {
        Some(cfg) => {
            let mut p = reqwest::Proxy::all(cfg.url())?;
            if let (Some(u), Some(pw)) = (&cfg.username, &cfg.password) {
                p = p.basic_auth(u, pw);
            }
            builder = builder.proxy(p);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    builder.build()
}
