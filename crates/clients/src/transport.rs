//! JSON Transport
//!
//! POSTs a JSON body to an endpoint under the backend base URL and decodes
//! the JSON reply, retrying transient failures with exponential backoff.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use log_insight_core::error::{ServiceError, ServiceResult, Stage};

use crate::http_client::build_http_client;
use crate::types::{ClientBuildError, ClientBuildResult, ClientConfig};

const RETRY_INITIAL_INTERVAL: Duration = Duration::from_millis(200);
const RETRY_MAX_INTERVAL: Duration = Duration::from_secs(2);

/// Longest error body kept in a `ServiceError` message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Shared request plumbing for the service clients. Cheap to clone.
#[derive(Debug, Clone)]
pub struct JsonTransport {
    client: reqwest::Client,
    base_url: Url,
    max_retries: u32,
}

impl JsonTransport {
    /// Create a transport from the injected client configuration
    pub fn new(config: &ClientConfig) -> ClientBuildResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = build_http_client(config.proxy.as_ref(), config.timeout)?;
        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> ClientBuildResult<Url> {
        // base_url always ends with '/', so join appends rather than replaces
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientBuildError::InvalidEndpoint {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    /// POST `body` to `url` and decode the reply.
    ///
    /// Transient failures are retried up to `max_retries` extra times; the
    /// last error is returned once attempts run out.
    pub async fn post_json<Req, Resp>(
        &self,
        stage: Stage,
        url: &Url,
        body: &Req,
    ) -> ServiceResult<Resp>
    where
        Req: Serialize + Sync + ?Sized,
        Resp: DeserializeOwned,
    {
        let attempts = AtomicU32::new(0);
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(RETRY_INITIAL_INTERVAL)
            .with_max_interval(RETRY_MAX_INTERVAL)
            .with_max_elapsed_time(None)
            .build();

        let attempts_ref = &attempts;
        backoff::future::retry(policy, move || async move {
            let attempt = attempts_ref.fetch_add(1, Ordering::SeqCst);
            match self.send_once(stage, url, body).await {
                Ok(resp) => Ok(resp),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    tracing::warn!(
                        stage = %stage,
                        attempt = attempt + 1,
                        error = %err,
                        "transient service failure, retrying"
                    );
                    Err(backoff::Error::transient(err))
                }
                Err(err) => Err(backoff::Error::permanent(err)),
            }
        })
        .await
    }

    async fn send_once<Req, Resp>(&self, stage: Stage, url: &Url, body: &Req) -> ServiceResult<Resp>
    where
        Req: Serialize + Sync + ?Sized,
        Resp: DeserializeOwned,
    {
        tracing::debug!(stage = %stage, url = %url, "sending service request");

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::network(stage, describe_request_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::http_status(
                stage,
                status.as_u16(),
                truncate(&text, MAX_ERROR_BODY_CHARS),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::network(stage, describe_request_error(&e)))?;

        serde_json::from_slice(&bytes).map_err(|e| ServiceError::malformed(stage, e.to_string()))
    }
}

/// Parse the configured base URL, forcing a trailing slash.
fn parse_base_url(raw: &str) -> ClientBuildResult<Url> {
    let invalid = |message: String| ClientBuildError::InvalidBaseUrl {
        url: raw.to_string(),
        message,
    };

    let normalized = format!("{}/", raw.trim().trim_end_matches('/'));
    let url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn describe_request_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("could not connect: {}", err)
    } else {
        err.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
