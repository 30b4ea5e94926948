//! Settings Models
//!
//! Application configuration and settings data structures.

use std::time::Duration;

use log_insight_clients::ClientConfig;
use log_insight_core::keywords::{KeywordExtractor, DEFAULT_KEYWORD_LIMIT, DEFAULT_VOCABULARY};
use log_insight_core::proxy::ProxyConfig;
use serde::{Deserialize, Serialize};

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the analysis backend (summarize / classify / chat)
    pub backend_url: String,
    /// Timeout for a single service request, in seconds
    pub request_timeout_secs: u64,
    /// Extra attempts after a transient service failure
    pub max_retries: u32,
    /// Minimum perceived response time for chat replies, in milliseconds
    pub min_response_delay_ms: u64,
    /// Number of keywords kept in the ranking
    pub keyword_limit: usize,
    /// Critical terms scanned for, in tie-breaking order
    #[serde(default = "default_vocabulary")]
    pub vocabulary: Vec<String>,
    /// Optional outbound proxy for service requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    /// Bind address for the reference backend
    #[serde(default = "default_server_host")]
    pub server_host: String,
    /// Bind port for the reference backend
    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

fn default_vocabulary() -> Vec<String> {
    DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect()
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            max_retries: 2,
            min_response_delay_ms: 1000,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            vocabulary: default_vocabulary(),
            proxy: None,
            server_host: default_server_host(),
            server_port: default_server_port(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub backend_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub min_response_delay_ms: Option<u64>,
    pub keyword_limit: Option<usize>,
    pub vocabulary: Option<Vec<String>>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(url) = update.backend_url {
            self.backend_url = url;
        }
        if let Some(timeout) = update.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(retries) = update.max_retries {
            self.max_retries = retries;
        }
        if let Some(delay) = update.min_response_delay_ms {
            self.min_response_delay_ms = delay;
        }
        if let Some(limit) = update.keyword_limit {
            self.keyword_limit = limit;
        }
        if let Some(vocabulary) = update.vocabulary {
            self.vocabulary = vocabulary;
        }
        if let Some(host) = update.server_host {
            self.server_host = host;
        }
        if let Some(port) = update.server_port {
            self.server_port = port;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        match url::Url::parse(&self.backend_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(format!(
                    "Invalid backend_url: {}. Scheme '{}' is not http or https",
                    self.backend_url,
                    url.scheme()
                ))
            }
            Err(e) => return Err(format!("Invalid backend_url: {}. {}", self.backend_url, e)),
        }

        if self.request_timeout_secs < 1 {
            return Err("request_timeout_secs must be at least 1 second".to_string());
        }

        if self.max_retries > 10 {
            return Err("max_retries cannot exceed 10".to_string());
        }

        if !(1..=50).contains(&self.keyword_limit) {
            return Err(format!(
                "keyword_limit must be between 1 and 50, got {}",
                self.keyword_limit
            ));
        }

        if self.vocabulary.is_empty() {
            return Err("vocabulary must contain at least one term".to_string());
        }
        if self.vocabulary.iter().any(|t| t.trim().is_empty()) {
            return Err("vocabulary terms must not be blank".to_string());
        }

        if let Some(proxy) = &self.proxy {
            proxy.validate()?;
        }

        Ok(())
    }

    /// Connection settings for the service clients
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.backend_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_max_retries(self.max_retries);
        if let Some(proxy) = &self.proxy {
            config = config.with_proxy(proxy.clone());
        }
        config
    }

    /// Keyword extractor for the configured vocabulary
    pub fn keyword_extractor(&self) -> KeywordExtractor {
        KeywordExtractor::new(&self.vocabulary, self.keyword_limit)
    }

    /// Minimum perceived response time for chat replies
    pub fn min_response_delay(&self) -> Duration {
        Duration::from_millis(self.min_response_delay_ms)
    }
}
