//! Proxy Configuration Types
//!
//! Optional outbound proxy for the analysis service clients. The HTTP client
//! factory that consumes it lives in `log-insight-clients`.

use serde::{Deserialize, Serialize};

/// Proxy protocol type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks5,
}

impl ProxyProtocol {
    /// Return the URL scheme string for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
            ProxyProtocol::Socks5 => "socks5",
        }
    }
}

/// Proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Held in memory only; never written back to the config file.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Build the proxy URL string (without auth).
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }

    /// Basic sanity checks before the proxy is handed to the HTTP client.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("proxy host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("proxy port must be non-zero".to_string());
        }
        if self.password.is_some() && self.username.is_none() {
            return Err("proxy password set without a username".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(protocol: ProxyProtocol) -> ProxyConfig {
        ProxyConfig {
            protocol,
            host: "proxy.internal".to_string(),
            port: 3128,
            username: None,
            password: None,
        }
    }

    #[test]
    fn test_proxy_url() {
        assert_eq!(proxy(ProxyProtocol::Http).url(), "http://proxy.internal:3128");
        assert_eq!(
            proxy(ProxyProtocol::Socks5).url(),
            "socks5://proxy.internal:3128"
        );
    }

    #[test]
    fn test_proxy_validate() {
        assert!(proxy(ProxyProtocol::Https).validate().is_ok());

        let mut cfg = proxy(ProxyProtocol::Http);
        cfg.host = "  ".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = proxy(ProxyProtocol::Http);
        cfg.port = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = proxy(ProxyProtocol::Http);
        cfg.password = Some("secret".to_string());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_password_not_serialized() {
        let mut cfg = proxy(ProxyProtocol::Socks5);
        cfg.username = Some("ops".to_string());
        cfg.password = Some("secret".to_string());
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"protocol\":\"socks5\""));
        assert!(json.contains("\"username\":\"ops\""));
    }
}
