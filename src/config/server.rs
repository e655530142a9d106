//! HTTP server settings

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

use super::error::ValidationError;

/// Listener, logging and delivery settings of the relay
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format of log lines
    #[serde(default)]
    pub log_format: LogFormat,

    /// How `POST /ask` delivers answers
    #[serde(default)]
    pub delivery: DeliveryMode,

    /// Browser origins allowed to call the relay (comma-separated)
    pub cors_origins: Option<String>,
}

/// Log line format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Delivery mode of the ask endpoint
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// One JSON response once the run has finished
    #[default]
    Sync,
    /// Server-sent events with a status frame per poll
    Stream,
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self.host.parse().map_err(|_| ValidationError::InvalidHost)?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == LogFormat::Json
    }

    /// Configured origins, trimmed, without empty entries.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(origins) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            delivery: DeliveryMode::default(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info,assistant_relay=debug,tower_http=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_3000() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.delivery, DeliveryMode::Sync);
        assert!(config.cors_origins_list().is_empty());
    }

    #[test]
    fn json_logs_follow_format() {
        let config = ServerConfig {
            log_format: LogFormat::Json,
            ..Default::default()
        };
        assert!(config.json_logs());
        assert!(!ServerConfig::default().json_logs());
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let config = ServerConfig {
            cors_origins: Some(" https://a.example ,, https://b.example,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn hostname_is_rejected() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidHost)));
    }

    #[test]
    fn enums_deserialize_lowercase() {
        let mode: DeliveryMode = serde_json::from_str("\"stream\"").unwrap();
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(mode, DeliveryMode::Stream);
        assert_eq!(format, LogFormat::Json);
    }
}
