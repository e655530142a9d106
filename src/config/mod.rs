//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ASSISTANT_RELAY` prefix and nested values use double underscores as separators.
//! The conventional `OPENAI_API_KEY` variable is honoured when no key is set
//! under the prefix.
//!
//! # Example
//!
//! ```no_run
//! use assistant_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod assistant;
mod error;
mod server;

pub use assistant::AssistantConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{DeliveryMode, LogFormat, ServerConfig};

use secrecy::Secret;
use serde::Deserialize;

/// Fallback variable for the assistant credential.
const API_KEY_FALLBACK_VAR: &str = "OPENAI_API_KEY";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (listener, logging, delivery mode)
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted assistant service configuration
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ASSISTANT_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `OPENAI_API_KEY` for the assistant credential
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSISTANT_RELAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ASSISTANT_RELAY__SERVER__DELIVERY=stream` -> `server.delivery = stream`
    /// - `ASSISTANT_RELAY__ASSISTANT__API_KEY=...` -> `assistant.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSISTANT_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if !config.assistant.has_api_key() {
            if let Ok(key) = std::env::var(API_KEY_FALLBACK_VAR) {
                config.assistant.api_key = Some(Secret::new(key));
            }
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assistant.validate()?;
        Ok(())
    }
}
