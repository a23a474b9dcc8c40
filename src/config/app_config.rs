//! Application configuration structures
//!
//! This module contains the configuration structures for the method layer.

use crate::domain::method::MethodOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format ("text" or "json")
    #[validate(length(min = 1))]
    pub format: String,

    /// Include file and line in log output
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            structured: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Declared options per method name
    #[serde(default)]
    pub methods: HashMap<String, MethodOptions>,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        let builder = ::config::Config::builder()
            .add_source(::config::File::with_name("Methods").required(false))
            .add_source(::config::Environment::with_prefix("RPC_METHOD").separator("__"));

        Self::from_builder(builder)
    }

    /// Load configuration from an embedded TOML document
    pub fn from_toml_str(source: &str) -> crate::Result<Self> {
        let builder = ::config::Config::builder()
            .add_source(::config::File::from_str(source, ::config::FileFormat::Toml));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    ) -> crate::Result<Self> {
        let config = builder
            .build()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        super::validation::ConfigValidator::validate_config(&config)?;

        Ok(config)
    }

    /// Options declared for `name`, or the defaults when it is not declared
    pub fn method_options(&self, name: &str) -> MethodOptions {
        self.methods.get(name).cloned().unwrap_or_default()
    }
}
