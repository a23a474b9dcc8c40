//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::AppConfig;
use crate::shared::error::AppError;
use validator::Validate;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        config.logging.validate()?;

        Self::validate_logging_config(&config.logging)?;

        for (name, options) in &config.methods {
            Self::validate_method(name, options)?;
        }

        Ok(())
    }

    /// Validate logging configuration
    fn validate_logging_config(logging: &crate::config::app_config::LoggingConfig) -> crate::Result<()> {
        if !["text", "json"].contains(&logging.format.as_str()) {
            return Err(AppError::Validation(format!("Invalid log format: {}", logging.format)));
        }

        tracing_subscriber::EnvFilter::try_new(&logging.level)
            .map_err(|e| AppError::Validation(format!("Invalid log level '{}': {}", logging.level, e)))?;

        Ok(())
    }

    /// Validate a single method declaration
    fn validate_method(name: &str, options: &crate::domain::method::MethodOptions) -> crate::Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidConfiguration("method names cannot be empty".to_string()));
        }

        options.params.validate().map_err(|e| match e {
            AppError::InvalidConfiguration(reason) => {
                AppError::InvalidConfiguration(format!("method '{}': {}", name, reason))
            }
            other => other,
        })
    }
}
