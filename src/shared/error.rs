//! Error handling module
//!
//! This module provides centralized error handling for the method layer.

use thiserror::Error;
use serde_json::Value;

/// Application error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Invalid handler: {0}")]
    InvalidHandler(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Handler dropped its completion without reporting a result")]
    CompletionDropped,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Convert to JSON-RPC error response
    pub fn to_jsonrpc_error(&self) -> Value {
        let (code, message) = match self {
            AppError::InvalidParams(reason) => (-32602, format!("Invalid params: {}", reason)),
            _ => (-32603, "Internal error".to_string()),
        };

        serde_json::json!({
            "error": {
                "code": code,
                "message": message
            }
        })
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
