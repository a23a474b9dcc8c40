//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use crate::config::app_config::LoggingConfig;
use tracing::{debug, info, warn, Subscriber};
use tracing_subscriber::{fmt, fmt::MakeWriter, EnvFilter};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(config: &LoggingConfig) -> crate::Result<()> {
        tracing::subscriber::set_global_default(Self::build_subscriber(config, std::io::stdout)).map_err(|e| {
            crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e))
        })
    }

    /// Build the subscriber `initialize` installs, writing to `writer`
    pub fn build_subscriber<W>(config: &LoggingConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.level));

        let subscriber_builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(config.structured)
            .with_line_number(config.structured)
            .with_ansi(false);

        if config.format == "json" {
            Box::new(subscriber_builder.json().finish())
        } else {
            Box::new(subscriber_builder.finish())
        }
    }

    /// Log the normalization step of an invocation
    pub fn log_normalized(shape: &str, input: &str, output: &str, use_context: bool) {
        debug!(
            shape = %shape,
            input = %input,
            output = %output,
            use_context = use_context,
            "Normalized method params"
        );
    }

    /// Log a completed invocation
    pub fn log_completed(invocation_id: &str, is_error: bool, duration_ms: u64) {
        info!(
            invocation_id = %invocation_id,
            is_error = is_error,
            duration_ms = %duration_ms,
            "Invocation completed"
        );
    }

    /// Log a handler that dropped its completion
    pub fn log_dropped_completion(invocation_id: &str, duration_ms: u64) {
        warn!(
            invocation_id = %invocation_id,
            duration_ms = %duration_ms,
            "Handler dropped completion without reporting"
        );
    }

    /// Generate a unique invocation ID
    pub fn generate_invocation_id() -> String {
        format!("inv_{}", uuid::Uuid::new_v4().simple())
    }
}
