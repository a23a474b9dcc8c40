//! Configuration management module
//!
//! This module handles loading method declarations and logging settings,
//! validating them, and providing access to them.

pub mod app_config;
pub mod validation;

pub use app_config::{AppConfig, LoggingConfig};
pub use validation::ConfigValidator;
