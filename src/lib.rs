//! JSON-RPC method binding - parameter normalization and handler invocation
//!
//! This library takes the raw `params` of a JSON-RPC request, binds them to
//! the shape a handler declared, optionally injects a request context, and
//! relays the handler's single completion back to the dispatch layer.

pub mod application;
pub mod config;
pub mod domain;
pub mod shared;

pub use crate::application::InvocationService;
pub use crate::config::AppConfig;
pub use crate::domain::{Completion, Handler, HandlerOutcome, Method, MethodBuilder, MethodOptions, Params, ParamsShape};
pub use crate::shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
