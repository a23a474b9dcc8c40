//! Domain layer - Core binding logic and domain models
//!
//! This module contains the parameter shapes, the handler contract and the
//! method type that ties them together. It is independent of transports,
//! envelopes and routing.

pub mod handler;
pub mod method;
pub mod params;

pub use handler::{Completion, Handler, HandlerOutcome};
pub use method::{Method, MethodBuilder, MethodOptions};
pub use params::{Params, ParamsShape};
