//! Application services - Orchestration of domain logic

pub mod invocation_service;

pub use invocation_service::InvocationService;
