//! Application layer - Services built on top of the domain
//!
//! This module contains application services that adapt the method
//! contract for dispatch layers.

pub mod services;

pub use services::*;
