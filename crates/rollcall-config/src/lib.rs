//! # Rollcall Config
//!
//! Configuration management for Rollcall.
//! Supports layered configuration from files and environment variables,
//! validated once at load time.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
