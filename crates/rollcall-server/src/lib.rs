//! # Rollcall Server Library
//!
//! Dependency injection wiring and startup utilities for the Rollcall
//! server binary.

pub mod di;
pub mod startup;
