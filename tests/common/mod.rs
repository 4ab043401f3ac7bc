//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Session and provider fixtures
//! - Custom assertion macros

#[macro_use]
pub mod assertions;
pub mod fixtures;

pub use fixtures::*;
