//! Shared Module
//!
//! Types used across the auth, profile and gate modules: the identity and
//! profile data model, error types and configuration.
//!
//! # Overview
//!
//! Nothing in here performs I/O. Profile types serialize with camelCase keys
//! so they match the stored document format.

/// Application configuration
pub mod config;

/// Error types
pub mod error;

/// Signed-in user identity
pub mod identity;

/// Raw and display profile shapes
pub mod profile;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, IdentitySettings, ProfileSettings, StoreSettings};
pub use error::{AggregationError, AuthError, AuthErrorKind, ProfileError, ProviderError, StoreError};
pub use identity::Identity;
pub use profile::{DisplayProfile, EmergencyContact, RawProfile};
