//! Shared Error Types
//!
//! This module defines every error type that crosses a component boundary in
//! the HealthTrack core. The variants are deliberately small: each one maps to
//! exactly one thing a view can show or a caller can match on.
//!
//! # Error Categories
//!
//! - `AuthError` - Sign-up, sign-in and sign-out failures (user-facing)
//! - `ProviderError` - Raw error code and message returned by an identity provider
//! - `ProfileError` - Profile operations attempted without an identity, or store failures
//! - `StoreError` - Document store failures (I/O, serialization, availability)
//! - `AggregationError` - Reserved; no value of this type can exist
//!
//! # Usage
//!
//! ```rust
//! use healthtrack::shared::error::{AuthError, ProviderError};
//!
//! let err = AuthError::from(ProviderError::new("auth/wrong-password", "wrong password"));
//! assert_eq!(err.to_string(), "Incorrect password.");
//! ```
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread boundaries.
use std::fmt;

use thiserror::Error;

/// Provider error codes understood by [`AuthError::from`].
pub mod codes {
    pub const EMAIL_IN_USE: &str = "auth/email-already-in-use";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const NETWORK_FAILED: &str = "auth/network-request-failed";
    pub const INTERNAL: &str = "auth/internal-error";
}

/// Error returned by an identity provider: a stable code plus its raw message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ProviderError {
    /// Machine-readable code, e.g. `auth/user-not-found`
    pub code: String,
    /// Provider's own human-readable message
    pub message: String,
}

impl ProviderError {
    /// Create a new provider error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Authentication failures, each rendered as one user-facing sentence
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("An account with this email already exists.")]
    DuplicateAccount,

    #[error("Password should be at least 6 characters.")]
    WeakCredential,

    #[error("No account found with this email.")]
    NotFound,

    #[error("Incorrect password.")]
    WrongCredential,

    #[error("Too many failed attempts. Please try again later.")]
    RateLimited,

    #[error("Invalid email address.")]
    InvalidInput,

    #[error("Network error. Please check your connection and try again.")]
    ProviderUnavailable,

    /// Unrecognised provider code; carries the provider's raw message
    #[error("{0}")]
    Unknown(String),
}

/// Fieldless discriminant of [`AuthError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    DuplicateAccount,
    WeakCredential,
    NotFound,
    WrongCredential,
    RateLimited,
    InvalidInput,
    ProviderUnavailable,
    Unknown,
}

impl AuthError {
    /// The kind of this error, without its payload
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::DuplicateAccount => AuthErrorKind::DuplicateAccount,
            Self::WeakCredential => AuthErrorKind::WeakCredential,
            Self::NotFound => AuthErrorKind::NotFound,
            Self::WrongCredential => AuthErrorKind::WrongCredential,
            Self::RateLimited => AuthErrorKind::RateLimited,
            Self::InvalidInput => AuthErrorKind::InvalidInput,
            Self::ProviderUnavailable => AuthErrorKind::ProviderUnavailable,
            Self::Unknown(_) => AuthErrorKind::Unknown,
        }
    }

    /// Sentence shown inline on the sign-in or sign-up view
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err.code.as_str() {
            codes::EMAIL_IN_USE => Self::DuplicateAccount,
            codes::WEAK_PASSWORD => Self::WeakCredential,
            codes::USER_NOT_FOUND => Self::NotFound,
            codes::WRONG_PASSWORD => Self::WrongCredential,
            codes::TOO_MANY_REQUESTS => Self::RateLimited,
            codes::INVALID_EMAIL => Self::InvalidInput,
            codes::NETWORK_FAILED => Self::ProviderUnavailable,
            _ => Self::Unknown(err.message),
        }
    }
}

/// Document store failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    #[error("Profile store I/O error: {0}")]
    Io(String),

    #[error("Profile serialization error: {0}")]
    Serialization(String),

    #[error("Invalid profile key: {0:?}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Profile operation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// A profile operation ran with no current identity. Protected views are
    /// gated, so reaching this is a caller bug rather than a user condition.
    #[error("No user is signed in.")]
    NotSignedIn,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Aggregation never fails; this type has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationError {}

impl fmt::Display for AggregationError {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for AggregationError {}
