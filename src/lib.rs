//! HealthTrack - Session and Profile Core
//!
//! The library behind the HealthTrack shell: who is signed in, what their
//! stored health profile looks like once it is made display-ready, and
//! whether a requested view may render.
//!
//! # Overview
//!
//! - Session state owned by one explicitly constructed [`AuthSession`]
//! - Profile documents read and merge-written through a [`ProfileStore`]
//! - A total aggregation from sparse stored profile to [`DisplayProfile`],
//!   including the derived BMI
//! - A four-state gate deciding render / wait / redirect for each view
//!
//! # Module Structure
//!
//! - **`shared`** - Data model, errors and configuration
//!   - `Identity`, `RawProfile`, `DisplayProfile`
//!   - `AuthError`, `ProfileError`, `StoreError`
//!   - `AppConfig` (TOML + builder + environment overrides)
//!
//! - **`auth`** - Identity provider contract and session
//!   - `IdentityProvider` trait and `SessionSubscription`
//!   - `MemoryIdentityProvider` (bcrypt hashes, rate limiting)
//!   - `AuthSession`
//!
//! - **`profile`** - Storage and shaping of profile documents
//!   - `ProfileStore` trait, `MemoryProfileStore`, `FileProfileStore`
//!   - `ProfileAggregator`, list codec, `ProfileForm`
//!
//! - **`gate`** - `View`, `GateState`, `ProfileGate`
//!
//! - **`logging`** - `tracing` subscriber setup
//!
//! # Usage
//!
//! ```rust,no_run
//! use healthtrack::{AuthSession, GateDecision, MemoryIdentityProvider, MemoryProfileStore, ProfileGate, View};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! healthtrack::logging::init_tracing(healthtrack::logging::DEFAULT_FILTER);
//!
//! let mut session = AuthSession::new(MemoryIdentityProvider::default(), MemoryProfileStore::new());
//! session.resolve_initial().await?;
//!
//! session.signup("a@b.com", "secret1").await?;
//!
//! let mut gate = ProfileGate::new();
//! gate.sync_with(&session);
//! assert_eq!(gate.decide(View::Dashboard), GateDecision::Redirect(View::ProfileSetup));
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Operations are `async` and take `&mut self` on the session, so a session
//! is driven by one task at a time. Provider changes arrive on a
//! `tokio::sync::broadcast` channel and are applied by
//! `process_next_change` / `process_pending_changes`.
//!
//! # Error Handling
//!
//! - `AuthError` displays as the sentence shown to the user
//! - `ProfileError::NotSignedIn` for profile calls without an identity
//! - Aggregation and gate decisions never fail

/// Shared types and data structures
pub mod shared;

/// Identity provider and session
pub mod auth;

/// Profile storage, aggregation and forms
pub mod profile;

/// View gating
pub mod gate;

/// Tracing setup
pub mod logging;

pub use auth::{AuthSession, IdentityProvider, MemoryIdentityProvider, SessionChange, SessionSubscription};
pub use gate::{decide, GateDecision, GateEvent, GateState, ProfileGate, View};
pub use profile::{aggregate, compute_bmi, FileProfileStore, MemoryProfileStore, ProfileAggregator, ProfileForm, ProfileStore};
pub use shared::{
    AppConfig, AuthError, AuthErrorKind, DisplayProfile, EmergencyContact, Identity, ProfileError, ProviderError,
    RawProfile, StoreError,
};
