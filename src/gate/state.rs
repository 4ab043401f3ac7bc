//! Gate state machine
//!
//! ```text
//!                 Resolved
//!   Loading ─────────────────▶ Unauthenticated / NoProfile / WithProfile
//!
//!   Unauthenticated ──SignedIn──▶ NoProfile | WithProfile
//!   NoProfile ──ProfileSaved{has_profile}──▶ WithProfile
//!   *         ──SignedOut──▶ Unauthenticated
//! ```
//!
//! Events that do not apply to the current state leave it unchanged.

use serde::{Deserialize, Serialize};

use crate::auth::provider::IdentityProvider;
use crate::auth::session::{AuthSession, IdentityState, ProfileCache};
use crate::profile::store::ProfileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateState {
    Loading,
    Unauthenticated,
    AuthenticatedNoProfile,
    AuthenticatedWithProfile,
}

/// Input to [`GateState::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// Initial identity resolution and first profile fetch both finished
    Resolved { signed_in: bool, has_profile: bool },
    /// Successful login or signup
    SignedIn { has_profile: bool },
    /// Successful profile write
    ProfileSaved { has_profile: bool },
    SignedOut,
}

impl GateState {
    fn authenticated(has_profile: bool) -> Self {
        if has_profile {
            GateState::AuthenticatedWithProfile
        } else {
            GateState::AuthenticatedNoProfile
        }
    }

    pub fn apply(self, event: GateEvent) -> GateState {
        use GateEvent::*;
        use GateState::*;

        match (self, event) {
            (_, SignedOut) => Unauthenticated,
            (Loading, Resolved { signed_in: false, .. }) => Unauthenticated,
            (Loading, Resolved { signed_in: true, has_profile }) => Self::authenticated(has_profile),
            (Unauthenticated, SignedIn { has_profile }) => Self::authenticated(has_profile),
            (AuthenticatedNoProfile, ProfileSaved { has_profile: true }) => AuthenticatedWithProfile,
            (state, _) => state,
        }
    }

    /// Derive the gate state from what the session currently knows.
    ///
    /// An unresolved identity or a pending profile fetch both read as
    /// `Loading`, so no decision is made on a half-known session.
    pub fn from_identity_state(state: &IdentityState) -> GateState {
        match state {
            IdentityState::Unresolved => GateState::Loading,
            IdentityState::SignedOut => GateState::Unauthenticated,
            IdentityState::SignedIn { profile, .. } => match profile {
                ProfileCache::Unknown => GateState::Loading,
                ProfileCache::Absent => GateState::AuthenticatedNoProfile,
                ProfileCache::Present(raw) => Self::authenticated(raw.is_setup_complete()),
            },
        }
    }

    pub fn from_session<P: IdentityProvider, S: ProfileStore>(session: &AuthSession<P, S>) -> GateState {
        Self::from_identity_state(session.state())
    }

    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            GateState::AuthenticatedNoProfile | GateState::AuthenticatedWithProfile
        )
    }
}
