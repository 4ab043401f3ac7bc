//! Gate Module
//!
//! Decides whether a requested view renders, waits or redirects.
//!
//! # Module Structure
//!
//! ```text
//! gate/
//! ├── mod.rs    - GateDecision, decide(), ProfileGate
//! ├── state.rs  - GateState machine and GateEvent
//! └── view.rs   - View identifiers
//! ```
//!
//! # Decision Table (protected views)
//!
//! | State                      | Decision                                   |
//! |----------------------------|--------------------------------------------|
//! | `Loading`                  | `Wait`                                     |
//! | `Unauthenticated`          | `Redirect(SignIn)`                         |
//! | `AuthenticatedNoProfile`   | `Redirect(ProfileSetup)`, except `ProfileSetup` itself renders |
//! | `AuthenticatedWithProfile` | `Render(view)`                             |
//!
//! Public views always render.

pub mod state;
pub mod view;

pub use state::{GateEvent, GateState};
pub use view::View;

use crate::auth::provider::IdentityProvider;
use crate::auth::session::AuthSession;
use crate::profile::store::ProfileStore;

/// Outcome for one view request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Show a neutral waiting indicator
    Wait,
    Render(View),
    Redirect(View),
}

/// Pure decision for `(state, requested)`.
pub fn decide(state: GateState, requested: View) -> GateDecision {
    if !requested.is_protected() {
        return GateDecision::Render(requested);
    }
    match state {
        GateState::Loading => GateDecision::Wait,
        GateState::Unauthenticated => GateDecision::Redirect(View::SignIn),
        GateState::AuthenticatedNoProfile if requested == View::ProfileSetup => {
            GateDecision::Render(requested)
        }
        GateState::AuthenticatedNoProfile => GateDecision::Redirect(View::ProfileSetup),
        GateState::AuthenticatedWithProfile => GateDecision::Render(requested),
    }
}

/// Holds the current [`GateState`] for a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileGate {
    state: GateState,
}

impl Default for ProfileGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Loading,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn apply(&mut self, event: GateEvent) -> GateState {
        let next = self.state.apply(event);
        if next != self.state {
            tracing::debug!("[Gate] {:?} -> {:?} on {:?}", self.state, next, event);
        }
        self.state = next;
        next
    }

    /// Re-derive the state from the session.
    pub fn sync_with<P: IdentityProvider, S: ProfileStore>(&mut self, session: &AuthSession<P, S>) -> GateState {
        let next = GateState::from_session(session);
        if next != self.state {
            tracing::debug!("[Gate] {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        next
    }

    pub fn decide(&self, requested: View) -> GateDecision {
        decide(self.state, requested)
    }
}
