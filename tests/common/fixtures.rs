//! Session fixtures
//!
//! Providers use the minimum bcrypt cost so sign-up stays fast.

use healthtrack::shared::IdentitySettings;
use healthtrack::{AuthSession, GateState, Identity, MemoryIdentityProvider, MemoryProfileStore};

pub type TestSession = AuthSession<MemoryIdentityProvider, MemoryProfileStore>;

pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "secret1";

pub fn fast_identity_settings() -> IdentitySettings {
    IdentitySettings {
        bcrypt_cost: 4,
        ..IdentitySettings::default()
    }
}

pub fn provider() -> MemoryIdentityProvider {
    MemoryIdentityProvider::new(fast_identity_settings())
}

/// Unresolved session over a fresh provider and store
pub fn session() -> TestSession {
    AuthSession::new(provider(), MemoryProfileStore::new())
}

/// Second session sharing `other`'s provider and store
pub fn sibling(other: &TestSession) -> TestSession {
    AuthSession::new(other.provider().clone(), other.store().clone())
}

pub async fn resolved_session() -> TestSession {
    let mut session = session();
    session.resolve_initial().await.expect("initial resolution");
    session
}

pub async fn signed_up() -> (TestSession, Identity) {
    let mut session = resolved_session().await;
    let identity = session.signup(EMAIL, PASSWORD).await.expect("signup");
    (session, identity)
}

pub fn gate_state(session: &TestSession) -> GateState {
    GateState::from_session(session)
}
