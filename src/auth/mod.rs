//! Auth Module
//!
//! Identity provider contract and the session that owns the signed-in user.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs              - Module exports and documentation
//! ├── provider.rs         - IdentityProvider trait, SessionChange, SessionSubscription
//! ├── memory_provider.rs  - In-memory provider (bcrypt, rate limiting)
//! └── session.rs          - AuthSession: identity state + profile bridge
//! ```
//!
//! # Session Flow
//!
//! ```text
//! IdentityProvider ──SessionChange──▶ AuthSession ──get──▶ ProfileStore
//!                                         │
//!                                         └──▶ GateState (gate module)
//! ```

pub mod memory_provider;
pub mod provider;
pub mod session;

pub use memory_provider::MemoryIdentityProvider;
pub use provider::{IdentityProvider, SessionChange, SessionSubscription};
pub use session::{AuthSession, IdentityState, ProfileCache};
