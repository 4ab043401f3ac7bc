/**
 * Identity Type
 *
 * The authenticated user as seen by the rest of the core: an opaque id used
 * as the profile store key, and the email the account was created with.
 */

use serde::{Deserialize, Serialize};

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque identifier, also the profile document key
    pub id: String,
    /// Account email
    pub email: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}
