//! In-Memory Identity Provider
//!
//! A self-contained [`IdentityProvider`] for tests and for hosts that do not
//! talk to a remote identity service.
//!
//! # Account Rules
//!
//! - Emails are trimmed and lowercased before use
//! - Email must look like `local@domain.tld`, otherwise `auth/invalid-email`
//! - Password must be at least `min_password_length` characters, otherwise `auth/weak-password`
//! - Passwords are hashed with bcrypt and never stored or logged in clear
//! - After `max_failed_attempts` consecutive wrong passwords for one email,
//!   sign-in answers `auth/too-many-requests` until a successful sign-in
//!
//! # Session Changes
//!
//! Successful sign-up and sign-in publish `SignedIn`, sign-out publishes
//! `SignedOut`, on a `tokio::sync::broadcast` channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bcrypt::{hash, verify};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::auth::provider::{IdentityProvider, SessionChange, SessionSubscription};
use crate::shared::config::IdentitySettings;
use crate::shared::error::{codes, ProviderError};
use crate::shared::identity::Identity;

const CHANNEL_CAPACITY: usize = 16;

struct Account {
    identity: Identity,
    password_hash: String,
}

struct ProviderState {
    accounts: HashMap<String, Account>,
    failed_attempts: HashMap<String, u32>,
    current: Option<Identity>,
    online: bool,
    injected: Option<ProviderError>,
}

/// In-memory IdentityProvider
#[derive(Clone)]
pub struct MemoryIdentityProvider {
    state: Arc<Mutex<ProviderState>>,
    changes: broadcast::Sender<SessionChange>,
    settings: IdentitySettings,
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new(IdentitySettings::default())
    }
}

impl MemoryIdentityProvider {
    pub fn new(settings: IdentitySettings) -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(ProviderState {
                accounts: HashMap::new(),
                failed_attempts: HashMap::new(),
                current: None,
                online: true,
                injected: None,
            })),
            changes,
            settings,
        }
    }

    /// Simulate losing (or regaining) the connection to the provider.
    pub fn set_online(&self, online: bool) {
        self.lock().online = online;
    }

    /// Make the next provider call fail with `error`.
    pub fn inject_error(&self, error: ProviderError) {
        self.lock().injected = Some(error);
    }

    /// Identity the provider currently considers signed in.
    pub fn current_identity(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    fn lock(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, change: SessionChange) {
        match self.changes.send(change) {
            Ok(subscribers) => {
                tracing::debug!("[Auth] Session change delivered to {} subscribers", subscribers);
            }
            Err(_) => {
                tracing::debug!("[Auth] No subscribers to receive session change");
            }
        }
    }

    fn preflight(state: &mut ProviderState) -> Result<(), ProviderError> {
        if !state.online {
            return Err(ProviderError::new(
                codes::NETWORK_FAILED,
                "A network error has occurred.",
            ));
        }
        match state.injected.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

impl IdentityProvider for MemoryIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let email = normalize_email(email);
        let identity = {
            let mut state = self.lock();
            Self::preflight(&mut state)?;

            if !is_valid_email(&email) {
                return Err(ProviderError::new(codes::INVALID_EMAIL, "The email address is badly formatted."));
            }
            if password.chars().count() < self.settings.min_password_length {
                return Err(ProviderError::new(
                    codes::WEAK_PASSWORD,
                    format!(
                        "Password should be at least {} characters.",
                        self.settings.min_password_length
                    ),
                ));
            }
            if state.accounts.contains_key(&email) {
                return Err(ProviderError::new(
                    codes::EMAIL_IN_USE,
                    "The email address is already in use by another account.",
                ));
            }

            let password_hash = hash(password, self.settings.bcrypt_cost).map_err(|e| {
                tracing::error!("[Auth] Failed to hash password: {:?}", e);
                ProviderError::new(codes::INTERNAL, "An internal error has occurred.")
            })?;

            let identity = Identity::new(Uuid::new_v4().to_string(), email.clone());
            state.accounts.insert(
                email,
                Account {
                    identity: identity.clone(),
                    password_hash,
                },
            );
            state.current = Some(identity.clone());
            identity
        };

        tracing::info!("[Auth] Account created: {}", identity.email);
        self.emit(SessionChange::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        let email = normalize_email(email);
        let identity = {
            let mut state = self.lock();
            Self::preflight(&mut state)?;

            if !is_valid_email(&email) {
                return Err(ProviderError::new(codes::INVALID_EMAIL, "The email address is badly formatted."));
            }
            let failures = state.failed_attempts.get(&email).copied().unwrap_or(0);
            if failures >= self.settings.max_failed_attempts {
                tracing::warn!("[Auth] Sign-in rate limited for {}", email);
                return Err(ProviderError::new(
                    codes::TOO_MANY_REQUESTS,
                    "Access to this account has been temporarily disabled due to many failed login attempts.",
                ));
            }

            let Some(account) = state.accounts.get(&email) else {
                tracing::warn!("[Auth] User not found: {}", email);
                return Err(ProviderError::new(
                    codes::USER_NOT_FOUND,
                    "There is no user record corresponding to this identifier.",
                ));
            };

            let valid = verify(password, &account.password_hash).map_err(|e| {
                tracing::error!("[Auth] Password verification error: {:?}", e);
                ProviderError::new(codes::INTERNAL, "An internal error has occurred.")
            })?;
            let identity = account.identity.clone();

            if !valid {
                *state.failed_attempts.entry(email.clone()).or_insert(0) += 1;
                tracing::warn!("[Auth] Invalid password for user: {}", email);
                return Err(ProviderError::new(
                    codes::WRONG_PASSWORD,
                    "The password is invalid or the user does not have a password.",
                ));
            }

            state.failed_attempts.remove(&email);
            state.current = Some(identity.clone());
            identity
        };

        tracing::info!("[Auth] User signed in: {}", identity.email);
        self.emit(SessionChange::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn end_session(&self) -> Result<(), ProviderError> {
        {
            let mut state = self.lock();
            Self::preflight(&mut state)?;
            state.current = None;
        }
        self.emit(SessionChange::SignedOut);
        Ok(())
    }

    fn on_session_change(&self) -> SessionSubscription {
        let current = SessionChange::from(self.lock().current.clone());
        SessionSubscription::new(current, self.changes.subscribe())
    }
}
