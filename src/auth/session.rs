//! # Auth Session
//!
//! [`AuthSession`] is the single owner of "who is signed in" and of the cached
//! profile for that identity. Views borrow it; nothing else mutates either.
//!
//! ## Identity resolution
//!
//! The session subscribes to the provider once, at construction. Until the
//! first change has been applied it is [`IdentityState::Unresolved`]. A
//! `SignedIn` change for a new identity sets it with an
//! [`ProfileCache::Unknown`] profile and then fetches it, so "identity known,
//! profile unknown" is an explicit state a gate can wait on instead of acting
//! on. A `SignedIn` change for the identity already held keeps the cached
//! profile; the cache only changes on a successful fetch, so a resolved
//! session never falls back to unknown.
//!
//! `login` is all or nothing: if the profile cannot be read after the
//! provider accepts the credentials, the provider session is ended again and
//! the call fails with `ProviderUnavailable`.
//!
//! ## Queue discipline
//!
//! `signup`, `login` and `logout` drain queued provider changes before
//! touching the provider, so the only change left queued after one of them
//! is its own echo, which re-applies the same identity.

use chrono::Utc;

use crate::auth::provider::{IdentityProvider, SessionChange, SessionSubscription};
use crate::profile::aggregator::ProfileAggregator;
use crate::profile::form::ProfileForm;
use crate::profile::store::{merge_profile, ProfileStore};
use crate::shared::config::{AppConfig, ProfileSettings};
use crate::shared::error::{AuthError, ProfileError};
use crate::shared::identity::Identity;
use crate::shared::profile::{DisplayProfile, RawProfile};

/// What the session knows about the signed-in user's stored profile
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileCache {
    /// Fetch pending or failed
    Unknown,
    /// The store has no document for this identity
    Absent,
    Present(RawProfile),
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdentityState {
    /// No session change has been applied yet
    Unresolved,
    SignedOut,
    SignedIn {
        identity: Identity,
        profile: ProfileCache,
    },
}

/// Session bridging an [`IdentityProvider`] and a [`ProfileStore`]
pub struct AuthSession<P: IdentityProvider, S: ProfileStore> {
    provider: P,
    store: S,
    aggregator: ProfileAggregator,
    subscription: SessionSubscription,
    state: IdentityState,
}

impl<P: IdentityProvider, S: ProfileStore> AuthSession<P, S> {
    pub fn new(provider: P, store: S) -> Self {
        Self::with_settings(provider, store, ProfileSettings::default())
    }

    pub fn with_config(provider: P, store: S, config: &AppConfig) -> Self {
        Self::with_settings(provider, store, config.profile.clone())
    }

    pub fn with_settings(provider: P, store: S, settings: ProfileSettings) -> Self {
        let subscription = provider.on_session_change();
        Self {
            provider,
            store,
            aggregator: ProfileAggregator::new(settings),
            subscription,
            state: IdentityState::Unresolved,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &IdentityState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            IdentityState::SignedIn { identity, .. } => Some(identity),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self.state, IdentityState::Unresolved)
    }

    pub fn cached_profile(&self) -> Option<&RawProfile> {
        match &self.state {
            IdentityState::SignedIn {
                profile: ProfileCache::Present(profile),
                ..
            } => Some(profile),
            _ => None,
        }
    }

    /// Display-ready view of the cached profile. Never fails.
    pub fn display_profile(&self) -> DisplayProfile {
        self.aggregator.aggregate(self.cached_profile())
    }

    /// Edit form prefilled with what the user has stored.
    pub fn edit_form(&self) -> ProfileForm {
        ProfileForm::from_display(&self.display_profile(), self.aggregator.settings())
    }

    /// Register a new account and write its signup stub.
    ///
    /// A failed stub write is logged, not returned: the account exists and
    /// the user is signed in, the profile just reads as absent.
    pub async fn signup(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.drain_before_auth_call().await;

        let identity = self
            .provider
            .create_account(email, password)
            .await
            .map_err(|e| {
                tracing::warn!("[Auth] Signup failed ({}): {}", e.code, e.message);
                AuthError::from(e)
            })?;

        let stub = RawProfile::signup_stub(identity.email.clone(), Utc::now());
        let profile = match self.store.merge(&identity.id, &stub).await {
            Ok(()) => ProfileCache::Present(stub),
            Err(e) => {
                tracing::warn!("[Profile] Failed to write signup profile for {}: {}", identity.id, e);
                ProfileCache::Absent
            }
        };

        tracing::info!("[Auth] Signed up {}", identity.email);
        self.state = IdentityState::SignedIn {
            identity: identity.clone(),
            profile,
        };
        Ok(identity)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.drain_before_auth_call().await;

        let identity = self
            .provider
            .authenticate(email, password)
            .await
            .map_err(|e| {
                tracing::warn!("[Auth] Login failed ({}): {}", e.code, e.message);
                AuthError::from(e)
            })?;

        self.state = IdentityState::SignedIn {
            identity: identity.clone(),
            profile: ProfileCache::Unknown,
        };
        if let Err(e) = self.get_profile().await {
            tracing::warn!("[Profile] Profile fetch after login failed, signing out again: {}", e);
            if let Err(e) = self.provider.end_session().await {
                tracing::warn!("[Auth] Provider sign-out after failed login failed: {}", e.message);
            }
            self.state = IdentityState::SignedOut;
            return Err(AuthError::ProviderUnavailable);
        }

        tracing::info!("[Auth] Logged in {}", identity.email);
        Ok(identity)
    }

    /// Sign out. Local state is cleared even when the provider call fails.
    pub async fn logout(&mut self) {
        self.drain_before_auth_call().await;

        if let Err(e) = self.provider.end_session().await {
            let err = AuthError::from(e);
            tracing::warn!("[Auth] Provider sign-out failed, clearing local session anyway: {}", err);
        }
        self.state = IdentityState::SignedOut;
        tracing::info!("[Auth] Logged out");
    }

    /// Point read of the signed-in user's stored profile. Refreshes the cache.
    pub async fn get_profile(&mut self) -> Result<Option<RawProfile>, ProfileError> {
        let key = self.require_identity()?.id.clone();
        let fetched = self.store.get(&key).await.map_err(|e| {
            tracing::error!("[Profile] Failed to read profile {}: {}", key, e);
            ProfileError::from(e)
        })?;

        if let IdentityState::SignedIn { identity, profile } = &mut self.state {
            if identity.id == key {
                *profile = match &fetched {
                    Some(raw) => ProfileCache::Present(raw.clone()),
                    None => ProfileCache::Absent,
                };
            }
        }
        Ok(fetched)
    }

    /// Merge-write `partial` and re-read the stored result.
    ///
    /// Only fields present in `partial` are written. When the write fails the
    /// cache keeps its previous value and the error is returned. When only the
    /// read-back fails the write still counts: the partial is merged into the
    /// cached copy and the call succeeds.
    pub async fn update_profile(&mut self, partial: &RawProfile) -> Result<(), ProfileError> {
        let key = self.require_identity()?.id.clone();
        self.store.merge(&key, partial).await.map_err(|e| {
            tracing::error!("[Profile] Failed to update profile {}: {}", key, e);
            ProfileError::from(e)
        })?;
        tracing::debug!("[Profile] Merged update for {}", key);
        if let Err(e) = self.get_profile().await {
            tracing::warn!("[Profile] Re-read after update failed, merging into cache: {}", e);
            self.merge_into_cache(partial);
        }
        Ok(())
    }

    /// Submit a setup/edit form.
    pub async fn save_profile(&mut self, form: &ProfileForm) -> Result<(), ProfileError> {
        let partial = form.to_partial(&self.aggregator.settings().list_join_separator);
        self.update_profile(&partial).await
    }

    /// First resolution: applies the provider's state at subscription time.
    pub async fn resolve_initial(&mut self) -> Result<(), ProfileError> {
        if self.is_resolved() {
            return Ok(());
        }
        if !self.process_next_change().await? {
            tracing::warn!("[Auth] Session subscription ended before resolving, assuming signed out");
            self.state = IdentityState::SignedOut;
        }
        Ok(())
    }

    /// Wait for one provider change and apply it.
    /// Returns `false` once the subscription has ended.
    pub async fn process_next_change(&mut self) -> Result<bool, ProfileError> {
        match self.subscription.next().await {
            Some(change) => {
                self.apply_change(change).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply every change already queued, without waiting for new ones.
    ///
    /// A failed profile fetch does not stop the drain; the first error is
    /// returned once the queue is empty.
    pub async fn process_pending_changes(&mut self) -> Result<usize, ProfileError> {
        let mut applied = 0;
        let mut first_error = None;
        while let Some(change) = self.subscription.try_next() {
            if let Err(e) = self.apply_change(change).await {
                first_error.get_or_insert(e);
            }
            applied += 1;
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(applied),
        }
    }

    /// Stop listening to the provider. The current state is kept.
    pub fn unsubscribe(&mut self) {
        self.subscription.unsubscribe();
    }

    async fn apply_change(&mut self, change: SessionChange) -> Result<(), ProfileError> {
        match change {
            SessionChange::SignedOut => {
                tracing::debug!("[Auth] Session change: signed out");
                self.state = IdentityState::SignedOut;
                Ok(())
            }
            SessionChange::SignedIn(identity) => {
                tracing::debug!("[Auth] Session change: signed in as {}", identity.email);
                let same_identity = self.identity().is_some_and(|current| current.id == identity.id);
                if !same_identity {
                    self.state = IdentityState::SignedIn {
                        identity,
                        profile: ProfileCache::Unknown,
                    };
                }
                self.get_profile().await.map(|_| ())
            }
        }
    }

    fn merge_into_cache(&mut self, partial: &RawProfile) {
        if let IdentityState::SignedIn { profile, .. } = &mut self.state {
            let base = match profile {
                ProfileCache::Present(raw) => raw.clone(),
                ProfileCache::Unknown | ProfileCache::Absent => RawProfile::default(),
            };
            match merge_profile(&base, partial) {
                Ok(merged) => *profile = ProfileCache::Present(merged),
                Err(e) => tracing::warn!("[Profile] Could not merge update into cache: {}", e),
            }
        }
    }

    async fn drain_before_auth_call(&mut self) {
        if let Err(e) = self.process_pending_changes().await {
            tracing::warn!("[Auth] Failed to apply queued session change: {}", e);
        }
    }

    fn require_identity(&self) -> Result<&Identity, ProfileError> {
        self.identity().ok_or(ProfileError::NotSignedIn)
    }
}
