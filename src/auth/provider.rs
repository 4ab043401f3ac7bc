/**
 * IdentityProvider Contract
 *
 * The external service that owns credentials. The core only needs four
 * operations from it:
 *
 * - `create_account` - register and sign in a new account
 * - `authenticate` - sign in an existing account
 * - `end_session` - sign out
 * - `on_session_change` - observe sign-in / sign-out as they happen
 *
 * # Subscriptions
 *
 * `on_session_change` returns a [`SessionSubscription`]. Its first `next()`
 * yields the provider's session state at the moment of subscribing; every
 * later call yields the next change. Dropping the handle or calling
 * `unsubscribe()` ends the subscription.
 */

use std::future::Future;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::shared::error::ProviderError;
use crate::shared::identity::Identity;

/// A sign-in state change reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn(Identity),
    SignedOut,
}

impl SessionChange {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            Self::SignedOut => None,
        }
    }
}

impl From<Option<Identity>> for SessionChange {
    fn from(identity: Option<Identity>) -> Self {
        identity.map_or(Self::SignedOut, Self::SignedIn)
    }
}

/// Async identity provider.
pub trait IdentityProvider {
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Identity, ProviderError>>;
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Identity, ProviderError>>;
    fn end_session(&self) -> impl Future<Output = Result<(), ProviderError>>;
    fn on_session_change(&self) -> SessionSubscription;
}

/// Handle for one session-change subscription
#[derive(Debug)]
pub struct SessionSubscription {
    initial: Option<SessionChange>,
    receiver: Option<broadcast::Receiver<SessionChange>>,
}

impl SessionSubscription {
    /// `current` is delivered first, then whatever arrives on `receiver`.
    pub fn new(current: SessionChange, receiver: broadcast::Receiver<SessionChange>) -> Self {
        Self {
            initial: Some(current),
            receiver: Some(receiver),
        }
    }

    pub fn is_active(&self) -> bool {
        self.initial.is_some() || self.receiver.is_some()
    }

    /// Wait for the next change. `None` once unsubscribed or the provider is gone.
    pub async fn next(&mut self) -> Option<SessionChange> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        let receiver = self.receiver.as_mut()?;
        let next = loop {
            match receiver.recv().await {
                Ok(change) => break Some(change),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Auth] Session subscription skipped {} changes", skipped);
                }
                Err(RecvError::Closed) => break None,
            }
        };
        if next.is_none() {
            self.receiver = None;
        }
        next
    }

    /// The next change if one is already queued.
    pub fn try_next(&mut self) -> Option<SessionChange> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        let receiver = self.receiver.as_mut()?;
        let (next, closed) = loop {
            match receiver.try_recv() {
                Ok(change) => break (Some(change), false),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("[Auth] Session subscription skipped {} changes", skipped);
                }
                Err(TryRecvError::Empty) => break (None, false),
                Err(TryRecvError::Closed) => break (None, true),
            }
        };
        if closed {
            self.receiver = None;
        }
        next
    }

    pub fn unsubscribe(&mut self) {
        self.initial = None;
        self.receiver = None;
    }
}
