//! Route guard
//!
//! Gates navigation to protected views on session presence. The routing
//! table itself lives with the caller; the guard only answers "may this
//! navigation proceed" for one target at a time.

use std::sync::Arc;

use crate::session::SessionStore;

/// What the guard needs to know about a navigation attempt
#[derive(Debug, Clone, Default)]
pub struct NavigationTarget {
    /// Destination is marked as requiring an established session
    pub requires_auth: bool,

    /// One-time token carried in the target's query parameters, used to let
    /// an OAuth callback landing through before the session is persisted
    pub query_token: Option<String>,
}

impl NavigationTarget {
    /// A destination anyone may visit
    pub fn public() -> Self {
        Self::default()
    }

    /// A destination requiring an established session
    pub fn protected() -> Self {
        Self {
            requires_auth: true,
            query_token: None,
        }
    }

    pub fn with_query_token(mut self, token: impl Into<String>) -> Self {
        self.query_token = Some(token.into());
        self
    }
}

/// Guard verdict for a single navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

/// Session-presence check consulted on every navigation event
pub struct RouteGuard {
    store: Arc<dyn SessionStore>,
}

impl RouteGuard {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Decide whether navigation to `target` may proceed.
    ///
    /// The store is consulted fresh on every call; nothing is cached between
    /// navigation events.
    pub fn evaluate(&self, target: &NavigationTarget) -> GuardDecision {
        if !target.requires_auth {
            return GuardDecision::Allow;
        }

        let has_query_token = target
            .query_token
            .as_deref()
            .is_some_and(|token| !token.is_empty());

        if has_query_token || self.store.get().is_some() {
            GuardDecision::Allow
        } else {
            log::debug!("[guard] no session and no query token, redirecting to login");
            GuardDecision::RedirectToLogin
        }
    }
}
