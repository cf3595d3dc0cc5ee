//! Session domain model.

use serde::{Deserialize, Serialize};

/// The authenticated user's identity, derived from the token via the
/// identity-lookup endpoint. Never persisted; always re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

/// Authentication state of the client.
///
/// The two variants are the only externally observable states: either there
/// is no credential, or there is a token whose identity was successfully
/// resolved. A persisted token that fails identity lookup degrades to
/// `LoggedOut`; a partially resolved session never escapes
/// [`SessionManager`](crate::session::SessionManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    LoggedOut,
    LoggedIn { token: String, identity: Identity },
}

impl Session {
    /// Returns the bearer token, if authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn { token, .. } => Some(token),
        }
    }

    /// Returns the resolved identity, if authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn { identity, .. } => Some(identity),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    /// True only for an authenticated session with the admin capability.
    pub fn is_admin(&self) -> bool {
        self.identity().is_some_and(|identity| identity.is_admin)
    }
}
