//! Session lifecycle management.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::RwLock;

use crate::error::{OutfittedError, Result};
use crate::session::api::AuthApi;
use crate::session::model::{Identity, Session};
use crate::session::repository::TokenStore;

/// Username and password pattern enforced client-side before registration.
static CREDENTIAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{4,24}$").expect("credential pattern is valid"));

/// Standard address shape; full validation is the server's job.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Owns the credential token and the identity derived from it.
///
/// `SessionManager` is the single writer of the process-wide [`Session`];
/// every other component reads the session through it to gate actions and
/// attach credentials. The bearer token is the only durable artifact,
/// persisted through a [`TokenStore`] and surviving restarts until explicit
/// logout; identity is always re-derived via the identity-lookup endpoint.
///
/// State machine: `LoggedOut → login → LoggedIn(identity) → logout |
/// identity-lookup failure → LoggedOut`. No intermediate state is observable.
pub struct SessionManager {
    auth: Arc<dyn AuthApi>,
    /// Persistent storage backend for the bearer token
    tokens: Arc<dyn TokenStore>,
    /// In-memory session state, single-writer multiple-reader
    session: RwLock<Session>,
    /// Bumped on every session transition; see [`generation`](Self::generation)
    generation: AtomicU64,
}

impl SessionManager {
    /// Creates a new `SessionManager` in the `LoggedOut` state.
    ///
    /// # Arguments
    ///
    /// * `auth` - Client for the authentication endpoints
    /// * `tokens` - Storage backend for the persisted bearer token
    pub fn new(auth: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            auth,
            tokens,
            session: RwLock::new(Session::LoggedOut),
            generation: AtomicU64::new(0),
        }
    }

    /// Installs a new session and advances the generation while the write
    /// lock is held, so no reader sees the new session with the old count.
    async fn install(&self, session: Session) {
        let mut slot = self.session.write().await;
        *slot = session;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Attempts to restore a session from the persisted token at startup.
    ///
    /// A persisted token whose identity lookup fails is cleared and the
    /// session degrades to `LoggedOut`; a present token never leaves the
    /// manager in a partial state. No side effect when no token is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error only if token storage itself cannot be read.
    pub async fn restore(&self) -> Result<Session> {
        let Some(token) = self.tokens.load().await? else {
            return Ok(Session::LoggedOut);
        };

        match self.auth.me(&token).await {
            Ok(identity) => {
                tracing::info!("session restored for '{}'", identity.username);
                let session = Session::LoggedIn { token, identity };
                self.install(session.clone()).await;
                Ok(session)
            }
            Err(err) => {
                tracing::warn!("persisted token rejected, clearing: {}", err);
                if let Err(clear_err) = self.tokens.clear().await {
                    tracing::warn!("failed to clear rejected token: {}", clear_err);
                }
                self.install(Session::LoggedOut).await;
                Ok(Session::LoggedOut)
            }
        }
    }

    /// Exchanges credentials for a token and establishes a session.
    ///
    /// On success the token is persisted and the resolved identity is held in
    /// memory. Rejected credentials surface as an `Auth` error without
    /// mutating persisted state.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let token = self.auth.login(username, password).await?;
        self.tokens.save(&token).await?;

        match self.auth.me(&token).await {
            Ok(identity) => {
                tracing::info!("logged in as '{}'", identity.username);
                let session = Session::LoggedIn { token, identity };
                self.install(session.clone()).await;
                Ok(session)
            }
            Err(err) => {
                // A token we cannot resolve an identity for is useless;
                // degrade to logged-out rather than keep a partial session.
                if let Err(clear_err) = self.tokens.clear().await {
                    tracing::warn!("failed to clear unresolvable token: {}", clear_err);
                }
                self.install(Session::LoggedOut).await;
                Err(OutfittedError::auth(format!(
                    "identity lookup failed after login: {err}"
                )))
            }
        }
    }

    /// Registers a new user.
    ///
    /// Client-side preconditions fail fast with a `Validation` error before
    /// any network call: username and password must each match
    /// `^[A-Za-z0-9]{4,24}$`, and the email must look like an address.
    /// Server-side rejections (e.g. duplicate username) surface verbatim.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        if !CREDENTIAL_PATTERN.is_match(username) {
            return Err(OutfittedError::validation(
                "username",
                "must be 4-24 latin letters or digits",
            ));
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(OutfittedError::validation(
                "email",
                "must be a valid email address",
            ));
        }
        if !CREDENTIAL_PATTERN.is_match(password) {
            return Err(OutfittedError::validation(
                "password",
                "must be 4-24 latin letters or digits",
            ));
        }

        self.auth.register(username, email, password).await
    }

    /// Clears the persisted token and the in-memory session.
    ///
    /// Idempotent and always succeeds locally; no network call is involved.
    /// A token-store failure is logged but does not prevent the in-memory
    /// teardown.
    pub async fn logout(&self) {
        if let Err(err) = self.tokens.clear().await {
            tracing::warn!("failed to clear persisted token on logout: {}", err);
        }
        self.install(Session::LoggedOut).await;
        tracing::info!("logged out");
    }

    /// A counter that advances on every session transition (login, logout,
    /// restore). Components caching session-derived state compare it against
    /// the value they cached under to detect that the session has changed,
    /// even when a re-login yields a byte-identical token.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Returns a snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Returns the bearer token, if authenticated.
    pub async fn token(&self) -> Option<String> {
        self.session.read().await.token().map(str::to_owned)
    }

    /// Returns the resolved identity, if authenticated.
    pub async fn identity(&self) -> Option<Identity> {
        self.session.read().await.identity().cloned()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.read().await.is_logged_in()
    }

    /// True only for an authenticated session with the admin capability.
    pub async fn is_admin(&self) -> bool {
        self.session.read().await.is_admin()
    }
}
