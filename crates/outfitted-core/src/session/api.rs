//! Authentication API trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::Identity;

/// An abstract client for the user authentication endpoints.
///
/// This trait defines the contract for credential exchange and identity
/// lookup, decoupling session management from the HTTP transport.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a bearer token (`POST /users/login`,
    /// form-encoded).
    ///
    /// # Returns
    ///
    /// - `Ok(token)`: Credentials accepted
    /// - `Err(Auth)`: Credentials rejected
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Registers a new user (`POST /users/register`).
    ///
    /// Server-side rejections (e.g. duplicate username) surface their detail
    /// message verbatim.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<()>;

    /// Resolves the identity behind a token (`GET /users/me`).
    async fn me(&self, token: &str) -> Result<Identity>;
}
