//! Token persistence trait.
//!
//! The bearer token is the sole durable session artifact; identity is always
//! re-derived from it, never stored.

use async_trait::async_trait;

use crate::error::Result;

/// An abstract store for the persisted bearer token.
///
/// Implementations keep at most one token, keyed process-wide, surviving
/// restarts until explicitly cleared (e.g. a file under the platform config
/// directory, or an in-memory store in tests).
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reads the persisted token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(token))`: A token is persisted
    /// - `Ok(None)`: No token is persisted
    /// - `Err(_)`: Storage access failed
    async fn load(&self) -> Result<Option<String>>;

    /// Persists the token, replacing any previous one.
    async fn save(&self, token: &str) -> Result<()>;

    /// Removes the persisted token. Succeeds when no token exists.
    async fn clear(&self) -> Result<()>;
}
