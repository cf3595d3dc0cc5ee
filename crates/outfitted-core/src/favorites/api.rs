//! Favorites API trait.

use async_trait::async_trait;

use crate::catalog::model::Outfit;
use crate::error::Result;

/// An abstract client for the per-user favorites endpoints.
///
/// All operations are bearer-token authenticated; the server scopes them to
/// the identity behind the token.
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    /// Fetches the full list of favorited outfits (`GET /favorites/`).
    async fn list_favorites(&self, token: &str) -> Result<Vec<Outfit>>;

    /// Marks an outfit as favorite (`POST /favorites/{id}`).
    ///
    /// Favoriting an already-favorited outfit is a server-side error and
    /// surfaces as such.
    async fn add_favorite(&self, token: &str, outfit_id: i64) -> Result<()>;

    /// Unmarks an outfit (`DELETE /favorites/{id}`).
    async fn remove_favorite(&self, token: &str, outfit_id: i64) -> Result<()>;
}
