//! Catalog API trait.
//!
//! Defines the interface to the backend's outfit and category endpoints,
//! decoupling the core logic from the HTTP transport (implemented by
//! `outfitted-infrastructure`).

use async_trait::async_trait;
use serde::Serialize;

use crate::catalog::model::{Category, Outfit, OutfitList};
use crate::error::Result;

/// Item fields sent on create/update. Server-assigned ids are never echoed
/// back; the backend replaces the entry's item list wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPayload {
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
}

/// JSON body for `POST /outfits/` and `PUT /outfits/{id}`.
///
/// The image travels as a reference URL, not an upload. This is the only
/// write encoding that supports both create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitPayload {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: i64,
    pub items: Vec<ItemPayload>,
}

/// An abstract client for the outfit and category endpoints.
///
/// Read operations are unauthenticated; mutations carry the caller's bearer
/// token and are admin-enforced server-side.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one window of the catalog.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of entries to return
    /// * `offset` - Number of entries to skip
    /// * `category_id` - Optional category filter; `None` means all categories
    async fn list_outfits(
        &self,
        limit: u32,
        offset: u64,
        category_id: Option<i64>,
    ) -> Result<OutfitList>;

    /// Fetches a single outfit by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Outfit)`: Entry found
    /// - `Err(NotFound)`: No entry with this id
    async fn get_outfit(&self, outfit_id: i64) -> Result<Outfit>;

    /// Creates a new outfit. Admin-only server-side.
    async fn create_outfit(&self, token: &str, payload: &OutfitPayload) -> Result<Outfit>;

    /// Replaces an existing outfit's fields and item list. Admin-only
    /// server-side.
    async fn update_outfit(
        &self,
        token: &str,
        outfit_id: i64,
        payload: &OutfitPayload,
    ) -> Result<Outfit>;

    /// Deletes an outfit. Admin-only server-side.
    async fn delete_outfit(&self, token: &str, outfit_id: i64) -> Result<()>;

    /// Lists all categories. Idempotent and side-effect free.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Fetches a single category by id.
    async fn get_category(&self, category_id: i64) -> Result<Category>;
}
