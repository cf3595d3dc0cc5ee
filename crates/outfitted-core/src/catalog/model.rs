//! Catalog domain models.
//!
//! These are the typed counterparts of the backend's wire objects. They are
//! validated once at the system boundary (deserialization in the API client)
//! and never re-validated ad hoc downstream.

use serde::{Deserialize, Serialize};

/// A named sub-component of an outfit (e.g. a garment).
///
/// `id` is server-assigned and absent on drafts that have not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Immutable reference data used by the catalog filter and the composer's
/// category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A single catalog entry, owned by the backend.
///
/// The client only ever holds read-only copies of this type; edits go through
/// an [`OutfitDraft`](crate::composer::OutfitDraft) buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: i64,
    /// Full category object, present on read responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Raw result of a paged catalog read: the page's entries plus the total
/// count matching the active filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitList {
    pub items: Vec<Outfit>,
    pub total: u64,
}

/// One page of the catalog, as seen by the browsing view.
///
/// `page_number` starts at 1 and is owned by the caller's navigation state;
/// it is carried here untouched, not clamped.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub items: Vec<Outfit>,
    pub total: u64,
    pub page_size: u32,
    pub page_number: u32,
}

impl CatalogPage {
    /// Number of pages needed to show `total` entries at `page_size` per page.
    ///
    /// Always `ceil(total / page_size)`; zero when the catalog is empty.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}
