//! Catalog browsing: domain models, API seam, and paginated querying.

pub mod api;
pub mod model;
pub mod query;

pub use api::{CatalogApi, ItemPayload, OutfitPayload};
pub use model::{CatalogPage, Category, Item, Outfit, OutfitList};
pub use query::CatalogQuery;
