//! Per-user favorites: API seam and the optimistic synchronizer.

pub mod api;
pub mod synchronizer;

pub use api::FavoritesApi;
pub use synchronizer::FavoritesSynchronizer;
