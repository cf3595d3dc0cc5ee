//! Infrastructure layer for the Outfitted client.
//!
//! This crate provides the concrete backends behind `outfitted-core`'s
//! seams: a reqwest-based REST client for the auth, catalog, and favorites
//! endpoints, and a file-backed token store under the platform config
//! directory.

pub mod paths;
pub mod rest_client;
pub mod token_store;

pub use paths::OutfittedPaths;
pub use rest_client::RestApiClient;
pub use token_store::FileTokenStore;
