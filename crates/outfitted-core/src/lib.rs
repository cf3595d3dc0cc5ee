//! Client-side core of the Outfitted catalog application.
//!
//! Users browse a paginated, filterable collection of curated outfit
//! entries, inspect individual entries, and mark favorites; authenticated
//! administrators additionally create, edit, and delete entries. This crate
//! holds the state-machine logic that makes those flows consistent:
//!
//! - [`session::SessionManager`] owns the credential token and the identity
//!   derived from it, and is consulted by every other component to gate
//!   actions and attach credentials.
//! - [`catalog::CatalogQuery`] composes pagination and category-filter
//!   parameters into stateless server queries.
//! - [`favorites::FavoritesSynchronizer`] keeps the local favorite set in
//!   step with server truth through optimistic toggles with rollback.
//! - [`composer::OutfitComposer`] builds and submits create/edit payloads.
//! - [`detail::DetailController`] composes the above for one entry's detail
//!   view.
//!
//! The HTTP transport lives behind the `*Api` traits and is implemented by
//! the `outfitted-infrastructure` crate.

pub mod catalog;
pub mod composer;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export common error type
pub use error::{OutfittedError, Result};
