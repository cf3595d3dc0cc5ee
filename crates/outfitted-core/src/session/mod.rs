//! Authentication state: the session model, its manager, and the seams for
//! the auth endpoints and token persistence.

pub mod api;
pub mod manager;
pub mod model;
pub mod repository;

pub use api::AuthApi;
pub use manager::SessionManager;
pub use model::{Identity, Session};
pub use repository::TokenStore;
