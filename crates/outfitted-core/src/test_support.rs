//! In-memory API and storage stubs shared by the unit tests.
//!
//! The stubs model the backend's observable behavior (including its error
//! details) closely enough that component tests exercise the same contracts
//! the REST client maps to.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::api::{CatalogApi, OutfitPayload};
use crate::catalog::model::{Category, Item, Outfit, OutfitList};
use crate::error::{OutfittedError, Result};
use crate::favorites::api::FavoritesApi;
use crate::session::api::AuthApi;
use crate::session::model::Identity;
use crate::session::repository::TokenStore;
use crate::session::SessionManager;

// ============================================================================
// Token store
// ============================================================================

/// Token store backed by a plain in-memory cell.
pub(crate) struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
        }
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

// ============================================================================
// Auth API
// ============================================================================

/// Auth backend accepting the password "secret" for any username.
pub(crate) struct StubAuthApi {
    pub token: String,
    is_admin: bool,
    fail_me: Mutex<bool>,
    register_rejection: Mutex<Option<String>>,
    pub register_calls: Mutex<Vec<(String, String, String)>>,
}

impl StubAuthApi {
    pub fn new(is_admin: bool) -> Self {
        Self {
            token: "test-token".to_string(),
            is_admin,
            fail_me: Mutex::new(false),
            register_rejection: Mutex::new(None),
            register_calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes every subsequent identity lookup fail.
    pub fn fail_identity_lookup(&self) {
        *self.fail_me.lock().unwrap() = true;
    }

    /// Makes registration fail with the given server detail.
    pub fn reject_register(&self, detail: &str) {
        *self.register_rejection.lock().unwrap() = Some(detail.to_string());
    }
}

#[async_trait]
impl AuthApi for StubAuthApi {
    async fn login(&self, _username: &str, password: &str) -> Result<String> {
        if password == "secret" {
            Ok(self.token.clone())
        } else {
            Err(OutfittedError::auth("Incorrect username or password"))
        }
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        self.register_calls.lock().unwrap().push((
            username.to_string(),
            email.to_string(),
            password.to_string(),
        ));
        match self.register_rejection.lock().unwrap().as_ref() {
            Some(detail) => Err(OutfittedError::server(400, detail.clone())),
            None => Ok(()),
        }
    }

    async fn me(&self, token: &str) -> Result<Identity> {
        if *self.fail_me.lock().unwrap() || token != self.token {
            return Err(OutfittedError::auth("Could not validate credentials"));
        }
        Ok(Identity {
            username: "alice".to_string(),
            is_admin: self.is_admin,
        })
    }
}

// ============================================================================
// Catalog API
// ============================================================================

/// Catalog backend over an in-memory entry list.
///
/// Entries are spread over category ids 1..=3 round-robin so filter tests
/// have something to select.
pub(crate) struct StubCatalogApi {
    outfits: Mutex<Vec<Outfit>>,
    fail: Mutex<Option<OutfittedError>>,
    pub list_calls: Mutex<Vec<(u32, u64, Option<i64>)>>,
    pub created: Mutex<Vec<OutfitPayload>>,
    pub updated: Mutex<Vec<(i64, OutfitPayload)>>,
    pub deleted: Mutex<Vec<i64>>,
}

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: "Casual".to_string(),
        },
        Category {
            id: 2,
            name: "Evening".to_string(),
        },
        Category {
            id: 3,
            name: "Street".to_string(),
        },
    ]
}

impl StubCatalogApi {
    pub fn with_outfits(count: usize) -> Self {
        let outfits = (1..=count as i64)
            .map(|id| {
                let category_id = (id - 1) % 3 + 1;
                Outfit {
                    id,
                    title: format!("Outfit {id}"),
                    description: None,
                    image_url: Some(format!("https://img.example/{id}.jpg")),
                    category_id,
                    category: categories().into_iter().find(|c| c.id == category_id),
                    items: Vec::new(),
                }
            })
            .collect();
        Self {
            outfits: Mutex::new(outfits),
            fail: Mutex::new(None),
            list_calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next mutating call fail with the given error.
    pub fn fail_next(&self, err: OutfittedError) {
        *self.fail.lock().unwrap() = Some(err);
    }

    /// Server-side rename, to observe re-fetch semantics.
    pub fn rename_outfit(&self, outfit_id: i64, title: &str) {
        let mut outfits = self.outfits.lock().unwrap();
        if let Some(outfit) = outfits.iter_mut().find(|o| o.id == outfit_id) {
            outfit.title = title.to_string();
        }
    }

    fn take_failure(&self) -> Result<()> {
        match self.fail.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn materialize(&self, id: i64, payload: &OutfitPayload) -> Outfit {
        Outfit {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            image_url: payload.image_url.clone(),
            category_id: payload.category_id,
            category: categories().into_iter().find(|c| c.id == payload.category_id),
            items: payload
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| Item {
                    id: Some(id * 100 + index as i64),
                    name: item.name.clone(),
                    brand: item.brand.clone(),
                    model: item.model.clone(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl CatalogApi for StubCatalogApi {
    async fn list_outfits(
        &self,
        limit: u32,
        offset: u64,
        category_id: Option<i64>,
    ) -> Result<OutfitList> {
        self.list_calls
            .lock()
            .unwrap()
            .push((limit, offset, category_id));

        let outfits = self.outfits.lock().unwrap();
        let filtered: Vec<&Outfit> = outfits
            .iter()
            .filter(|o| category_id.is_none_or(|id| o.category_id == id))
            .collect();
        let total = filtered.len() as u64;
        let items = filtered
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(OutfitList { items, total })
    }

    async fn get_outfit(&self, outfit_id: i64) -> Result<Outfit> {
        self.outfits
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == outfit_id)
            .cloned()
            .ok_or_else(|| OutfittedError::not_found("outfit", outfit_id.to_string()))
    }

    async fn create_outfit(&self, _token: &str, payload: &OutfitPayload) -> Result<Outfit> {
        self.take_failure()?;
        self.created.lock().unwrap().push(payload.clone());

        let mut outfits = self.outfits.lock().unwrap();
        let id = outfits.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let outfit = self.materialize(id, payload);
        outfits.push(outfit.clone());
        Ok(outfit)
    }

    async fn update_outfit(
        &self,
        _token: &str,
        outfit_id: i64,
        payload: &OutfitPayload,
    ) -> Result<Outfit> {
        self.take_failure()?;
        self.updated
            .lock()
            .unwrap()
            .push((outfit_id, payload.clone()));

        let mut outfits = self.outfits.lock().unwrap();
        let Some(slot) = outfits.iter_mut().find(|o| o.id == outfit_id) else {
            return Err(OutfittedError::not_found("outfit", outfit_id.to_string()));
        };
        *slot = self.materialize(outfit_id, payload);
        Ok(slot.clone())
    }

    async fn delete_outfit(&self, _token: &str, outfit_id: i64) -> Result<()> {
        self.take_failure()?;
        let mut outfits = self.outfits.lock().unwrap();
        let before = outfits.len();
        outfits.retain(|o| o.id != outfit_id);
        if outfits.len() == before {
            return Err(OutfittedError::not_found("outfit", outfit_id.to_string()));
        }
        self.deleted.lock().unwrap().push(outfit_id);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(categories())
    }

    async fn get_category(&self, category_id: i64) -> Result<Category> {
        categories()
            .into_iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| OutfittedError::not_found("category", category_id.to_string()))
    }
}

// ============================================================================
// Favorites API
// ============================================================================

/// Favorites backend over an in-memory id set (the server truth).
pub(crate) struct StubFavoritesApi {
    server: Mutex<HashSet<i64>>,
    fail: Mutex<Option<OutfittedError>>,
    latency: Mutex<Option<Duration>>,
    pub calls: Mutex<Vec<(&'static str, i64)>>,
}

impl StubFavoritesApi {
    pub fn new() -> Self {
        Self {
            server: Mutex::new(HashSet::new()),
            fail: Mutex::new(None),
            latency: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Seeds a server-side favorite.
    pub fn server_favorite(&self, outfit_id: i64) {
        self.server.lock().unwrap().insert(outfit_id);
    }

    pub fn is_server_favorite(&self, outfit_id: i64) -> bool {
        self.server.lock().unwrap().contains(&outfit_id)
    }

    /// Makes the next add/remove call fail with the given error.
    pub fn fail_next(&self, err: OutfittedError) {
        *self.fail.lock().unwrap() = Some(err);
    }

    /// Adds artificial latency to every add/remove round trip.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    async fn round_trip(&self) -> Result<()> {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match self.fail.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FavoritesApi for StubFavoritesApi {
    async fn list_favorites(&self, _token: &str) -> Result<Vec<Outfit>> {
        let ids: Vec<i64> = self.server.lock().unwrap().iter().copied().collect();
        Ok(ids
            .into_iter()
            .map(|id| Outfit {
                id,
                title: format!("Outfit {id}"),
                description: None,
                image_url: None,
                category_id: 1,
                category: None,
                items: Vec::new(),
            })
            .collect())
    }

    async fn add_favorite(&self, _token: &str, outfit_id: i64) -> Result<()> {
        self.calls.lock().unwrap().push(("add", outfit_id));
        self.round_trip().await?;

        let mut server = self.server.lock().unwrap();
        if !server.insert(outfit_id) {
            return Err(OutfittedError::server(400, "Outfit already in favorites"));
        }
        Ok(())
    }

    async fn remove_favorite(&self, _token: &str, outfit_id: i64) -> Result<()> {
        self.calls.lock().unwrap().push(("remove", outfit_id));
        self.round_trip().await?;

        let mut server = self.server.lock().unwrap();
        if !server.remove(&outfit_id) {
            return Err(OutfittedError::not_found("favorite", outfit_id.to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Session helpers
// ============================================================================

/// A session manager already logged in as "alice".
pub(crate) async fn logged_in_manager(is_admin: bool) -> Arc<SessionManager> {
    let manager = Arc::new(SessionManager::new(
        Arc::new(StubAuthApi::new(is_admin)),
        Arc::new(MemoryTokenStore::new()),
    ));
    manager
        .login("alice", "secret")
        .await
        .expect("stub login accepts the test credentials");
    manager
}

/// A session manager in the logged-out state.
pub(crate) fn logged_out_manager() -> Arc<SessionManager> {
    Arc::new(SessionManager::new(
        Arc::new(StubAuthApi::new(false)),
        Arc::new(MemoryTokenStore::new()),
    ))
}
