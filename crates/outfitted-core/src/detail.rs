//! Controller for a single entry's detail view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::catalog::api::CatalogApi;
use crate::catalog::model::Outfit;
use crate::composer::OutfitComposer;
use crate::error::{OutfittedError, Result};
use crate::favorites::FavoritesSynchronizer;
use crate::session::SessionManager;

/// Drives a single entry's detail view: favorite toggle, admin-gated edit
/// and delete, and the delete confirmation flow.
///
/// Admin gating is defense in depth: the UI hides the affordances for
/// non-admins, and invoking them programmatically is rejected here as well.
/// Deletion is two-step — [`confirm_delete`] arms the flow, then
/// [`delete_confirmed`] issues the request, re-checking the admin capability.
///
/// [`confirm_delete`]: DetailController::confirm_delete
/// [`delete_confirmed`]: DetailController::delete_confirmed
pub struct DetailController {
    outfit_id: i64,
    api: Arc<dyn CatalogApi>,
    session: Arc<SessionManager>,
    favorites: Arc<FavoritesSynchronizer>,
    /// The entry as last fetched from the server
    outfit: RwLock<Option<Outfit>>,
    delete_armed: AtomicBool,
}

impl DetailController {
    /// Creates a controller for one entry. Nothing is fetched until
    /// [`load`](Self::load).
    pub fn new(
        outfit_id: i64,
        api: Arc<dyn CatalogApi>,
        session: Arc<SessionManager>,
        favorites: Arc<FavoritesSynchronizer>,
    ) -> Self {
        Self {
            outfit_id,
            api,
            session,
            favorites,
            outfit: RwLock::new(None),
            delete_armed: AtomicBool::new(false),
        }
    }

    /// Fetches the entry and replaces the held copy.
    ///
    /// # Errors
    ///
    /// `NotFound` when the entry does not exist.
    pub async fn load(&self) -> Result<Outfit> {
        let outfit = self.api.get_outfit(self.outfit_id).await?;
        *self.outfit.write().await = Some(outfit.clone());
        Ok(outfit)
    }

    /// Re-fetch-and-replace after a successful edit.
    ///
    /// The edit draft may diverge from server-normalized output (e.g.
    /// server-assigned item ids), so the view is rebuilt from the server's
    /// copy instead of patching in place.
    pub async fn refresh(&self) -> Result<Outfit> {
        self.load().await
    }

    /// The entry as last fetched, if any.
    pub async fn outfit(&self) -> Option<Outfit> {
        self.outfit.read().await.clone()
    }

    /// Favorite status of this entry; false while logged out.
    pub async fn is_favorite(&self) -> bool {
        self.favorites.is_favorite(self.outfit_id).await
    }

    /// Toggles this entry's favorite status; a silent no-op while logged out.
    pub async fn toggle_favorite(&self) -> Result<()> {
        if !self.session.is_logged_in().await {
            return Ok(());
        }
        self.favorites.toggle(self.outfit_id).await.map(|_| ())
    }

    /// True when the current identity may edit or delete this entry.
    pub async fn can_administer(&self) -> bool {
        self.session.is_admin().await
    }

    /// Opens an edit draft for this entry. Admin-only.
    ///
    /// # Errors
    ///
    /// `Auth` for non-admin identities; `Internal` when the entry has not
    /// been loaded yet.
    pub async fn begin_edit(&self) -> Result<OutfitComposer> {
        if !self.session.is_admin().await {
            return Err(OutfittedError::auth("editing requires an administrator"));
        }
        let outfit = self.outfit.read().await.clone().ok_or_else(|| {
            OutfittedError::internal("begin_edit called before the entry was loaded")
        })?;

        let mut composer = OutfitComposer::new(self.api.clone(), self.session.clone());
        composer.load_draft(Some(&outfit));
        Ok(composer)
    }

    /// Arms the delete confirmation flow. Admin-only.
    pub async fn confirm_delete(&self) -> Result<()> {
        if !self.session.is_admin().await {
            return Err(OutfittedError::auth("deleting requires an administrator"));
        }
        self.delete_armed.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Cancels an armed delete confirmation.
    pub fn cancel_delete(&self) {
        self.delete_armed.store(false, Ordering::SeqCst);
    }

    /// Issues the delete request for the armed confirmation.
    ///
    /// The admin capability is re-checked here; a non-admin identity is
    /// rejected without issuing the request. On success the caller navigates
    /// away from the now-nonexistent entry; on failure the entry stays
    /// displayed and the confirmation stays armed for a retry.
    pub async fn delete_confirmed(&self) -> Result<()> {
        if !self.session.is_admin().await {
            return Err(OutfittedError::auth("deleting requires an administrator"));
        }
        if !self.delete_armed.load(Ordering::SeqCst) {
            return Err(OutfittedError::internal(
                "delete_confirmed called without an armed confirmation",
            ));
        }
        let Some(token) = self.session.token().await else {
            return Err(OutfittedError::auth("deleting requires a logged-in user"));
        };

        self.api.delete_outfit(&token, self.outfit_id).await?;
        tracing::info!("deleted outfit {}", self.outfit_id);
        self.delete_armed.store(false, Ordering::SeqCst);
        *self.outfit.write().await = None;
        Ok(())
    }
}
