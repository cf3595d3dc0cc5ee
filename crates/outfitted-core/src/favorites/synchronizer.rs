//! Favorites membership with optimistic toggles and rollback.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::model::Outfit;
use crate::error::{OutfittedError, Result};
use crate::favorites::api::FavoritesApi;
use crate::session::SessionManager;

/// Maintains the authenticated user's favorite-entry membership set.
///
/// The local set mirrors server truth: it is rebuilt by a full fetch on
/// session establishment (never incrementally derived across restarts) and
/// every toggle is optimistic with rollback, so a failed request never leaves
/// an un-reconciled flip behind.
///
/// Toggles of the *same* entry are serialized through a per-entry lock held
/// across the network round trip: a second toggle waits for the first's
/// resolution, so the final local state is always the last settled server
/// response, never an interleaving artifact. The set itself becomes
/// non-authoritative the moment the session ends: membership is bound to the
/// session generation it was built under, and any access under a later
/// generation finds an empty set. A re-login therefore never sees the
/// previous user's favorites, even before the next [`load`](Self::load).
pub struct FavoritesSynchronizer {
    api: Arc<dyn FavoritesApi>,
    session: Arc<SessionManager>,
    /// Local favorite membership, scoped to the active session
    set: Mutex<HashSet<i64>>,
    /// The session generation [`set`](Self::set) was built under
    scope: Mutex<u64>,
    /// Per-entry serialization locks for in-flight toggles
    entry_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl FavoritesSynchronizer {
    /// Creates a new synchronizer with an empty local set.
    pub fn new(api: Arc<dyn FavoritesApi>, session: Arc<SessionManager>) -> Self {
        let scope = Mutex::new(session.generation());
        Self {
            api,
            session,
            set: Mutex::new(HashSet::new()),
            scope,
            entry_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Locks the set, first discarding it if it was built under a different
    /// session generation. Lock order is scope before set, everywhere.
    async fn scoped_set(&self, generation: u64) -> tokio::sync::MutexGuard<'_, HashSet<i64>> {
        let mut scope = self.scope.lock().await;
        let mut set = self.set.lock().await;
        if *scope != generation {
            set.clear();
            *scope = generation;
        }
        set
    }

    /// Replaces the local set with the server's favorite list.
    ///
    /// Called once per session establishment (login or restore), not per
    /// detail view. Without a session this clears the local set and returns
    /// an empty list silently.
    pub async fn load(&self) -> Result<Vec<Outfit>> {
        let generation = self.session.generation();
        let Some(token) = self.session.token().await else {
            self.scoped_set(generation).await.clear();
            return Ok(Vec::new());
        };

        let favorites = self.api.list_favorites(&token).await?;
        let ids: HashSet<i64> = favorites.iter().map(|outfit| outfit.id).collect();
        tracing::debug!("loaded {} favorites", ids.len());
        *self.scoped_set(generation).await = ids;
        Ok(favorites)
    }

    /// Pure membership query against the local set; never hits the network.
    ///
    /// Always false while logged out, and always false for memberships loaded
    /// under an earlier session; the stale set is discarded on the spot.
    pub async fn is_favorite(&self, outfit_id: i64) -> bool {
        let logged_in = self.session.is_logged_in().await;
        let set = self.scoped_set(self.session.generation()).await;
        logged_in && set.contains(&outfit_id)
    }

    /// Flips the favorite status of an entry.
    ///
    /// The local flip happens immediately; the matching add/remove request
    /// follows. On request failure the flip is reverted to the pre-toggle
    /// state and the error is returned.
    ///
    /// # Returns
    ///
    /// The settled membership after the toggle (`true` = now a favorite).
    ///
    /// # Errors
    ///
    /// `Auth` when no session is active; otherwise the request's error after
    /// rollback.
    pub async fn toggle(&self, outfit_id: i64) -> Result<bool> {
        let generation = self.session.generation();
        let Some(token) = self.session.token().await else {
            return Err(OutfittedError::auth("favorites require a logged-in user"));
        };

        let entry_lock = self.entry_lock(outfit_id).await;
        let _serialized = entry_lock.lock().await;

        // Optimistic flip, remembering the previous state for rollback.
        let was_favorite = {
            let mut set = self.scoped_set(generation).await;
            if set.remove(&outfit_id) {
                true
            } else {
                set.insert(outfit_id);
                false
            }
        };
        let now_favorite = !was_favorite;

        let outcome = if now_favorite {
            self.api.add_favorite(&token, outfit_id).await
        } else {
            self.api.remove_favorite(&token, outfit_id).await
        };

        match outcome {
            Ok(()) => Ok(now_favorite),
            Err(err) => {
                tracing::warn!("favorite toggle for {} failed, rolling back: {}", outfit_id, err);
                self.revert(outfit_id, was_favorite, generation).await;
                Err(err)
            }
        }
    }

    /// Explicit unfavorite from a favorites listing.
    ///
    /// Same contract as [`toggle`](Self::toggle) restricted to the removal
    /// direction: optimistic removal, re-insertion on failure. No ordering
    /// guarantee on re-insertion.
    pub async fn remove(&self, outfit_id: i64) -> Result<()> {
        let generation = self.session.generation();
        let Some(token) = self.session.token().await else {
            return Err(OutfittedError::auth("favorites require a logged-in user"));
        };

        let entry_lock = self.entry_lock(outfit_id).await;
        let _serialized = entry_lock.lock().await;

        let was_present = self.scoped_set(generation).await.remove(&outfit_id);

        match self.api.remove_favorite(&token, outfit_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if was_present {
                    self.revert(outfit_id, true, generation).await;
                }
                Err(err)
            }
        }
    }

    /// Undoes an optimistic flip, unless the session changed while the
    /// request was in flight and the set now belongs to a later generation.
    async fn revert(&self, outfit_id: i64, was_favorite: bool, generation: u64) {
        let scope = self.scope.lock().await;
        if *scope != generation {
            return;
        }
        let mut set = self.set.lock().await;
        if was_favorite {
            set.insert(outfit_id);
        } else {
            set.remove(&outfit_id);
        }
    }

    async fn entry_lock(&self, outfit_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.entry_locks.lock().await;
        locks.entry(outfit_id).or_default().clone()
    }
}
