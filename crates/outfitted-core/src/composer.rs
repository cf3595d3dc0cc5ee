//! Create/edit workflow for catalog entries.

use std::sync::Arc;

use crate::catalog::api::{CatalogApi, ItemPayload, OutfitPayload};
use crate::catalog::model::Outfit;
use crate::error::{OutfittedError, Result};
use crate::session::SessionManager;

/// One editable item row in the draft. All fields are plain strings the way
/// a form holds them; blank-name rows are filtered out at submission, not
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub brand: String,
    pub model: String,
}

impl ItemDraft {
    fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// The composer's edit buffer. Absent source fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<i64>,
    pub items: Vec<ItemDraft>,
}

impl Default for OutfitDraft {
    /// A blank buffer always exposes one empty item row.
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            category_id: None,
            items: vec![ItemDraft::default()],
        }
    }
}

/// Builds and submits the create/edit payload for a catalog entry.
///
/// The write contract is JSON with an image reference URL; it is the same
/// for create (`POST`) and edit (`PUT`). Validation is client-side
/// precondition checking only; the server remains authoritative.
pub struct OutfitComposer {
    api: Arc<dyn CatalogApi>,
    session: Arc<SessionManager>,
    draft: OutfitDraft,
    /// Target entry id; `Some` arms edit mode
    target: Option<i64>,
}

impl OutfitComposer {
    /// Creates a composer with a blank creation draft.
    pub fn new(api: Arc<dyn CatalogApi>, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            draft: OutfitDraft::default(),
            target: None,
        }
    }

    /// Initializes the edit buffer.
    ///
    /// With an existing entry the buffer is filled field by field (missing
    /// fields default to empty) and edit mode is armed; without one the
    /// buffer resets to a blank creation draft with one empty item row.
    pub fn load_draft(&mut self, existing: Option<&Outfit>) {
        match existing {
            Some(outfit) => {
                let items: Vec<ItemDraft> = outfit
                    .items
                    .iter()
                    .map(|item| ItemDraft {
                        name: item.name.clone(),
                        brand: item.brand.clone().unwrap_or_default(),
                        model: item.model.clone().unwrap_or_default(),
                    })
                    .collect();
                self.draft = OutfitDraft {
                    title: outfit.title.clone(),
                    description: outfit.description.clone().unwrap_or_default(),
                    image_url: outfit.image_url.clone().unwrap_or_default(),
                    category_id: Some(
                        outfit
                            .category
                            .as_ref()
                            .map(|category| category.id)
                            .unwrap_or(outfit.category_id),
                    ),
                    items: if items.is_empty() {
                        vec![ItemDraft::default()]
                    } else {
                        items
                    },
                };
                self.target = Some(outfit.id);
            }
            None => {
                self.draft = OutfitDraft::default();
                self.target = None;
            }
        }
    }

    /// Read access to the draft, e.g. for rendering the form.
    pub fn draft(&self) -> &OutfitDraft {
        &self.draft
    }

    /// Mutable access to the draft's scalar fields.
    pub fn draft_mut(&mut self) -> &mut OutfitDraft {
        &mut self.draft
    }

    /// True when the composer will update an existing entry on submit.
    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    /// Appends an empty item row to the draft.
    pub fn add_item_row(&mut self) {
        self.draft.items.push(ItemDraft::default());
    }

    /// Removes an item row.
    ///
    /// # Errors
    ///
    /// `Validation` when only one row remains (a draft always exposes at
    /// least one editable row) or when the index is out of range.
    pub fn remove_item_row(&mut self, index: usize) -> Result<()> {
        if self.draft.items.len() == 1 {
            return Err(OutfittedError::validation(
                "items",
                "at least one item row must remain",
            ));
        }
        if index >= self.draft.items.len() {
            return Err(OutfittedError::validation(
                "items",
                format!("no item row at index {index}"),
            ));
        }
        self.draft.items.remove(index);
        Ok(())
    }

    /// Validates the draft and submits it.
    ///
    /// Required fields — non-empty title, a selected category, and (create
    /// mode) an image reference — fail fast with a field-level `Validation`
    /// error before any network call. Blank-name items are filtered out of
    /// the payload; an entry with zero remaining items is valid.
    ///
    /// # Returns
    ///
    /// The server's view of the created or updated entry, which may diverge
    /// from the draft (e.g. server-assigned item ids).
    pub async fn submit(&self) -> Result<Outfit> {
        if self.draft.title.trim().is_empty() {
            return Err(OutfittedError::validation("title", "title is required"));
        }
        let Some(category_id) = self.draft.category_id else {
            return Err(OutfittedError::validation(
                "category_id",
                "a category must be selected",
            ));
        };
        if self.target.is_none() && self.draft.image_url.trim().is_empty() {
            return Err(OutfittedError::validation(
                "image_url",
                "an image is required for a new entry",
            ));
        }

        let Some(token) = self.session.token().await else {
            return Err(OutfittedError::auth("submitting requires a logged-in user"));
        };

        let payload = OutfitPayload {
            title: self.draft.title.trim().to_string(),
            description: non_empty(&self.draft.description),
            image_url: non_empty(&self.draft.image_url),
            category_id,
            items: self
                .draft
                .items
                .iter()
                .filter(|item| !item.is_blank())
                .map(|item| ItemPayload {
                    name: item.name.trim().to_string(),
                    brand: non_empty(&item.brand),
                    model: non_empty(&item.model),
                })
                .collect(),
        };

        match self.target {
            Some(outfit_id) => {
                tracing::debug!("updating outfit {}", outfit_id);
                self.api.update_outfit(&token, outfit_id, &payload).await
            }
            None => {
                tracing::debug!("creating outfit '{}'", payload.title);
                self.api.create_outfit(&token, &payload).await
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
