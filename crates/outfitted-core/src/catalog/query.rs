//! Paginated, filterable catalog querying.

use std::sync::Arc;

use crate::catalog::api::CatalogApi;
use crate::catalog::model::{CatalogPage, Category};
use crate::error::Result;

/// Composes pagination and category-filter parameters into server queries.
///
/// `CatalogQuery` is stateless per call: every page fetch is a fresh,
/// independent round trip, a pure function of its parameters. Navigation
/// state (`page_number`, the active filter) is owned by the composing view,
/// which is also responsible for resetting the page to 1 whenever the
/// category filter changes.
#[derive(Clone)]
pub struct CatalogQuery {
    api: Arc<dyn CatalogApi>,
}

impl CatalogQuery {
    /// Creates a new `CatalogQuery` over the given API backend.
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// Fetches one page of the catalog.
    ///
    /// `page_number` starts at 1. Requesting a page beyond the last one
    /// returns an empty item list with the same total, so the caller's page
    /// count stays consistent with the active filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_number` is 0, or if the underlying request
    /// fails.
    pub async fn fetch_page(
        &self,
        page_number: u32,
        page_size: u32,
        category_id: Option<i64>,
    ) -> Result<CatalogPage> {
        if page_number == 0 {
            return Err(crate::error::OutfittedError::validation(
                "page_number",
                "page numbers start at 1",
            ));
        }

        let offset = u64::from(page_number - 1) * u64::from(page_size);
        let list = self.api.list_outfits(page_size, offset, category_id).await?;

        Ok(CatalogPage {
            items: list.items,
            total: list.total,
            page_size,
            page_number,
        })
    }

    /// Returns all categories.
    ///
    /// Safe to call repeatedly; callers may cache the result for the lifetime
    /// of a view.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.api.list_categories().await
    }

    /// Resolves a single category, e.g. to display the active filter's name.
    pub async fn get_category(&self, category_id: i64) -> Result<Category> {
        self.api.get_category(category_id).await
    }
}
