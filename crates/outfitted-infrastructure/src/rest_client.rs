//! REST implementation of the core's API traits.
//!
//! One `RestApiClient` serves all three seams (auth, catalog, favorites)
//! against the Outfitted backend. Credentialed calls carry the bearer token
//! in an `Authorization` header; non-2xx responses are mapped onto the core
//! error taxonomy, preserving the server's `{"detail": ...}` message
//! verbatim when present.

use std::env;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use outfitted_core::catalog::api::{CatalogApi, OutfitPayload};
use outfitted_core::catalog::model::{Category, Outfit, OutfitList};
use outfitted_core::error::{OutfittedError, Result};
use outfitted_core::favorites::FavoritesApi;
use outfitted_core::session::api::AuthApi;
use outfitted_core::session::model::Identity;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// HTTP client for the Outfitted backend.
#[derive(Clone)]
pub struct RestApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    username: String,
    #[serde(default)]
    is_admin: bool,
}

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl RestApiClient {
    /// Creates a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Creates a client from the `OUTFITTED_API_URL` environment variable,
    /// defaulting to `http://localhost:8000`.
    pub fn from_env() -> Self {
        let base_url =
            env::var("OUTFITTED_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {token}"))
    }

    /// Passes 2xx responses through; maps everything else onto the core
    /// error taxonomy.
    async fn check(
        response: Response,
        entity_type: &'static str,
        id: impl ToString,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.detail)
            .unwrap_or_else(|| "Request failed".to_string());

        tracing::debug!("request failed ({}): {}", status, detail);
        Err(match status.as_u16() {
            404 => OutfittedError::not_found(entity_type, id.to_string()),
            401 | 403 => OutfittedError::auth(detail),
            code => OutfittedError::server(code, detail),
        })
    }
}

fn transport(err: reqwest::Error) -> OutfittedError {
    OutfittedError::network(err.to_string())
}

#[async_trait]
impl AuthApi for RestApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url("/users/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response, "user", username).await?;

        let body: LoginResponse = response.json().await.map_err(transport)?;
        Ok(body.access_token)
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/users/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response, "user", username).await?;
        Ok(())
    }

    async fn me(&self, token: &str) -> Result<Identity> {
        let request = Self::bearer(self.client.get(self.url("/users/me")), token);
        let response = request.send().await.map_err(transport)?;
        let response = Self::check(response, "user", "me").await?;

        let body: MeResponse = response.json().await.map_err(transport)?;
        Ok(Identity {
            username: body.username,
            is_admin: body.is_admin,
        })
    }
}

#[async_trait]
impl CatalogApi for RestApiClient {
    async fn list_outfits(
        &self,
        limit: u32,
        offset: u64,
        category_id: Option<i64>,
    ) -> Result<OutfitList> {
        let mut query: Vec<(&str, String)> = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(category_id) = category_id {
            query.push(("category_id", category_id.to_string()));
        }

        let response = self
            .client
            .get(self.url("/outfits/"))
            .query(&query)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response, "outfit", "list").await?;

        response.json().await.map_err(transport)
    }

    async fn get_outfit(&self, outfit_id: i64) -> Result<Outfit> {
        let response = self
            .client
            .get(self.url(&format!("/outfits/{outfit_id}")))
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response, "outfit", outfit_id).await?;

        response.json().await.map_err(transport)
    }

    async fn create_outfit(&self, token: &str, payload: &OutfitPayload) -> Result<Outfit> {
        let request = Self::bearer(self.client.post(self.url("/outfits/")), token);
        let response = request.json(payload).send().await.map_err(transport)?;
        let response = Self::check(response, "outfit", &payload.title).await?;

        response.json().await.map_err(transport)
    }

    async fn update_outfit(
        &self,
        token: &str,
        outfit_id: i64,
        payload: &OutfitPayload,
    ) -> Result<Outfit> {
        let request = Self::bearer(
            self.client.put(self.url(&format!("/outfits/{outfit_id}"))),
            token,
        );
        let response = request.json(payload).send().await.map_err(transport)?;
        let response = Self::check(response, "outfit", outfit_id).await?;

        response.json().await.map_err(transport)
    }

    async fn delete_outfit(&self, token: &str, outfit_id: i64) -> Result<()> {
        let request = Self::bearer(
            self.client
                .delete(self.url(&format!("/outfits/{outfit_id}"))),
            token,
        );
        let response = request.send().await.map_err(transport)?;
        Self::check(response, "outfit", outfit_id).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let response = self
            .client
            .get(self.url("/categories/"))
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response, "category", "list").await?;

        response.json().await.map_err(transport)
    }

    async fn get_category(&self, category_id: i64) -> Result<Category> {
        let response = self
            .client
            .get(self.url(&format!("/categories/{category_id}")))
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response, "category", category_id).await?;

        response.json().await.map_err(transport)
    }
}

#[async_trait]
impl FavoritesApi for RestApiClient {
    async fn list_favorites(&self, token: &str) -> Result<Vec<Outfit>> {
        let request = Self::bearer(self.client.get(self.url("/favorites/")), token);
        let response = request.send().await.map_err(transport)?;
        let response = Self::check(response, "favorite", "list").await?;

        response.json().await.map_err(transport)
    }

    async fn add_favorite(&self, token: &str, outfit_id: i64) -> Result<()> {
        let request = Self::bearer(
            self.client
                .post(self.url(&format!("/favorites/{outfit_id}"))),
            token,
        );
        let response = request.send().await.map_err(transport)?;
        Self::check(response, "favorite", outfit_id).await?;
        Ok(())
    }

    async fn remove_favorite(&self, token: &str, outfit_id: i64) -> Result<()> {
        let request = Self::bearer(
            self.client
                .delete(self.url(&format!("/favorites/{outfit_id}"))),
            token,
        );
        let response = request.send().await.map_err(transport)?;
        Self::check(response, "favorite", outfit_id).await?;
        Ok(())
    }
}
