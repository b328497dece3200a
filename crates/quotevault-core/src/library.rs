//! Favorites and collections -- thin wrappers over the hosted backend.
//!
//! The backend owns all persistence and consistency; these calls only
//! shape requests. Favorite toggling is a delete-or-insert keyed on the
//! current state, exactly what the client screens do optimistically.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{BackendError, Result};
use crate::quote::Quote;

/// A named collection of quotes owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub quote_count: u32,
}

/// Client for the favorites and collections endpoints.
pub struct RemoteLibrary {
    base_url: String,
    token: Option<String>,
    client: Client,
    runtime: tokio::runtime::Runtime,
}

impl RemoteLibrary {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        if base_url.is_empty() {
            return Err(BackendError::NotConfigured.into());
        }
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| BackendError::Request(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
            runtime,
        })
    }

    fn send<T: for<'de> Deserialize<'de>>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        self.runtime.block_on(async {
            let mut req = self.client.request(method, &url);
            if let Some(token) = &self.token {
                req = req.bearer_auth(token);
            }
            if let Some(body) = body {
                req = req.json(&body);
            }
            let resp = req.send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(BackendError::Status {
                    status: status.as_u16(),
                    message: resp.text().await.unwrap_or_default(),
                });
            }
            Ok(resp.json::<T>().await?)
        })
    }

    /// All quotes the user has favorited.
    pub fn favorites(&self, user_id: &str) -> Result<Vec<Quote>> {
        Ok(self.send(
            reqwest::Method::GET,
            &format!("/users/{}/favorites", urlencoding::encode(user_id)),
            None,
        )?)
    }

    /// Toggle a favorite: delete when currently favorited, insert
    /// otherwise. Returns the new favorited state.
    pub fn toggle_favorite(
        &self,
        user_id: &str,
        quote_id: &str,
        currently_favorited: bool,
    ) -> Result<bool> {
        let path = format!(
            "/users/{}/favorites/{}",
            urlencoding::encode(user_id),
            urlencoding::encode(quote_id)
        );
        if currently_favorited {
            let _: serde_json::Value = self.send(reqwest::Method::DELETE, &path, None)?;
            Ok(false)
        } else {
            let _: serde_json::Value = self.send(reqwest::Method::PUT, &path, None)?;
            Ok(true)
        }
    }

    /// The user's collections.
    pub fn collections(&self, user_id: &str) -> Result<Vec<Collection>> {
        Ok(self.send(
            reqwest::Method::GET,
            &format!("/users/{}/collections", urlencoding::encode(user_id)),
            None,
        )?)
    }

    /// Create a named collection. The id is generated client-side so
    /// the call is safely retryable.
    pub fn create_collection(&self, user_id: &str, name: &str) -> Result<Collection> {
        let id = uuid::Uuid::new_v4().to_string();
        Ok(self.send(
            reqwest::Method::POST,
            &format!("/users/{}/collections", urlencoding::encode(user_id)),
            Some(serde_json::json!({ "id": id, "name": name })),
        )?)
    }

    /// Add a quote to a collection.
    pub fn add_to_collection(&self, collection_id: &str, quote_id: &str) -> Result<()> {
        let _: serde_json::Value = self.send(
            reqwest::Method::PUT,
            &format!(
                "/collections/{}/quotes/{}",
                urlencoding::encode(collection_id),
                urlencoding::encode(quote_id)
            ),
            None,
        )?;
        Ok(())
    }

    /// Remove a quote from a collection.
    pub fn remove_from_collection(&self, collection_id: &str, quote_id: &str) -> Result<()> {
        let _: serde_json::Value = self.send(
            reqwest::Method::DELETE,
            &format!(
                "/collections/{}/quotes/{}",
                urlencoding::encode(collection_id),
                urlencoding::encode(quote_id)
            ),
            None,
        )?;
        Ok(())
    }
}
