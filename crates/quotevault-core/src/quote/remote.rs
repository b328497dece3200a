//! Thin request wrappers over the hosted quote backend.
//!
//! The backend owns persistence and querying; this module only shapes
//! requests and decodes responses. Calls are synchronous from the
//! caller's point of view -- the client drives reqwest futures on an
//! owned tokio runtime.

use reqwest::Client;
use serde::Deserialize;

use super::{Category, Quote, QuoteSource};
use crate::error::{BackendError, CoreError, Result};

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: usize,
}

/// Client for the hosted quote catalog.
pub struct RemoteQuoteSource {
    base_url: String,
    token: Option<String>,
    client: Client,
    runtime: tokio::runtime::Runtime,
}

impl RemoteQuoteSource {
    /// Create a client for the given backend base URL.
    ///
    /// # Errors
    /// Returns an error if the URL is empty or the runtime cannot start.
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

    fn get_json<T: for<'de> Deserialize<'de>>(&self, path_and_query: &str) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        self.runtime.block_on(async {
            let mut req = self.client.get(&url);
            if let Some(token) = &self.token {
                req = req.bearer_auth(token);
            }
            let resp = req.send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(BackendError::Status {
                    status: status.as_u16(),
                    message: resp.text().await.unwrap_or_default(),
                });
            }
            let value = resp.json::<T>().await?;
            Ok(value)
        })
    }

    fn not_available(err: BackendError) -> CoreError {
        CoreError::NotAvailable(err.to_string())
    }
}

impl QuoteSource for RemoteQuoteSource {
    fn count(&self) -> Result<usize> {
        let resp: CountResponse = self
            .get_json("/quotes/count")
            .map_err(Self::not_available)?;
        Ok(resp.count)
    }

    fn by_index(&self, index: usize) -> Result<Quote> {
        let quotes: Vec<Quote> = self
            .get_json(&format!("/quotes?offset={index}&limit=1"))
            .map_err(Self::not_available)?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::NotAvailable(format!("no quote at index {index}")))
    }

    fn by_id(&self, id: &str) -> Result<Quote> {
        self.get_json(&format!("/quotes/{}", urlencoding::encode(id)))
            .map_err(Self::not_available)
    }

    fn page(&self, page: usize, page_size: usize, category_id: Option<&str>) -> Result<Vec<Quote>> {
        let mut query = format!(
            "/quotes?offset={}&limit={}&order=newest",
            page * page_size,
            page_size
        );
        if let Some(cat) = category_id {
            query.push_str(&format!("&category_id={}", urlencoding::encode(cat)));
        }
        self.get_json(&query).map_err(Self::not_available)
    }

    fn search(&self, term: &str) -> Result<Vec<Quote>> {
        self.get_json(&format!(
            "/quotes/search?q={}&limit=20",
            urlencoding::encode(term)
        ))
        .map_err(Self::not_available)
    }

    fn recent(&self, limit: usize) -> Result<Vec<Quote>> {
        self.get_json(&format!("/quotes?offset=0&limit={limit}&order=newest"))
            .map_err(Self::not_available)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        self.get_json("/categories").map_err(Self::not_available)
    }
}
