//! HTTP retrieval of the financial-data document.

use reqwest::Client;

use crate::document::Document;
use crate::error::{IngestError, Result};

/// Client fetching a nested financial-data document from a URL.
///
/// The document is a single JSON object (see [`Document`]); the URL is
/// supplied by the caller, typically a pre-signed file link.
#[derive(Debug, Clone, Default)]
pub struct DocumentClient {
    client: Client,
}

impl DocumentClient {
    /// Create a new client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch the raw JSON text of the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the server answers with a
    /// non-success status.
    pub async fn fetch_raw(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::Http { status, body });
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails, the server answers with a
    /// non-success status, or the body is not a document-shaped JSON object.
    pub async fn fetch_document(&self, url: &str) -> Result<Document> {
        let text = self.fetch_raw(url).await?;
        Document::from_json(&text)
    }
}
