//! The one-shot document fetch.

use reqwest::blocking::Client;
use weave_document::DocumentRow;

use crate::{StoreConfig, StoreError};

/// Client for the remote document store.
#[derive(Debug)]
pub struct DocumentStore {
    /// Connection settings.
    config: StoreConfig,
    /// Underlying HTTP client.
    client: Client,
}

impl DocumentStore {
    /// Creates a store client from connection settings.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Fetches every published public row for the site owner, newest first.
    ///
    /// Filtering happens server-side: `visibility = public`,
    /// `status = published`, ordered by `published_at` descending. Optional
    /// columns arrive as JSON `null`.
    pub fn fetch_published(&self) -> Result<Vec<DocumentRow>, StoreError> {
        let url = format!("{}/rest/v1/documents", self.config.url);
        let owner_filter = format!("eq.{}", self.config.owner_id);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.anon_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.anon_key),
            )
            .query(&[
                ("select", "*"),
                ("user_id", owner_filter.as_str()),
                ("visibility", "eq.public"),
                ("status", "eq.published"),
                ("order", "published_at.desc"),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Query {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body = response.text()?;
        let rows: Vec<DocumentRow> = serde_json::from_str(&body)?;
        Ok(rows)
    }
}
