//! `reqwest`-backed remote endpoint.

use super::remote::QuoteRemote;
use super::{SyncError, SyncResult};
use crate::model::quote::{Quote, RemoteQuoteRecord};
use std::time::Duration;

/// JSON endpoint supporting `GET` (list) and `POST` (single quote).
#[derive(Debug, Clone)]
pub struct HttpQuoteRemote {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteRemote {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> SyncResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuoteRemote for HttpQuoteRemote {
    async fn fetch_quotes(&self) -> SyncResult<Vec<RemoteQuoteRecord>> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| SyncError::Parse(err.to_string()))
    }

    async fn publish_quote(&self, quote: &Quote) -> SyncResult<serde_json::Value> {
        let response = self.client.post(&self.endpoint).json(quote).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| SyncError::Parse(err.to_string()))
    }
}
