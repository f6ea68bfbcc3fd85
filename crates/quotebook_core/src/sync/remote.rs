//! Remote endpoint contract.

use super::SyncResult;
use crate::model::quote::{Quote, RemoteQuoteRecord};
use std::future::Future;

/// Remote quote collection reachable over the network.
pub trait QuoteRemote {
    /// Fetches the full remote collection.
    fn fetch_quotes(&self) -> impl Future<Output = SyncResult<Vec<RemoteQuoteRecord>>> + Send;

    /// Sends one quote and returns the endpoint's JSON acknowledgement.
    fn publish_quote(
        &self,
        quote: &Quote,
    ) -> impl Future<Output = SyncResult<serde_json::Value>> + Send;
}
