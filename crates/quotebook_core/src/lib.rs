//! Core logic for Quotebook, a local quote collection with remote sync.
//! Presentation lives in front ends that implement `RenderTarget`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;
pub mod store;
pub mod sync;

pub use crate::config::{ConfigError, QuotebookConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::quote::{default_quotes, Quote, QuoteValidationError, RemoteQuoteRecord};
pub use render::{RenderTarget, NO_QUOTES_MESSAGE};
pub use repo::quote_repo::{QuoteRepository, RepoError, RepoResult};
pub use service::category_index::CategoryIndex;
pub use service::filter_service::{
    Draw, FilterController, FilterError, FilterResult, FilterState, ALL_CATEGORIES,
};
pub use service::random::{RandomSource, SequenceRandom, ThreadRandom};
pub use service::transfer::{export_to_file, import_from_file, TransferError, EXPORT_FILE_NAME};
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use sync::{HttpQuoteRemote, MergeReport, QuoteRemote, SyncClient, SyncError, SyncSchedule};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
