//! Remote quote synchronization over plain HTTP polling.
//!
//! # Responsibility
//! - Fetch the remote collection and merge it (remote wins on text collision).
//! - Publish newly added local quotes, at most once.
//! - Drive periodic fetches on a fixed schedule.
//!
//! # Invariants
//! - Failures are logged where they occur and never retried.
//! - Suspension happens only while a fetch or publish is in flight.

use crate::repo::quote_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod http_remote;
mod remote;
mod schedule;
mod sync_client;

pub use http_remote::HttpQuoteRemote;
pub use remote::QuoteRemote;
pub use schedule::SyncSchedule;
pub use sync_client::{MergeReport, SyncClient};

pub type SyncResult<T> = Result<T, SyncError>;

/// Remote synchronization failures.
#[derive(Debug)]
pub enum SyncError {
    /// Transport-level failure (connect, timeout, body read).
    Network(reqwest::Error),
    /// Endpoint answered with a non-success HTTP status.
    Status(u16),
    /// Response body is not the expected JSON shape.
    Parse(String),
    /// Merged result could not be persisted.
    Repo(RepoError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Status(code) => write!(f, "remote endpoint returned status {code}"),
            Self::Parse(message) => write!(f, "unexpected remote payload: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Status(_) | Self::Parse(_) => None,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value)
    }
}

impl From<RepoError> for SyncError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl SyncError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status(_) => "http_status",
            Self::Parse(_) => "parse",
            Self::Repo(_) => "persist",
        }
    }
}
