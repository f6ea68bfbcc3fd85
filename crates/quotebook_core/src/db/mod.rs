//! SQLite file handling behind `SqliteStore`.
//!
//! Opening a store file always runs the migrations in `migrations` first, so
//! every connection handed out already has the `kv_entries` table.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures raised while opening or querying the store database.
#[derive(Debug)]
pub enum DbError {
    /// The store file at `path` could not be opened or bootstrapped.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// A statement against an open store failed.
    Query(rusqlite::Error),
    /// The file was written by a newer build with an unknown schema.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Path of the store file, when the failure happened while opening it.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. } => Some(path.as_path()),
            Self::Query(_) | Self::SchemaTooNew { .. } => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open quote store `{}`: {source}", path.display())
            }
            Self::Query(err) => write!(f, "quote store query failed: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "quote store schema v{found} was written by a newer build (this build reads up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Query(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}
