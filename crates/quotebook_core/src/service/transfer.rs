//! JSON file export and import for the quote collection.

use crate::repo::quote_repo::{QuoteRepository, RepoError};
use crate::store::KeyValueStore;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::Path;

/// Default export file name.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

#[derive(Debug)]
pub enum TransferError {
    Io(std::io::Error),
    Repo(RepoError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "file access failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for TransferError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Writes the whole collection to `path` as pretty-printed JSON.
pub fn export_to_file<S: KeyValueStore>(
    repo: &QuoteRepository<S>,
    path: impl AsRef<Path>,
) -> Result<usize, TransferError> {
    let path = path.as_ref();
    let encoded = repo.export_json()?;
    std::fs::write(path, encoded).map_err(|err| {
        error!("event=quotes_export module=transfer status=error error={err}");
        err
    })?;
    info!(
        "event=quotes_export module=transfer status=ok count={}",
        repo.len()
    );
    Ok(repo.len())
}

/// Reads a JSON array of quotes from `path` and imports it.
///
/// Returns how many imported quotes were new or replaced a local copy.
pub fn import_from_file<S: KeyValueStore>(
    repo: &mut QuoteRepository<S>,
    path: impl AsRef<Path>,
) -> Result<usize, TransferError> {
    let raw = match std::fs::read_to_string(path.as_ref()) {
        Ok(raw) => raw,
        // Not UTF-8 text, so it cannot be a JSON quote array.
        Err(err) if err.kind() == ErrorKind::InvalidData => {
            error!(
                "event=quotes_import module=transfer status=error error_code=not_utf8 error={err}"
            );
            return Err(RepoError::Format(format!("file is not UTF-8 text: {err}")).into());
        }
        Err(err) => return Err(err.into()),
    };
    match repo.import_json(&raw) {
        Ok(changed) => Ok(changed),
        Err(err) => {
            error!("event=quotes_import module=transfer status=error error={err}");
            Err(err.into())
        }
    }
}
