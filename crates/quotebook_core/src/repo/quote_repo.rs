//! Quote repository over a key-value store.
//!
//! # Responsibility
//! - Load the collection once at startup, falling back to built-in defaults.
//! - Provide add/merge/import operations with explicit conflict policy.
//! - Serialize the collection for export.
//!
//! # Invariants
//! - `add` never deduplicates; `merge` and `import_batch` resolve text
//!   collisions in favor of the incoming record.
//! - After `merge` or `import_batch`, no two quotes share the same `text`
//!   among the incoming records. Local duplicates from `add` survive unless
//!   an incoming record collides with them, which removes every copy.

use crate::model::quote::{default_quotes, Quote, QuoteValidationError};
use crate::service::category_index::CategoryIndex;
use crate::store::{KeyValueStore, StoreError, QUOTES_KEY};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quote mutations and persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Add-quote input failed field validation.
    Validation(QuoteValidationError),
    /// Imported data is not a sequence of `{text, category}` records.
    Format(String),
    /// Durable store read/write failure.
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Format(message) => write!(f, "invalid quote data: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Format(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// In-memory quote collection mirrored to a durable store.
pub struct QuoteRepository<S: KeyValueStore> {
    store: S,
    quotes: Vec<Quote>,
}

impl<S: KeyValueStore> QuoteRepository<S> {
    /// Reads the collection from `store`.
    ///
    /// Missing or malformed stored data falls back to the built-in defaults
    /// without raising an error. Only store access failures propagate.
    pub fn load(store: S) -> RepoResult<Self> {
        let quotes = match store.get(QUOTES_KEY)? {
            Some(raw) => match parse_stored(&raw) {
                Some(quotes) => {
                    debug!(
                        "event=quotes_load module=repo status=ok source=store count={}",
                        quotes.len()
                    );
                    quotes
                }
                None => {
                    warn!(
                        "event=quotes_load module=repo status=fallback reason=invalid_stored_data bytes={}",
                        raw.len()
                    );
                    default_quotes()
                }
            },
            None => {
                debug!("event=quotes_load module=repo status=ok source=defaults");
                default_quotes()
            }
        };

        Ok(Self { store, quotes })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends one quote and persists the collection.
    ///
    /// Returns the created quote so callers can publish it.
    pub fn add(&mut self, text: &str, category: &str) -> RepoResult<Quote> {
        let quote = Quote::new(text, category)?;

        let mut next = self.quotes.clone();
        next.push(quote.clone());
        self.commit(next)?;

        info!(
            "event=quote_add module=repo status=ok total={}",
            self.quotes.len()
        );
        Ok(quote)
    }

    /// Reconciles with a remote collection; remote wins on text collision.
    ///
    /// Local quotes whose text matches any remote quote are dropped, then the
    /// remote set is appended in its own order. Returns how many remote quotes
    /// were new or differed from the local copy.
    pub fn merge(&mut self, remote: Vec<Quote>) -> RepoResult<usize> {
        let changed = self.apply_incoming(remote)?;
        info!(
            "event=quotes_merge module=repo status=ok changed={} total={}",
            changed,
            self.quotes.len()
        );
        Ok(changed)
    }

    /// Imports a batch of quotes using the same policy as `merge`.
    pub fn import_batch(&mut self, quotes: Vec<Quote>) -> RepoResult<usize> {
        for (position, quote) in quotes.iter().enumerate() {
            quote
                .validate()
                .map_err(|err| RepoError::Format(format!("record {position}: {err}")))?;
        }

        let changed = self.apply_incoming(quotes)?;
        info!(
            "event=quotes_import module=repo status=ok changed={} total={}",
            changed,
            self.quotes.len()
        );
        Ok(changed)
    }

    /// Parses a JSON array of `{text, category}` and imports it.
    pub fn import_json(&mut self, raw: &str) -> RepoResult<usize> {
        let quotes: Vec<Quote> =
            serde_json::from_str(raw).map_err(|err| RepoError::Format(err.to_string()))?;
        self.import_batch(quotes)
    }

    /// Serializes the collection as a pretty-printed JSON array.
    pub fn export_json(&self) -> RepoResult<String> {
        serde_json::to_string_pretty(&self.quotes).map_err(|err| RepoError::Format(err.to_string()))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        self.category_index().into_vec()
    }

    pub fn category_index(&self) -> CategoryIndex {
        CategoryIndex::build(&self.quotes)
    }

    fn apply_incoming(&mut self, incoming: Vec<Quote>) -> RepoResult<usize> {
        let mut seen_texts = HashSet::new();
        let incoming: Vec<Quote> = incoming
            .into_iter()
            .filter(|quote| seen_texts.insert(quote.text.clone()))
            .collect();

        let local: HashSet<&Quote> = self.quotes.iter().collect();
        let changed = incoming.iter().filter(|quote| !local.contains(quote)).count();

        let mut next: Vec<Quote> = self
            .quotes
            .iter()
            .filter(|quote| !seen_texts.contains(&quote.text))
            .cloned()
            .collect();
        next.extend(incoming);

        if next != self.quotes {
            self.commit(next)?;
        }
        Ok(changed)
    }

    fn commit(&mut self, next: Vec<Quote>) -> RepoResult<()> {
        let encoded =
            serde_json::to_string(&next).map_err(|err| RepoError::Format(err.to_string()))?;
        self.store.set(QUOTES_KEY, &encoded)?;
        self.quotes = next;
        Ok(())
    }
}

fn parse_stored(raw: &str) -> Option<Vec<Quote>> {
    let quotes: Vec<Quote> = serde_json::from_str(raw).ok()?;
    if quotes.iter().all(|quote| quote.validate().is_ok()) {
        Some(quotes)
    } else {
        None
    }
}
