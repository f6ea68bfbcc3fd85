//! Quote domain model.
//!
//! # Responsibility
//! - Define the `{text, category}` record stored, displayed and synced.
//! - Normalize loosely shaped remote payloads into validated quotes.
//!
//! # Invariants
//! - `text` and `category` are never empty or whitespace-only.
//! - Equality for deduplication purposes is exact `text` match.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category assigned to remote records that carry no category of their own.
pub const DEFAULT_REMOTE_CATEGORY: &str = "Server";

/// Validation failures for quote fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    EmptyText,
    EmptyCategory,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text must not be empty"),
            Self::EmptyCategory => write!(f, "quote category must not be empty"),
        }
    }
}

impl Error for QuoteValidationError {}

/// One quote with its category label.
///
/// Serialized as `{"text": ..., "category": ...}` in storage, export files and
/// publish payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    /// Creates a validated quote.
    ///
    /// Field values are kept verbatim; only blank values are rejected.
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, QuoteValidationError> {
        let quote = Self {
            text: text.into(),
            category: category.into(),
        };
        quote.validate()?;
        Ok(quote)
    }

    /// Re-checks field invariants, used for data that bypassed `new`.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::EmptyText);
        }
        if self.category.trim().is_empty() {
            return Err(QuoteValidationError::EmptyCategory);
        }
        Ok(())
    }

    /// Returns the display line `"<text>" - <category>`.
    pub fn display_line(&self) -> String {
        format!("\"{}\" - {}", self.text, self.category)
    }
}

/// Built-in collection used when durable storage holds nothing usable.
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote {
            text: "The best way to predict the future is to invent it.".to_string(),
            category: "Inspiration".to_string(),
        },
        Quote {
            text: "Life is 10% what happens to us and 90% how we react to it.".to_string(),
            category: "Motivation".to_string(),
        },
    ]
}

/// Loosely shaped record returned by the remote endpoint.
///
/// Generic JSON post endpoints return `title`/`body` objects rather than
/// quotes, so `title` stands in for missing `text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteQuoteRecord {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RemoteQuoteRecord {
    /// Converts into a quote, or `None` when no usable text is present.
    pub fn into_quote(self) -> Option<Quote> {
        let text = self
            .text
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.title.filter(|value| !value.trim().is_empty()))?;
        let category = self
            .category
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REMOTE_CATEGORY.to_string());
        Some(Quote { text, category })
    }
}
