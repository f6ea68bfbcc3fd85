//! Category filter state machine and random quote display.
//!
//! # Responsibility
//! - Restore and persist the selected category across sessions.
//! - Draw a random quote from the active candidate subset.
//! - Remember the last displayed quote for the current session.
//!
//! # Invariants
//! - A restored category that no longer exists falls back to `Unfiltered`.
//! - An empty candidate subset yields `Draw::NoQuotesAvailable`, never a panic.
//! - Candidates are recomputed at draw time from the caller's collection.

use crate::model::quote::Quote;
use crate::render::RenderTarget;
use crate::service::category_index::CategoryIndex;
use crate::service::random::RandomSource;
use crate::store::{KeyValueStore, StoreError, LAST_QUOTE_KEY, SELECTED_CATEGORY_KEY};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reserved selection value meaning "no filtering".
pub const ALL_CATEGORIES: &str = "all";

pub type FilterResult<T> = Result<T, FilterError>;

#[derive(Debug)]
pub enum FilterError {
    Store(StoreError),
    Encode(String),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(message) => write!(f, "failed to encode last quote: {message}"),
        }
    }
}

impl Error for FilterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(_) => None,
        }
    }
}

impl From<StoreError> for FilterError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Active category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    Category(String),
}

impl FilterState {
    /// Maps a selection value; `all` and blank values mean no filtering.
    pub fn from_selection(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL_CATEGORIES {
            Self::Unfiltered
        } else {
            Self::Category(trimmed.to_string())
        }
    }

    /// Selection value persisted for this state.
    pub fn as_selection(&self) -> &str {
        match self {
            Self::Unfiltered => ALL_CATEGORIES,
            Self::Category(category) => category.as_str(),
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Category(category) => quote.category == *category,
        }
    }
}

/// Outcome of a random draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    Quote(Quote),
    NoQuotesAvailable,
}

/// Filter/display controller.
///
/// `D` is durable storage (selected category), `S` is session storage
/// (last shown quote).
pub struct FilterController<D: KeyValueStore, S: KeyValueStore> {
    durable: D,
    session: S,
    state: FilterState,
}

impl<D: KeyValueStore, S: KeyValueStore> FilterController<D, S> {
    /// Restores the persisted filter, validated against current categories.
    pub fn restore(durable: D, session: S, index: &CategoryIndex) -> FilterResult<Self> {
        let state = match durable.get(SELECTED_CATEGORY_KEY)? {
            Some(stored) => match FilterState::from_selection(&stored) {
                FilterState::Category(category) if !index.contains(&category) => {
                    debug!(
                        "event=filter_restore module=filter status=fallback reason=unknown_category"
                    );
                    FilterState::Unfiltered
                }
                state => state,
            },
            None => FilterState::Unfiltered,
        };

        debug!(
            "event=filter_restore module=filter status=ok filtered={}",
            state != FilterState::Unfiltered
        );
        Ok(Self {
            durable,
            session,
            state,
        })
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Switches the active filter and persists it immediately.
    pub fn select(&mut self, selection: &str) -> FilterResult<&FilterState> {
        let next = FilterState::from_selection(selection);
        self.durable
            .set(SELECTED_CATEGORY_KEY, next.as_selection())?;
        self.state = next;
        Ok(&self.state)
    }

    /// Quotes matching the active filter, in collection order.
    pub fn candidates<'a>(&self, quotes: &'a [Quote]) -> Vec<&'a Quote> {
        quotes
            .iter()
            .filter(|quote| self.state.matches(quote))
            .collect()
    }

    /// Draws one candidate uniformly and remembers it for the session.
    pub fn pick_random(
        &self,
        quotes: &[Quote],
        rng: &mut dyn RandomSource,
    ) -> FilterResult<Draw> {
        let candidates = self.candidates(quotes);
        if candidates.is_empty() {
            return Ok(Draw::NoQuotesAvailable);
        }

        let index = rng.next_index(candidates.len()) % candidates.len();
        let quote = candidates[index].clone();
        let encoded =
            serde_json::to_string(&quote).map_err(|err| FilterError::Encode(err.to_string()))?;
        self.session.set(LAST_QUOTE_KEY, &encoded)?;
        Ok(Draw::Quote(quote))
    }

    /// Last quote shown in this session, if any.
    pub fn last_shown(&self) -> FilterResult<Option<Quote>> {
        let Some(raw) = self.session.get(LAST_QUOTE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Quote>(&raw) {
            Ok(quote) if quote.validate().is_ok() => Ok(Some(quote)),
            _ => {
                warn!("event=last_quote_load module=filter status=error error_code=invalid_json");
                Ok(None)
            }
        }
    }

    /// Draws and renders one quote, or the empty message.
    pub fn show_random(
        &self,
        quotes: &[Quote],
        rng: &mut dyn RandomSource,
        target: &mut dyn RenderTarget,
    ) -> FilterResult<Draw> {
        let draw = self.pick_random(quotes, rng)?;
        match &draw {
            Draw::Quote(quote) => target.render_quote(quote),
            Draw::NoQuotesAvailable => target.render_no_quotes(),
        }
        Ok(draw)
    }

    /// Startup display: the session's last quote, else a fresh draw.
    pub fn restore_display(
        &self,
        quotes: &[Quote],
        rng: &mut dyn RandomSource,
        target: &mut dyn RenderTarget,
    ) -> FilterResult<Draw> {
        if let Some(quote) = self.last_shown()? {
            target.render_quote(&quote);
            return Ok(Draw::Quote(quote));
        }
        self.show_random(quotes, rng, target)
    }
}
