//! Distinct category listing derived from the quote collection.

use crate::model::quote::Quote;
use std::collections::HashSet;

/// Distinct categories in first-seen order.
///
/// Rebuilt on demand after each collection mutation; it holds no reference
/// to the collection it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<String>,
}

impl CategoryIndex {
    pub fn build(quotes: &[Quote]) -> Self {
        let mut seen = HashSet::new();
        let categories = quotes
            .iter()
            .filter(|quote| seen.insert(quote.category.as_str()))
            .map(|quote| quote.category.clone())
            .collect();
        Self { categories }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|known| known == category)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.categories
    }
}
