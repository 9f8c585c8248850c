//! Product review types.
//!
//! A [`ReviewBook`] serializes to a single JSON object keyed by product name,
//! each value an array of `{"user": .., "review": ..}` records:
//!
//! ```json
//! {"Laptop": [{"user": "alice", "review": "Great laptop!"}]}
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewEntry {
    #[serde(rename = "user")]
    pub author: String,
    #[serde(rename = "review")]
    pub text: String,
}

impl ReviewEntry {
    #[must_use]
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }
}

/// All reviews, grouped by product name.
///
/// Products and their reviews keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewBook(IndexMap<String, Vec<ReviewEntry>>);

impl ReviewBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a review for `product`.
    pub fn add(&mut self, product: &str, entry: ReviewEntry) {
        self.0.entry(product.to_owned()).or_default().push(entry);
    }

    /// Whether `product` has an entry, even an empty one.
    #[must_use]
    pub fn contains(&self, product: &str) -> bool {
        self.0.contains_key(product)
    }

    /// Remove the most recent review for `product`, keeping the product key.
    pub fn pop(&mut self, product: &str) -> Option<ReviewEntry> {
        self.0.get_mut(product)?.pop()
    }

    /// Remove `product` and all of its reviews.
    pub fn remove(&mut self, product: &str) -> Option<Vec<ReviewEntry>> {
        self.0.shift_remove(product)
    }

    /// Reviews for `product`, or `None` if it has none.
    #[must_use]
    pub fn get(&self, product: &str) -> Option<&[ReviewEntry]> {
        self.0
            .get(product)
            .map(Vec::as_slice)
            .filter(|entries| !entries.is_empty())
    }

    /// Products with at least one review.
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// Total number of reviews across all products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
