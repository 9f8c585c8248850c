//! Product reviews with write-through persistence.
//!
//! # Storage
//!
//! A [`ReviewRepository`] loads and saves the whole [`ReviewBook`] at once.
//! [`ReviewStore`] loads once at construction and saves after every added
//! review; there is no batching.
//!
//! The JSON file backend rewrites the file in place. A crash in the middle
//! of a write can leave a truncated file behind, which then fails to load
//! with [`ReviewStoreError::Corrupt`]. The file is not locked either, so two
//! processes sharing one file will overwrite each other.

mod json_file;
mod memory;

use std::future::Future;
use std::path::PathBuf;

use shopapp_core::{ReviewBook, ReviewEntry};
use thiserror::Error;
use tracing::{info, instrument};

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;

/// Errors that can occur when reading or writing reviews.
#[derive(Debug, Error)]
pub enum ReviewStoreError {
    /// The backing file could not be read or written.
    #[error("review storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a review document.
    #[error("review file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The reviews could not be serialized.
    #[error("failed to serialize reviews: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Load/save backend for reviews.
pub trait ReviewRepository {
    /// Read the persisted reviews. A missing store yields an empty book.
    fn load(&self) -> impl Future<Output = Result<ReviewBook, ReviewStoreError>> + Send;

    /// Replace the persisted reviews with `book`.
    fn save(&self, book: &ReviewBook) -> impl Future<Output = Result<(), ReviewStoreError>> + Send;
}

/// Reviews for all products, kept in sync with a [`ReviewRepository`].
#[derive(Debug)]
pub struct ReviewStore<R> {
    repository: R,
    book: ReviewBook,
}

impl<R: ReviewRepository + Sync> ReviewStore<R> {
    /// Load the persisted reviews.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewStoreError`] if the store exists but cannot be read.
    pub async fn load(repository: R) -> Result<Self, ReviewStoreError> {
        let book = repository.load().await?;
        info!(reviews = book.len(), "Loaded reviews");
        Ok(Self { repository, book })
    }

    /// Append a review for `product` and persist immediately.
    ///
    /// No deduplication or ownership checks are made. If persisting fails the
    /// review is dropped again, so memory and storage stay in step.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewStoreError`] if the reviews cannot be saved.
    #[instrument(skip(self, text))]
    pub async fn add_review(
        &mut self,
        product: &str,
        text: &str,
        author: &str,
    ) -> Result<String, ReviewStoreError> {
        let known = self.book.contains(product);
        self.book.add(product, ReviewEntry::new(author, text));

        if let Err(e) = self.repository.save(&self.book).await {
            self.book.pop(product);
            if !known {
                self.book.remove(product);
            }
            return Err(e);
        }

        info!("Review added");
        Ok(format!("Review for {product} added."))
    }

    /// Reviews for `product` in the order they were written, or `None`.
    #[must_use]
    pub fn reviews(&self, product: &str) -> Option<&[ReviewEntry]> {
        self.book.get(product)
    }

    /// Products that have reviews.
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.book.products()
    }

    /// All reviews.
    #[must_use]
    pub const fn book(&self) -> &ReviewBook {
        &self.book
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }
}

/// Render reviews one per line as `author: text`.
#[must_use]
pub fn format_reviews(entries: Option<&[ReviewEntry]>) -> String {
    match entries {
        None => "No reviews yet.".to_owned(),
        Some(entries) => entries
            .iter()
            .map(|entry| format!("{}: {}", entry.author, entry.text))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
