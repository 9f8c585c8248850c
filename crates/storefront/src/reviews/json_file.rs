//! JSON file backend for reviews.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shopapp_core::ReviewBook;
use tracing::{debug, instrument};

use super::{ReviewRepository, ReviewStoreError};

/// Stores all reviews as one JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ReviewStoreError {
        ReviewStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReviewRepository for JsonFileRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<ReviewBook, ReviewStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No review file yet, starting empty");
                return Ok(ReviewBook::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content).map_err(|source| ReviewStoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    #[instrument(skip(self, book), fields(path = %self.path.display()))]
    async fn save(&self, book: &ReviewBook) -> Result<(), ReviewStoreError> {
        let json = serde_json::to_string_pretty(book).map_err(ReviewStoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))?;
        debug!(reviews = book.len(), "Reviews saved");
        Ok(())
    }
}
