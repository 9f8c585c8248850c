//! In-memory review backend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopapp_core::ReviewBook;

use super::{ReviewRepository, ReviewStoreError};

/// Keeps reviews in process memory.
///
/// Clones share the same storage, so a test can keep a handle and inspect
/// what a [`super::ReviewStore`] wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    book: ReviewBook,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryRepository {
    /// Start with existing reviews.
    #[must_use]
    pub fn with_book(book: ReviewBook) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                book,
                ..Inner::default()
            })),
        }
    }

    /// Make subsequent saves fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Copy of the stored reviews.
    #[must_use]
    pub fn snapshot(&self) -> ReviewBook {
        self.lock().book.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReviewRepository for InMemoryRepository {
    async fn load(&self) -> Result<ReviewBook, ReviewStoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, book: &ReviewBook) -> Result<(), ReviewStoreError> {
        let mut inner = self.lock();
        if inner.fail_saves {
            return Err(ReviewStoreError::Io {
                path: "<memory>".into(),
                source: std::io::Error::other("saves disabled"),
            });
        }
        inner.book = book.clone();
        inner.saves += 1;
        Ok(())
    }
}
