//! Catalog loading.
//!
//! A catalog file is a JSON array of products:
//!
//! ```json
//! [
//!   {"id": 123, "name": "Laptop", "price": "1000"},
//!   {"id": 124, "name": "Smartphone", "price": "500"}
//! ]
//! ```

use std::path::{Path, PathBuf};

use shopapp_core::{Catalog, CatalogError, CatalogItem};
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {path} is not a valid product list: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {path} is inconsistent: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Load the catalog from `path`, or the built-in catalog when `None`.
///
/// # Errors
///
/// Returns [`CatalogLoadError`] if the file cannot be read, parsed, or
/// contains duplicate or unnamed products.
pub async fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        return Ok(Catalog::default());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let items: Vec<CatalogItem> =
        serde_json::from_str(&content).map_err(|source| CatalogLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let catalog = Catalog::new(items).map_err(|source| CatalogLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopapp_core::ProductId;

    use super::*;

    #[tokio::test]
    async fn test_builtin_catalog_without_path() {
        let catalog = load_catalog(None).await.unwrap();
        assert!(catalog.find_by_name("Laptop").is_some());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "Tablet", "price": "249.99"}, {"id": 2, "name": "Pen", "price": "2"}]"#,
        )
        .unwrap();

        let catalog = load_catalog(Some(&path)).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name, "Tablet");
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "A", "price": "1"}, {"id": 1, "name": "B", "price": "2"}]"#,
        )
        .unwrap();

        let err = load_catalog(Some(&path)).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::Invalid {
                source: CatalogError::DuplicateId(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "A", "price": "-1"}]"#).unwrap();

        assert!(matches!(
            load_catalog(Some(&path)).await,
            Err(CatalogLoadError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(Some(&dir.path().join("nope.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }
}
