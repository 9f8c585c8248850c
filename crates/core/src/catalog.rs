//! Product catalog.
//!
//! The catalog is an explicit collaborator handed to the checkout workflow;
//! nothing in the cart or order logic knows which products exist.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two items share the same id.
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),

    /// An item has a blank name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// An immutable product descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

impl CatalogItem {
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Case-insensitive name comparison over full Unicode lowercase.
    pub(crate) fn name_matches(name: &str, wanted: &str) -> bool {
        name == wanted || name.to_lowercase() == wanted.to_lowercase()
    }
}

/// The set of products a customer can buy.
///
/// Items are handed out as `Arc<CatalogItem>` so carts share them instead of
/// copying.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Arc<CatalogItem>>,
}

impl Catalog {
    /// Build a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate ids or blank names.
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for item in items {
            if item.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(item.id));
            }
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            out.push(Arc::new(item));
        }
        Ok(Self { items: out })
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Arc<CatalogItem>> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    /// Look up an item by name, ignoring case (`SMARTPHONE`, `ÄPFEL`).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Arc<CatalogItem>> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| CatalogItem::name_matches(&item.name, name))
            .cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogItem>> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    /// The shop's standard range: a laptop and a smartphone.
    fn default() -> Self {
        Self {
            items: vec![
                Arc::new(CatalogItem::new(
                    ProductId::new(123),
                    "Laptop",
                    Price::whole(1000),
                )),
                Arc::new(CatalogItem::new(
                    ProductId::new(124),
                    "Smartphone",
                    Price::whole(500),
                )),
            ],
        }
    }
}
