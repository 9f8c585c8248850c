//! ShopApp storefront library.
//!
//! Everything that touches the outside world lives here: the checkout
//! workflow, address resolution against a geocoding service, review
//! persistence, catalog files and environment configuration. The pure
//! domain model is in `shopapp-core`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod reviews;

pub use checkout::CheckoutSession;
pub use config::{ConfigError, GeocoderConfig, StorefrontConfig};
pub use error::CheckoutError;
