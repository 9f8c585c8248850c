//! ShopApp Core - Domain types and checkout rules.
//!
//! This crate provides the types shared by the storefront library and the CLI:
//! - `storefront` - Checkout workflow, geocoding and review persistence
//! - `cli` - Command-line driver for the workflow
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no file access. Everything here is deterministic and testable
//! without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, names and emails
//! - [`account`] - Customer accounts and registration
//! - [`catalog`] - Products and the catalog that owns them
//! - [`cart`] - Cart mutation and the total invariant
//! - [`promo`] - Promo codes
//! - [`address`] - Address input, resolution mode and resolved addresses
//! - [`order`] - Order construction and confirmation
//! - [`review`] - Review entries and the review book

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod address;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod promo;
pub mod review;
pub mod types;

pub use account::{Account, AccountError};
pub use address::{
    ADDRESS_FORMAT_HINT, AddressInputError, AddressQuery, GeocodedPlace, ResolutionMode,
    ResolvedAddress,
};
pub use cart::{AppliedDiscount, Cart, CartError, CartSnapshot, CartSummary};
pub use catalog::{Catalog, CatalogError, CatalogItem};
pub use order::{Order, OrderConfirmation, OrderError, Precondition};
pub use promo::PromoCode;
pub use review::{ReviewBook, ReviewEntry};
pub use types::*;
