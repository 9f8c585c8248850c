//! Core types for ShopApp.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod name;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use name::{CustomerName, NameError};
pub use price::{Price, PriceError};
