//! Unified error type for the checkout workflow.

use shopapp_core::{AccountError, CartError, OrderError};
use thiserror::Error;

use crate::geocoding::AddressError;

/// Errors returned by [`crate::checkout::CheckoutSession`] operations.
///
/// Every variant is recoverable: the caller can correct the input or retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Name or email failed validation.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// An order was requested before any account was registered.
    #[error("no account has been registered")]
    NoAccount,

    /// The product does not exist in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Address resolution failed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Order confirmation preconditions were not met.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Result type alias for `CheckoutError`.
pub type Result<T> = std::result::Result<T, CheckoutError>;
