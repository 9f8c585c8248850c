//! Orders and order confirmation.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::account::Account;
use crate::address::ResolvedAddress;
use crate::cart::{Cart, CartSnapshot};
use crate::types::{CustomerName, Email, Price};

/// A condition that must hold before an order can be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    AccountRegistered,
    CartNotEmpty,
    AddressResolved,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AccountRegistered => "account is registered",
            Self::CartNotEmpty => "cart is not empty",
            Self::AddressResolved => "delivery address is resolved",
        })
    }
}

/// Errors that can occur when confirming an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// One or more preconditions failed.
    ///
    /// The message does not say which; `unmet` does.
    #[error("Order failed: account not registered, cart empty or address invalid.")]
    Incomplete {
        /// Failed preconditions, in check order.
        unmet: Vec<Precondition>,
    },
}

/// A checkout attempt.
///
/// Borrows the account, owns a snapshot of the cart taken at construction,
/// and is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Order<'a> {
    reference: Uuid,
    account: &'a Account,
    cart: CartSnapshot,
    address: Option<ResolvedAddress>,
}

impl<'a> Order<'a> {
    /// Create an order for `account` from the current contents of `cart`.
    ///
    /// `address` is `None` when resolution failed.
    #[must_use]
    pub fn new(account: &'a Account, cart: &Cart, address: Option<ResolvedAddress>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            account,
            cart: cart.snapshot(),
            address,
        }
    }

    #[must_use]
    pub const fn reference(&self) -> Uuid {
        self.reference
    }

    #[must_use]
    pub const fn account(&self) -> &Account {
        self.account
    }

    #[must_use]
    pub const fn cart(&self) -> &CartSnapshot {
        &self.cart
    }

    #[must_use]
    pub const fn address(&self) -> Option<&ResolvedAddress> {
        self.address.as_ref()
    }

    /// Preconditions that currently fail.
    #[must_use]
    pub fn unmet_preconditions(&self) -> Vec<Precondition> {
        let mut unmet = Vec::new();
        if !self.account.is_registered() {
            unmet.push(Precondition::AccountRegistered);
        }
        if self.cart.is_empty() {
            unmet.push(Precondition::CartNotEmpty);
        }
        if self.address.is_none() {
            unmet.push(Precondition::AddressResolved);
        }
        unmet
    }

    /// Confirm the order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Incomplete`] unless the account is registered,
    /// the cart snapshot has items and the address resolved.
    pub fn confirm(&self) -> Result<OrderConfirmation, OrderError> {
        let unmet = self.unmet_preconditions();
        let Some(address) = self.address.as_ref().filter(|_| unmet.is_empty()) else {
            return Err(OrderError::Incomplete { unmet });
        };

        Ok(OrderConfirmation {
            reference: self.reference,
            customer: self.account.name().clone(),
            email: self.account.email().clone(),
            address: address.to_string(),
            item_count: self.cart.items().len(),
            total: self.cart.total(),
            placed_at: Utc::now(),
        })
    }
}

/// Receipt for a confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub reference: Uuid,
    pub customer: CustomerName,
    pub email: Email,
    /// Resolved address as displayed to the customer.
    pub address: String,
    pub item_count: usize,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

impl fmt::Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order for {} to address {} has been processed, a confirmation email was sent.",
            self.customer, self.address
        )
    }
}
