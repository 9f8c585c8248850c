//! Shopping cart.
//!
//! # Total invariant
//!
//! The cart never stores a running total. The subtotal is recomputed from the
//! items on every read, and the total is the subtotal minus the cumulative
//! promo discount, floored at zero:
//!
//! ```text
//! total = max(sum(items.price) - discount, 0)
//! ```
//!
//! Removing an item therefore lowers the total by exactly that item's price
//! (while the total stays positive) and can never drift. The discount belongs
//! to the cart for its whole life; removing items, even the last one, keeps
//! it, so an emptied cart that is filled again still owes the earlier
//! discount back. Use [`Cart::clear`] to start over.

use core::fmt;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogItem;
use crate::promo::PromoCode;
use crate::types::Price;

/// Errors reported by cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested item is not in the cart.
    #[error("{0} is not in the cart")]
    ItemNotFound(String),
}

/// A customer's cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<Arc<CatalogItem>>,
    discount: Decimal,
    promos: Vec<PromoCode>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Always succeeds.
    pub fn add_item(&mut self, item: Arc<CatalogItem>) -> String {
        let message = format!("{} was added to the cart.", item.name);
        self.items.push(item);
        message
    }

    /// Remove the first occurrence of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no equal item is in the cart;
    /// the cart is left untouched.
    pub fn remove_item(&mut self, item: &CatalogItem) -> Result<String, CartError> {
        let index = self
            .items
            .iter()
            .position(|candidate| candidate.as_ref() == item)
            .ok_or_else(|| CartError::ItemNotFound(item.name.clone()))?;
        Ok(self.remove_at(index))
    }

    /// Remove the first item whose name matches `name`, ignoring case
    /// (Unicode lowercase comparison, so `ÄPFEL` matches `Äpfel`).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no item has that name.
    pub fn remove_by_name(&mut self, name: &str) -> Result<String, CartError> {
        let wanted = name.trim();
        let index = self
            .items
            .iter()
            .position(|candidate| CatalogItem::name_matches(&candidate.name, wanted))
            .ok_or_else(|| CartError::ItemNotFound(wanted.to_owned()))?;
        Ok(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> String {
        let removed = self.items.remove(index);
        format!("{} was removed from the cart.", removed.name)
    }

    /// Drop all items, the discount and the applied promo codes.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = Decimal::ZERO;
        self.promos.clear();
    }

    /// Apply a promo code to the current total.
    ///
    /// Unrecognized codes take nothing off; the returned
    /// [`AppliedDiscount::promo`] is `None` in that case. Applying a code
    /// again discounts the already reduced total, so discounts compound.
    pub fn apply_promo_code(&mut self, code: &str) -> AppliedDiscount {
        let promo = PromoCode::parse(code);
        let amount = promo.map_or(Decimal::ZERO, |promo| {
            (self.total().amount() * promo.rate())
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        });

        if let Some(promo) = promo {
            self.discount = self.discount.saturating_add(amount);
            self.promos.push(promo);
        }

        AppliedDiscount {
            promo,
            amount,
            total: self.total(),
        }
    }

    /// Items in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Arc<CatalogItem>] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of the item prices before any discount.
    ///
    /// Saturates instead of overflowing; see [`Price::MAX`].
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Cumulative amount taken off by promo codes.
    #[must_use]
    pub const fn discount(&self) -> Decimal {
        self.discount
    }

    /// Promo codes applied so far, in order.
    #[must_use]
    pub fn applied_promos(&self) -> &[PromoCode] {
        &self.promos
    }

    /// Amount due.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal().saturating_sub(self.discount)
    }

    /// Line-by-line overview of the cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self
                .items
                .iter()
                .map(|item| SummaryLine {
                    name: item.name.clone(),
                    price: item.price,
                })
                .collect(),
            total: self.total(),
        }
    }

    /// Freeze the current contents for an order.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            subtotal: self.subtotal(),
            discount: self.discount,
            total: self.total(),
        }
    }
}

/// Outcome of [`Cart::apply_promo_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDiscount {
    /// The recognized code, or `None` if the input matched no code.
    pub promo: Option<PromoCode>,
    /// Amount taken off by this application.
    pub amount: Decimal,
    /// Cart total afterwards.
    pub total: Price,
}

impl fmt::Display for AppliedDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discount applied, new total: {}", self.total)
    }
}

/// One line of a [`CartSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub name: String,
    pub price: Price,
}

/// Printable cart overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub total: Price,
}

impl CartSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return f.write_str("Your cart is empty.");
        }
        writeln!(f, "In your cart:")?;
        for line in &self.lines {
            writeln!(f, "{} - {}", line.name, line.price)?;
        }
        write!(f, "Total: {}", self.total)
    }
}

/// Immutable copy of a cart taken when an order is created.
///
/// Item handles are shared with the cart, but later cart mutations do not
/// affect the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    items: Vec<Arc<CatalogItem>>,
    subtotal: Price,
    discount: Decimal,
    total: Price,
}

impl CartSnapshot {
    #[must_use]
    pub fn items(&self) -> &[Arc<CatalogItem>] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.subtotal
    }

    #[must_use]
    pub const fn discount(&self) -> Decimal {
        self.discount
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn laptop() -> Arc<CatalogItem> {
        Arc::new(CatalogItem::new(ProductId::new(123), "Laptop", Price::whole(1000)))
    }

    fn phone() -> Arc<CatalogItem> {
        Arc::new(CatalogItem::new(ProductId::new(124), "Smartphone", Price::whole(500)))
    }

    #[test]
    fn test_add_item_updates_total() {
        let mut cart = Cart::new();
        let message = cart.add_item(laptop());
        assert!(message.contains("Laptop"));
        assert_eq!(cart.total(), Price::whole(1000));
        cart.add_item(phone());
        assert_eq!(cart.total(), Price::whole(1500));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut cart = Cart::new();
        let item = laptop();
        cart.add_item(Arc::clone(&item));
        cart.add_item(Arc::clone(&item));
        assert_eq!(cart.total(), Price::whole(2000));

        cart.remove_item(&item).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Price::whole(1000));
    }

    #[test]
    fn test_remove_item_matches_by_value() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        // A distinct allocation with equal fields still matches
        let message = cart.remove_item(&laptop()).unwrap();
        assert!(message.contains("Laptop"));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_remove_missing_item_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.apply_promo_code("PROMO20");
        let before = cart.snapshot();

        let err = cart.remove_item(&phone()).unwrap_err();
        assert_eq!(err, CartError::ItemNotFound("Smartphone".to_owned()));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_remove_by_name() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.add_item(phone());
        cart.remove_by_name("smartphone").unwrap();
        assert_eq!(cart.total(), Price::whole(1000));
        assert!(matches!(
            cart.remove_by_name("Smartphone"),
            Err(CartError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_promo20_on_1000_yields_800() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        let applied = cart.apply_promo_code("PROMO20");
        assert_eq!(applied.promo, Some(PromoCode::Promo20));
        assert_eq!(applied.amount, Decimal::from(200));
        assert_eq!(applied.total, Price::whole(800));
        assert_eq!(cart.total(), Price::whole(800));
        assert!(applied.to_string().contains("new total: €800.00"));
    }

    /// Reapplying codes compounds: each discount is taken from the already
    /// reduced total. This is deliberate and pinned here.
    #[test]
    fn test_promo_codes_compound() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.apply_promo_code("PROMO20");
        let applied = cart.apply_promo_code("PROMO10");
        assert_eq!(applied.total, Price::whole(720));

        let again = cart.apply_promo_code("PROMO20");
        assert_eq!(again.total, Price::whole(576));
        assert_eq!(
            cart.applied_promos(),
            &[PromoCode::Promo20, PromoCode::Promo10, PromoCode::Promo20]
        );
    }

    #[test]
    fn test_unknown_promo_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        let applied = cart.apply_promo_code("FREESTUFF");
        assert_eq!(applied.promo, None);
        assert_eq!(applied.amount, Decimal::ZERO);
        assert_eq!(cart.total(), Price::whole(1000));
        assert!(cart.applied_promos().is_empty());
    }

    #[test]
    fn test_promo_on_empty_cart_takes_nothing() {
        let mut cart = Cart::new();
        let applied = cart.apply_promo_code("PROMO20");
        assert_eq!(applied.amount, Decimal::ZERO);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_discount_rounds_to_cents() {
        let mut cart = Cart::new();
        cart.add_item(Arc::new(CatalogItem::new(
            ProductId::new(1),
            "Pen",
            Price::new(Decimal::new(333, 2)).unwrap(),
        )));
        let applied = cart.apply_promo_code("PROMO10");
        // 3.33 * 0.10 = 0.333 -> 0.33
        assert_eq!(applied.amount, Decimal::new(33, 2));
        assert_eq!(cart.total(), Price::new(Decimal::new(300, 2)).unwrap());
    }

    #[test]
    fn test_remove_after_discount_subtracts_item_price() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.add_item(phone());
        cart.apply_promo_code("PROMO20"); // 1500 -> 1200
        cart.remove_item(&phone()).unwrap();
        assert_eq!(cart.subtotal(), Price::whole(1000));
        assert_eq!(cart.total(), Price::whole(700));
    }

    #[test]
    fn test_total_never_negative() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.add_item(Arc::new(CatalogItem::new(ProductId::new(2), "Cable", Price::whole(10))));
        cart.apply_promo_code("PROMO20"); // 1010 -> 808, discount 202
        cart.remove_item(&laptop()).unwrap();
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.discount(), Decimal::from(202));
    }

    #[test]
    fn test_discount_survives_emptied_cart() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.apply_promo_code("PROMO20"); // discount 200
        cart.remove_by_name("Laptop").unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);

        cart.add_item(phone());
        assert_eq!(cart.discount(), Decimal::from(200));
        assert_eq!(cart.total(), Price::whole(300));
        assert_eq!(cart.applied_promos(), &[PromoCode::Promo20]);
    }

    #[test]
    fn test_clear_starts_over() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.apply_promo_code("PROMO20");
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.discount(), Decimal::ZERO);
        assert!(cart.applied_promos().is_empty());

        cart.add_item(phone());
        assert_eq!(cart.total(), Price::whole(500));
    }

    #[test]
    fn test_remove_by_name_ignores_unicode_case() {
        let mut cart = Cart::new();
        cart.add_item(Arc::new(CatalogItem::new(ProductId::new(7), "Äpfel", Price::whole(3))));
        cart.remove_by_name("ÄPFEL").unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_most_expensive_items_do_not_overflow() {
        let item = Arc::new(CatalogItem::new(ProductId::new(9), "Yacht", Price::MAX));
        let mut cart = Cart::new();
        cart.add_item(Arc::clone(&item));
        cart.add_item(item);
        cart.apply_promo_code("PROMO10");

        let expected = Price::MAX.amount() * Decimal::from(2);
        assert_eq!(cart.subtotal().amount(), expected);
        assert_eq!(cart.snapshot().subtotal().amount(), expected);
        assert!(cart.summary().to_string().contains("Yacht"));
        assert!(cart.total() < cart.subtotal());
    }

    #[test]
    fn test_total_tracks_any_add_remove_sequence() {
        let items = [laptop(), phone(), laptop(), phone(), phone()];
        let mut cart = Cart::new();
        let mut expected: Vec<Arc<CatalogItem>> = Vec::new();

        for (step, item) in items.iter().enumerate() {
            cart.add_item(Arc::clone(item));
            expected.push(Arc::clone(item));
            if step % 2 == 1 {
                cart.remove_item(&laptop()).unwrap();
                let pos = expected.iter().position(|i| i.name == "Laptop").unwrap();
                expected.remove(pos);
            }
            let sum: Price = expected.iter().map(|i| i.price).sum();
            assert_eq!(cart.total(), sum);
        }
    }

    #[test]
    fn test_summary_lists_lines_and_total() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        cart.add_item(phone());
        let text = cart.summary().to_string();
        assert!(text.contains("Laptop - €1000.00"));
        assert!(text.contains("Smartphone - €500.00"));
        assert!(text.ends_with("Total: €1500.00"));
    }

    #[test]
    fn test_summary_of_empty_cart() {
        let summary = Cart::new().summary();
        assert!(summary.is_empty());
        assert_eq!(summary.to_string(), "Your cart is empty.");
    }

    #[test]
    fn test_snapshot_is_independent_of_later_mutation() {
        let mut cart = Cart::new();
        cart.add_item(laptop());
        let snapshot = cart.snapshot();
        cart.add_item(phone());
        cart.apply_promo_code("PROMO10");
        assert_eq!(snapshot.items().len(), 1);
        assert_eq!(snapshot.total(), Price::whole(1000));
    }
}
