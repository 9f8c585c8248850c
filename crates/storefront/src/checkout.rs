//! Caller-facing checkout workflow.
//!
//! A [`CheckoutSession`] is one customer's pass through the shop: register,
//! fill the cart, apply promo codes, resolve a delivery address and confirm.
//! Operations return values instead of printing, so any front end (the CLI,
//! a test, a prompt loop) can drive it.
//!
//! Orders borrow the session, so the cart cannot be changed while an
//! [`Order`] is alive; the order also holds its own cart snapshot.

use secrecy::SecretString;
use shopapp_core::{
    Account, AppliedDiscount, Cart, CartSummary, Catalog, Order, OrderConfirmation, ProductId,
    ResolutionMode, ResolvedAddress,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{CheckoutError, Result};
use crate::geocoding::{AddressError, AddressResolver, Geocoder};

/// One customer's checkout workflow.
#[derive(Debug)]
pub struct CheckoutSession<G> {
    catalog: Catalog,
    resolver: AddressResolver<G>,
    account: Option<Account>,
    cart: Cart,
}

impl<G: Geocoder + Sync> CheckoutSession<G> {
    #[must_use]
    pub fn new(catalog: Catalog, resolver: AddressResolver<G>) -> Self {
        Self {
            catalog,
            resolver,
            account: None,
            cart: Cart::new(),
        }
    }

    /// Create and register the customer's account.
    ///
    /// Replaces any account registered earlier in this session. The
    /// confirmation email is not sent, only logged.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Account`] if the name or email is malformed.
    pub fn register_account(
        &mut self,
        name: &str,
        email: &str,
        password: SecretString,
    ) -> Result<String> {
        let mut account = Account::new(name, email, password)?;
        let message = account.register();
        info!(email = %account.email(), "Account registered, confirmation email simulated");
        self.account = Some(account);
        Ok(message)
    }

    #[must_use]
    pub const fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn resolver(&self) -> &AddressResolver<G> {
        &self.resolver
    }

    /// Add a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownProduct`] if the id is not in the
    /// catalog.
    pub fn add_to_cart(&mut self, product: ProductId) -> Result<String> {
        let item = self
            .catalog
            .get(product)
            .ok_or_else(|| CheckoutError::UnknownProduct(product.to_string()))?;
        Ok(self.cart.add_item(item))
    }

    /// Add a catalog product to the cart by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownProduct`] if no product has that name.
    pub fn add_to_cart_by_name(&mut self, name: &str) -> Result<String> {
        let item = self
            .catalog
            .find_by_name(name)
            .ok_or_else(|| CheckoutError::UnknownProduct(name.trim().to_owned()))?;
        Ok(self.cart.add_item(item))
    }

    /// Remove one item with the given name from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Cart`] if no such item is in the cart.
    pub fn remove_from_cart(&mut self, name: &str) -> Result<String> {
        Ok(self.cart.remove_by_name(name)?)
    }

    /// Apply a promo code. Unknown codes take nothing off.
    pub fn apply_promo(&mut self, code: &str) -> AppliedDiscount {
        let applied = self.cart.apply_promo_code(code);
        if applied.promo.is_none() {
            warn!(code, "Unrecognized promo code, no discount applied");
        }
        applied
    }

    #[must_use]
    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Resolve a delivery address.
    ///
    /// # Errors
    ///
    /// See [`AddressResolver::resolve`].
    pub async fn resolve_address(
        &self,
        mode: ResolutionMode,
        input: &str,
        cancel: &CancellationToken,
    ) -> std::result::Result<ResolvedAddress, AddressError> {
        self.resolver.resolve(mode, input, cancel).await
    }

    /// Resolve the default location instead of a customer-supplied address.
    ///
    /// # Errors
    ///
    /// See [`AddressResolver::auto_detect`].
    pub async fn auto_detect_address(
        &self,
        cancel: &CancellationToken,
    ) -> std::result::Result<ResolvedAddress, AddressError> {
        self.resolver.auto_detect(cancel).await
    }

    /// Build an order from the registered account and the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NoAccount`] if no account was registered.
    pub fn place_order(&self, address: Option<ResolvedAddress>) -> Result<Order<'_>> {
        let account = self.account.as_ref().ok_or(CheckoutError::NoAccount)?;
        Ok(Order::new(account, &self.cart, address))
    }

    /// Build and confirm an order in one step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NoAccount`] or [`CheckoutError::Order`].
    pub fn confirm_order(&self, address: Option<ResolvedAddress>) -> Result<OrderConfirmation> {
        let order = self.place_order(address)?;
        let confirmation = order.confirm().inspect_err(|e| {
            warn!(error = %e, unmet = ?order.unmet_preconditions(), "Order rejected");
        })?;
        info!(
            reference = %confirmation.reference,
            total = %confirmation.total,
            "Order confirmed"
        );
        Ok(confirmation)
    }

    /// Resolve `input` and confirm an order for it.
    ///
    /// Resolution failures are returned as they are, so the caller can check
    /// [`AddressError::is_retryable`] and try again. To get the combined order
    /// failure for a missing address instead, call
    /// [`CheckoutSession::confirm_order`] with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Address`] if the address cannot be resolved,
    /// otherwise [`CheckoutError::NoAccount`] or [`CheckoutError::Order`].
    pub async fn checkout(
        &self,
        mode: ResolutionMode,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<OrderConfirmation> {
        let address = self
            .resolve_address(mode, input, cancel)
            .await
            .inspect_err(|e| {
                warn!(error = %e, retryable = e.is_retryable(), "Address could not be verified");
            })?;
        self.confirm_order(Some(address))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use shopapp_core::{CartError, GeocodedPlace, OrderError, Precondition, Price};

    use super::*;
    use crate::geocoding::GeocodeError;

    /// Geocoder that never finds anything.
    struct Offline;

    impl Geocoder for Offline {
        async fn lookup(&self, _query: &str) -> std::result::Result<Option<GeocodedPlace>, GeocodeError> {
            Ok(None)
        }
    }

    fn session() -> CheckoutSession<Offline> {
        CheckoutSession::new(
            Catalog::default(),
            AddressResolver::new(Offline, Duration::from_secs(1), "Hamburg, Germany"),
        )
    }

    fn registered_session() -> CheckoutSession<Offline> {
        let mut session = session();
        session
            .register_account("test", "test@example.com", SecretString::from("geheim"))
            .unwrap();
        session
    }

    #[test]
    fn test_register_account() {
        let mut session = session();
        let message = session
            .register_account("test", "test@example.com", SecretString::from("geheim"))
            .unwrap();
        assert!(message.contains("test@example.com"));
        assert!(session.account().unwrap().is_registered());
    }

    #[test]
    fn test_register_rejects_bad_name() {
        let mut session = session();
        let err = session
            .register_account("t 3", "test@example.com", SecretString::from("x"))
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Account(_)));
        assert!(session.account().is_none());
    }

    #[test]
    fn test_cart_operations() {
        let mut session = session();
        session.add_to_cart(ProductId::new(123)).unwrap();
        session.add_to_cart_by_name("smartphone").unwrap();
        assert_eq!(session.cart().total(), Price::whole(1500));

        session.remove_from_cart("Laptop").unwrap();
        assert_eq!(session.cart().total(), Price::whole(500));

        assert!(matches!(
            session.remove_from_cart("Laptop"),
            Err(CheckoutError::Cart(CartError::ItemNotFound(_)))
        ));
        assert!(matches!(
            session.add_to_cart(ProductId::new(999)),
            Err(CheckoutError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_apply_promo() {
        let mut session = session();
        session.add_to_cart(ProductId::new(123)).unwrap();
        assert_eq!(session.apply_promo("PROMO20").total, Price::whole(800));
        assert_eq!(session.apply_promo("nope").total, Price::whole(800));
    }

    #[test]
    fn test_place_order_requires_account() {
        let session = session();
        assert!(matches!(
            session.place_order(None),
            Err(CheckoutError::NoAccount)
        ));
    }

    #[tokio::test]
    async fn test_checkout_in_test_mode() {
        let mut session = registered_session();
        session.add_to_cart(ProductId::new(123)).unwrap();
        session.apply_promo("PROMO20");

        let confirmation = session
            .checkout(
                ResolutionMode::Test,
                "Musterstraße 1, 12345 Berlin, Germany",
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert!(confirmation.to_string().contains("Musterstraße 1, 12345 Berlin, Germany"));
        assert_eq!(confirmation.total, Price::whole(800));
    }

    #[tokio::test]
    async fn test_checkout_with_unresolvable_address() {
        let mut session = registered_session();
        session.add_to_cart(ProductId::new(123)).unwrap();

        let err = session
            .checkout(ResolutionMode::Live, "Nowhere Street 1", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Address(AddressError::NotFound { ref query }) if query == "Nowhere Street 1"
        ));
        assert_eq!(err.to_string(), "address not found: Nowhere Street 1");
    }

    #[tokio::test]
    async fn test_cancelled_checkout_reports_cancellation() {
        let mut session = registered_session();
        session.add_to_cart(ProductId::new(123)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = session
            .checkout(ResolutionMode::Live, "Musterstraße 1, 12345 Berlin", &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Address(AddressError::Cancelled)));
    }

    #[test]
    fn test_missing_address_gives_combined_failure() {
        let mut session = registered_session();
        session.add_to_cart(ProductId::new(123)).unwrap();

        let err = session.confirm_order(None).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Order(OrderError::Incomplete { ref unmet })
                if unmet == &vec![Precondition::AddressResolved]
        ));
    }

    #[tokio::test]
    async fn test_checkout_with_empty_cart() {
        let session = registered_session();
        let err = session
            .checkout(ResolutionMode::Test, "X", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Order(_)));
    }
}
