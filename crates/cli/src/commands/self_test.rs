//! Scripted run through the whole workflow.
//!
//! Uses the built-in catalog, a test-mode address and an in-memory review
//! store, so it needs neither network access nor a writable review file.

use secrecy::SecretString;
use shopapp_core::{Catalog, Price, ProductId, ResolutionMode};
use shopapp_storefront::geocoding::{AddressResolver, NominatimClient};
use shopapp_storefront::reviews::{InMemoryRepository, ReviewStore, format_reviews};
use shopapp_storefront::{CheckoutSession, GeocoderConfig};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// A self-test step produced an unexpected result.
#[derive(Debug, Error)]
#[error("self-test step {step} failed: {reason}")]
pub struct SelfTestError {
    pub step: usize,
    pub reason: String,
}

fn check(step: usize, ok: bool, reason: impl Into<String>) -> Result<(), SelfTestError> {
    if ok {
        Ok(())
    } else {
        Err(SelfTestError {
            step,
            reason: reason.into(),
        })
    }
}

/// Run the scripted steps, stopping at the first failure.
///
/// # Errors
///
/// Returns an error describing the first step that did not behave as
/// expected.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let geocoder = GeocoderConfig::default();
    let resolver = AddressResolver::from_config(NominatimClient::new(&geocoder)?, &geocoder);
    let mut session = CheckoutSession::new(Catalog::default(), resolver);

    info!("Step 1: register a new account");
    let message = session.register_account("test", "test@example.com", SecretString::from("geheim"))?;
    check(1, message.contains("has been created"), &message)?;
    info!("Result: {message}");

    info!("Step 2: add a product to the cart");
    let message = session.add_to_cart(ProductId::new(123))?;
    check(2, message.contains("was added to the cart"), &message)?;
    info!("Result: {message}");

    info!("Step 3: apply a valid promo code");
    let applied = session.apply_promo("PROMO20");
    check(3, applied.total == Price::whole(800), applied.to_string())?;
    info!("Result: {applied}");

    info!("Step 4: place an order with a test-mode address");
    let address = session
        .resolve_address(
            ResolutionMode::Test,
            "Musterstraße 1, 12345 Berlin, Germany",
            &CancellationToken::new(),
        )
        .await?;
    let confirmation = session.confirm_order(Some(address))?;
    let message = confirmation.to_string();
    check(4, message.starts_with("Order for test"), &message)?;
    info!("Result: {message}");

    info!("Step 5: add and show a product review");
    let mut reviews = ReviewStore::load(InMemoryRepository::default()).await?;
    reviews.add_review("Laptop", "Großartiger Laptop!", "test").await?;
    let listing = format_reviews(reviews.reviews("Laptop"));
    check(5, listing.contains("Großartiger Laptop!"), &listing)?;
    info!("Result: {listing}");

    info!("All self-test steps passed");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_self_test_passes() {
        run().await.unwrap();
    }

    #[test]
    fn test_check_reports_step() {
        let err = check(3, false, "total was €1000.00").unwrap_err();
        assert_eq!(err.to_string(), "self-test step 3 failed: total was €1000.00");
    }
}
