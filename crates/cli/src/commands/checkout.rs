//! Non-interactive checkout.
//!
//! Steps run in a fixed order: register, add products, remove products,
//! apply promo codes, resolve the address, confirm. A missing product or a
//! bad promo code is reported and skipped; the order itself only fails at
//! confirmation.

use secrecy::SecretString;
use shopapp_core::{ADDRESS_FORMAT_HINT, ProductId, ResolutionMode};
use shopapp_storefront::StorefrontConfig;
use shopapp_storefront::geocoding::AddressError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::open_session;

/// Where the delivery address comes from.
#[derive(Debug)]
pub enum AddressSource {
    /// Address typed by the customer.
    Given { text: String, test_mode: bool },
    /// The configured default location.
    AutoDetect,
}

/// Everything needed for one checkout run.
#[derive(Debug)]
pub struct CheckoutRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub promo: Vec<String>,
    pub address: AddressSource,
}

/// Run a checkout and log each step.
///
/// # Errors
///
/// Returns an error if the account details are invalid, the configuration is
/// invalid, or the order cannot be confirmed.
pub async fn run(
    request: CheckoutRequest,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut session = open_session(&config).await?;

    info!("{}", session.register_account(&request.name, &request.email, request.password)?);

    for product in &request.add {
        let added = match product.parse::<ProductId>() {
            Ok(id) => session.add_to_cart(id),
            Err(_) => session.add_to_cart_by_name(product),
        };
        match added {
            Ok(message) => info!("{message}"),
            Err(e) => warn!("{e}"),
        }
    }

    for product in &request.remove {
        match session.remove_from_cart(product) {
            Ok(message) => info!("{message}"),
            Err(e) => warn!("{e}"),
        }
    }

    for code in &request.promo {
        info!("{}", session.apply_promo(code));
    }

    info!("{}", session.cart_summary());

    let resolved = match &request.address {
        AddressSource::Given { text, test_mode } => {
            let mode = if *test_mode {
                ResolutionMode::Test
            } else {
                ResolutionMode::Live
            };
            session.resolve_address(mode, text, cancel).await
        }
        AddressSource::AutoDetect => session.auto_detect_address(cancel).await,
    };

    let address = match resolved {
        Ok(address) => {
            info!("Delivery address: {address}");
            Some(address)
        }
        Err(e) => {
            warn!(retryable = e.is_retryable(), "Address could not be verified: {e}");
            if matches!(e, AddressError::Invalid(_)) {
                info!("Expected an address like: {ADDRESS_FORMAT_HINT}");
            }
            None
        }
    };

    let confirmation = session.confirm_order(address)?;
    info!("{confirmation}");
    Ok(())
}
