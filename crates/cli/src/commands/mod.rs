//! Subcommand implementations.
//!
//! Each command loads [`StorefrontConfig`] from the environment itself, so
//! `.env` files are honoured the same way everywhere.

pub mod catalog;
pub mod checkout;
pub mod geocode;
pub mod review;
pub mod self_test;

use shopapp_storefront::catalog::load_catalog;
use shopapp_storefront::geocoding::{AddressResolver, NominatimClient};
use shopapp_storefront::{CheckoutSession, StorefrontConfig};

/// Build a checkout session backed by the configured catalog and geocoder.
async fn open_session(
    config: &StorefrontConfig,
) -> Result<CheckoutSession<NominatimClient>, Box<dyn std::error::Error>> {
    let catalog = load_catalog(config.catalog_path.as_deref()).await?;
    let client = NominatimClient::new(&config.geocoder)?;
    let resolver = AddressResolver::from_config(client, &config.geocoder);
    Ok(CheckoutSession::new(catalog, resolver))
}
