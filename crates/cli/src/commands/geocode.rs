//! One-off address lookup.

use shopapp_core::ResolutionMode;
use shopapp_storefront::StorefrontConfig;
use shopapp_storefront::geocoding::{AddressResolver, NominatimClient};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Resolve `query` against the configured geocoding service.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the address cannot be
/// resolved.
pub async fn lookup(query: &str, cancel: &CancellationToken) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let client = NominatimClient::new(&config.geocoder)?;
    let resolver = AddressResolver::from_config(client, &config.geocoder);

    info!(url = %config.geocoder.base_url, "Looking up address");
    let address = resolver.resolve(ResolutionMode::Live, query, cancel).await?;
    info!("{address}");
    Ok(())
}
