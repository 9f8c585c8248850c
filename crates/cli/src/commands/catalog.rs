//! Catalog listing.

use shopapp_storefront::StorefrontConfig;
use shopapp_storefront::catalog::load_catalog;
use tracing::info;

/// Log every product with its id and price.
///
/// # Errors
///
/// Returns an error if the configuration or the catalog file is invalid.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let catalog = load_catalog(config.catalog_path.as_deref()).await?;

    for item in catalog.iter() {
        info!("{} {} - {}", item.id, item.name, item.price);
    }
    info!(products = catalog.len(), "Catalog listed");
    Ok(())
}
