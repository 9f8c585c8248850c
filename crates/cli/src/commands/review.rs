//! Review commands backed by the configured review file.

use shopapp_storefront::StorefrontConfig;
use shopapp_storefront::reviews::{JsonFileRepository, ReviewStore, format_reviews};
use tracing::info;

/// Append a review and save the review file.
///
/// # Errors
///
/// Returns an error if the review file cannot be read or written.
pub async fn add(product: &str, author: &str, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut store = ReviewStore::load(JsonFileRepository::new(&config.reviews_path)).await?;

    info!("{}", store.add_review(product, text, author).await?);
    Ok(())
}

/// Show the reviews for `product`.
///
/// # Errors
///
/// Returns an error if the review file cannot be read.
pub async fn list(product: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = ReviewStore::load(JsonFileRepository::new(&config.reviews_path)).await?;

    info!("Reviews for {product}:\n{}", format_reviews(store.reviews(product)));
    Ok(())
}
