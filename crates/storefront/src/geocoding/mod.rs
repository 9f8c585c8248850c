//! Address resolution.
//!
//! # Architecture
//!
//! - [`Geocoder`] is the seam to the external lookup service. The only
//!   production implementation is [`NominatimClient`]; tests plug in stubs.
//! - [`AddressResolver`] applies the resolution rules on top of a geocoder:
//!   test mode passes input through, live mode validates and looks it up
//!   under a bounded timeout and a cancellation token.
//! - No retries and no caching: every call is a fresh lookup.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopapp_storefront::geocoding::{AddressResolver, NominatimClient};
//!
//! let client = NominatimClient::new(&config.geocoder)?;
//! let resolver = AddressResolver::from_config(client, &config.geocoder);
//!
//! let address = resolver
//!     .resolve(ResolutionMode::Live, "Musterstraße 1, 12345 Berlin", &CancellationToken::new())
//!     .await?;
//! ```

mod nominatim;
mod resolver;

use std::future::Future;

use shopapp_core::GeocodedPlace;
use thiserror::Error;

pub use nominatim::NominatimClient;
pub use resolver::{AddressError, AddressResolver};

/// Errors that can occur when talking to a geocoding service.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body could not be understood.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// An external address lookup.
pub trait Geocoder {
    /// Look up a free-text address.
    ///
    /// Returns `Ok(None)` when the service has no match.
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeocodedPlace>, GeocodeError>> + Send;
}
