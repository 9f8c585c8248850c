//! Integration tests for ShopApp.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopapp-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Account, cart, promo and order confirmation end to end
//! - `geocoding` - Nominatim client and resolver against a local HTTP server
//! - `review_store` - Review persistence across store instances
//!
//! No test needs network access. Geocoding goes either through
//! [`FixedGeocoder`] or through a one-shot server bound to localhost.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use shopapp_core::{Catalog, GeocodedPlace};
use shopapp_storefront::CheckoutSession;
use shopapp_storefront::geocoding::{AddressResolver, GeocodeError, Geocoder};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// Geocoder answering from a fixed table and recording every query.
#[derive(Debug, Clone, Default)]
pub struct FixedGeocoder {
    places: HashMap<String, GeocodedPlace>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FixedGeocoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `place`.
    #[must_use]
    pub fn with_place(mut self, query: &str, place: GeocodedPlace) -> Self {
        self.places.insert(query.to_owned(), place);
        self
    }

    /// Queries received so far, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Geocoder for FixedGeocoder {
    async fn lookup(&self, query: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_owned());
        Ok(self.places.get(query).cloned())
    }
}

/// The place used for auto-detection in tests.
#[must_use]
pub fn hamburg() -> GeocodedPlace {
    GeocodedPlace {
        address: "Hamburg, Deutschland".to_owned(),
        latitude: 53.550_341,
        longitude: 10.000_654,
    }
}

/// Checkout session over the built-in catalog and `geocoder`.
#[must_use]
pub fn session_with(geocoder: FixedGeocoder) -> CheckoutSession<FixedGeocoder> {
    CheckoutSession::new(
        Catalog::default(),
        AddressResolver::new(geocoder, Duration::from_secs(2), "Hamburg, Germany"),
    )
}

/// Serve one HTTP request on localhost with a canned JSON response.
///
/// Returns the base URL and a handle yielding the raw request head.
///
/// # Errors
///
/// Returns an error if no local port can be bound.
pub async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> std::io::Result<(Url, tokio::task::JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return String::new();
        };
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(buf.get(..n).unwrap_or_default()),
            }
        }
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });

    let base_url = Url::parse(&format!("http://{addr}"))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    Ok((base_url, handle))
}
