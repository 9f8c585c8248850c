//! Resolution rules on top of a [`Geocoder`].

use std::time::Duration;

use shopapp_core::{AddressInputError, AddressQuery, ResolutionMode, ResolvedAddress};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use super::{GeocodeError, Geocoder};
use crate::config::GeocoderConfig;

/// Errors that can occur while resolving an address.
///
/// None of these are fatal. Everything except [`AddressError::Invalid`] can be
/// retried with the same input; invalid input has to be corrected first.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The input failed validation before any lookup.
    #[error("invalid address: {0}")]
    Invalid(#[from] AddressInputError),

    /// The service has no match for the input.
    #[error("address not found: {query}")]
    NotFound { query: String },

    /// The service could not be reached or answered garbage.
    #[error("address lookup unavailable: {0}")]
    Unavailable(#[source] GeocodeError),

    /// The lookup did not finish in time.
    #[error("address lookup timed out after {0:?}")]
    TimedOut(Duration),

    /// The caller cancelled the lookup.
    #[error("address lookup cancelled")]
    Cancelled,
}

impl AddressError {
    /// Whether repeating the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}

/// Resolves customer addresses, either verbatim or through a [`Geocoder`].
#[derive(Debug, Clone)]
pub struct AddressResolver<G> {
    geocoder: G,
    timeout: Duration,
    default_location: String,
}

impl<G: Geocoder + Sync> AddressResolver<G> {
    #[must_use]
    pub fn new(geocoder: G, timeout: Duration, default_location: impl Into<String>) -> Self {
        Self {
            geocoder,
            timeout,
            default_location: default_location.into(),
        }
    }

    /// Create a resolver using the configured timeout and default location.
    #[must_use]
    pub fn from_config(geocoder: G, config: &GeocoderConfig) -> Self {
        Self::new(geocoder, config.timeout, config.default_location.clone())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    /// Resolve `input` according to `mode`.
    ///
    /// Test mode returns non-blank input unchanged without touching the network.
    /// Live mode rejects implausibly short input, then performs one lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] if the input is invalid, has no match, or the
    /// lookup fails, times out or is cancelled.
    pub async fn resolve(
        &self,
        mode: ResolutionMode,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolvedAddress, AddressError> {
        match mode {
            ResolutionMode::Test if input.trim().is_empty() => {
                Err(AddressInputError::Empty.into())
            }
            ResolutionMode::Test => Ok(ResolvedAddress::verbatim(input)),
            ResolutionMode::Live => {
                let query = AddressQuery::parse(input)?;
                self.lookup(query.as_str(), cancel).await
            }
        }
    }

    /// Resolve the configured default location.
    ///
    /// Used when the customer has no address at hand.
    ///
    /// # Errors
    ///
    /// Same as a live [`AddressResolver::resolve`], minus input validation.
    pub async fn auto_detect(
        &self,
        cancel: &CancellationToken,
    ) -> Result<ResolvedAddress, AddressError> {
        let address = self.lookup(&self.default_location, cancel).await?;
        info!(address = %address, "Auto-detected delivery address");
        Ok(address)
    }

    #[instrument(skip(self, cancel), fields(timeout = ?self.timeout))]
    async fn lookup(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolvedAddress, AddressError> {
        let lookup = tokio::time::timeout(self.timeout, self.geocoder.lookup(query));

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(AddressError::Cancelled),
            outcome = lookup => outcome,
        };

        match outcome {
            Ok(Ok(Some(place))) => Ok(place.into()),
            Ok(Ok(None)) => {
                warn!("Address not found");
                Err(AddressError::NotFound {
                    query: query.to_owned(),
                })
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Address lookup failed");
                Err(AddressError::Unavailable(e))
            }
            Err(_) => {
                warn!("Address lookup timed out");
                Err(AddressError::TimedOut(self.timeout))
            }
        }
    }
}
