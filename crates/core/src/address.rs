//! Delivery address types.
//!
//! Resolution itself (network lookups) lives in the storefront crate; this
//! module only holds the values that flow through it.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Manually entered addresses must be longer than this many characters.
pub const MIN_ADDRESS_LENGTH: usize = 5;

/// Example shown to customers who are unsure about the format.
pub const ADDRESS_FORMAT_HINT: &str = "Musterstraße 1, 12345 Berlin, Germany";

/// Errors that can occur when validating a manually entered address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressInputError {
    /// Nothing was entered.
    #[error("address cannot be empty")]
    Empty,

    /// The address is too short to be meaningful.
    #[error("address must be longer than 5 characters (example: Musterstraße 1, 12345 Berlin, Germany)")]
    TooShort,
}

/// Free-text address typed by a customer, checked for plausibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressQuery(String);

impl AddressQuery {
    /// Validate a manually entered address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressInputError::TooShort`] if the trimmed input has
    /// [`MIN_ADDRESS_LENGTH`] characters or fewer.
    pub fn parse(s: &str) -> Result<Self, AddressInputError> {
        let trimmed = s.trim();
        if trimmed.chars().count() <= MIN_ADDRESS_LENGTH {
            return Err(AddressInputError::TooShort);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an address should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Trust the caller and use the input verbatim.
    Test,
    /// Look the input up with the geocoding service.
    #[default]
    Live,
}

/// A geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Canonical address as returned by the service.
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// An address that passed resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedAddress {
    /// Supplied in test mode and used as-is.
    Verbatim { address: String },
    /// Normalized by the geocoding service.
    Geocoded(GeocodedPlace),
}

impl ResolvedAddress {
    #[must_use]
    pub fn verbatim(address: impl Into<String>) -> Self {
        Self::Verbatim {
            address: address.into(),
        }
    }

    /// The address line without coordinates.
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Verbatim { address } => address,
            Self::Geocoded(place) => &place.address,
        }
    }

    /// Latitude and longitude, when known.
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match self {
            Self::Verbatim { .. } => None,
            Self::Geocoded(place) => Some((place.latitude, place.longitude)),
        }
    }
}

impl From<GeocodedPlace> for ResolvedAddress {
    fn from(place: GeocodedPlace) -> Self {
        Self::Geocoded(place)
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbatim { address } => f.write_str(address),
            Self::Geocoded(place) => write!(
                f,
                "{} (Lat: {}, Lon: {})",
                place.address, place.latitude, place.longitude
            ),
        }
    }
}
