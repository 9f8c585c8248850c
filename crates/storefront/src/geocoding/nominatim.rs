//! Nominatim geocoding client.
//!
//! Talks to the `/search` endpoint of a Nominatim-compatible service and
//! keeps only the best hit.

use serde::Deserialize;
use shopapp_core::GeocodedPlace;
use tracing::{debug, instrument};
use url::Url;

use super::{GeocodeError, Geocoder};
use crate::config::GeocoderConfig;

/// Client for a Nominatim-compatible geocoding service.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    search_url: Url,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    ///
    /// The configured timeout is also applied per request so a stalled
    /// connection is dropped even when the caller does not enforce one.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the base URL cannot
    /// be extended with the search path.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            search_url: search_url(&config.base_url)?,
        })
    }

    /// Full request URL for `query`.
    fn request_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        url
    }
}

impl Geocoder for NominatimClient {
    #[instrument(skip(self), fields(query = %query))]
    async fn lookup(&self, query: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
        let response = self.client.get(self.request_url(query)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let place = parse_search_response(&body)?;
        debug!(found = place.is_some(), "Geocoding lookup finished");
        Ok(place)
    }
}

/// Append the `search` segment to a base URL, keeping any path prefix.
fn search_url(base_url: &Url) -> Result<Url, GeocodeError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("search")
        .map_err(|e| GeocodeError::Parse(format!("Invalid geocoder URL: {e}")))
}

/// A single search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    display_name: String,
    lat: String,
    lon: String,
}

/// Parse a `/search?format=jsonv2` response body.
fn parse_search_response(body: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    let latitude = parse_coordinate("lat", &hit.lat)?;
    let longitude = parse_coordinate("lon", &hit.lon)?;

    Ok(Some(GeocodedPlace {
        address: hit.display_name,
        latitude,
        longitude,
    }))
}

fn parse_coordinate(field: &str, value: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodeError::Parse(format!("Invalid {field} '{value}': {e}")))
}
