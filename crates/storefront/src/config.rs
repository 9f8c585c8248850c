//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOPAPP_REVIEWS_PATH` - Review file location (default: reviews.json)
//! - `SHOPAPP_CATALOG_PATH` - JSON catalog file (default: built-in catalog)
//! - `SHOPAPP_GEOCODER_URL` - Nominatim-compatible base URL
//!   (default: <https://nominatim.openstreetmap.org>)
//! - `SHOPAPP_GEOCODER_USER_AGENT` - User-Agent sent with lookups (default: shopapp)
//! - `SHOPAPP_GEOCODER_TIMEOUT_SECS` - Lookup timeout, 1-120 (default: 10)
//! - `SHOPAPP_DEFAULT_LOCATION` - Location used by address auto-detection
//!   (default: Hamburg, Germany)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_REVIEWS_PATH: &str = "reviews.json";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_USER_AGENT: &str = "shopapp";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 120;
const DEFAULT_LOCATION: &str = "Hamburg, Germany";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where reviews are persisted
    pub reviews_path: PathBuf,
    /// Optional catalog file replacing the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Geocoding service configuration
    pub geocoder: GeocoderConfig,
}

/// Geocoding service configuration.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim-compatible service
    pub base_url: Url,
    /// User-Agent header (Nominatim rejects anonymous clients)
    pub user_agent: String,
    /// Upper bound for a single lookup
    pub timeout: Duration,
    /// Query used when the customer asks for auto-detection
    pub default_location: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_GEOCODER_URL).expect("default geocoder URL is valid"),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_location: DEFAULT_LOCATION.to_owned(),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            reviews_path: PathBuf::from(DEFAULT_REVIEWS_PATH),
            catalog_path: None,
            geocoder: GeocoderConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let reviews_path = PathBuf::from(get_env_or_default(
            "SHOPAPP_REVIEWS_PATH",
            DEFAULT_REVIEWS_PATH,
        ));
        let catalog_path = get_optional_env("SHOPAPP_CATALOG_PATH").map(PathBuf::from);
        let geocoder = GeocoderConfig::from_env()?;

        Ok(Self {
            reviews_path,
            catalog_path,
            geocoder,
        })
    }
}

impl GeocoderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "SHOPAPP_GEOCODER_URL",
            &get_env_or_default("SHOPAPP_GEOCODER_URL", DEFAULT_GEOCODER_URL),
        )?;
        let user_agent = get_env_or_default("SHOPAPP_GEOCODER_USER_AGENT", DEFAULT_USER_AGENT);
        let timeout = parse_timeout(
            "SHOPAPP_GEOCODER_TIMEOUT_SECS",
            get_optional_env("SHOPAPP_GEOCODER_TIMEOUT_SECS").as_deref(),
        )?;
        let default_location = get_env_or_default("SHOPAPP_DEFAULT_LOCATION", DEFAULT_LOCATION);

        Ok(Self {
            base_url,
            user_agent,
            timeout,
            default_location,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an http(s) base URL.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a lookup timeout in whole seconds.
fn parse_timeout(var_name: &str, value: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds (got {secs})"),
        ));
    }
    Ok(Duration::from_secs(secs))
}
