//! Zippopotam.us geocode client.

use std::time::Instant;

use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{GeocodeError, ServiceError};
use crate::lookup::{Place, ZipCode};
use crate::metrics;

use super::types::ZippopotamResponse;
use super::GeocodeProvider;

/// HTTP client for the Zippopotam.us ZIP-to-place API.
#[derive(Debug, Clone)]
pub struct ZippopotamClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL; the ZIP is appended as the last path segment.
    base_url: Url,
}

impl ZippopotamClient {
    /// Create a client from config, with timeouts applied.
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(config.geocode_timeout())
            .connect_timeout(config.geocode_connect_timeout())
            .tcp_nodelay(true)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .user_agent(concat!("utility-lookup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_http(http, &config.geocode_base_url)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ServiceError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ServiceError::InvalidConfig(format!("bad geocode base url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidConfig(
                "geocode base url cannot be a base".to_string(),
            ));
        }
        // Url::join drops the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    /// The base URL in use.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL queried for `zip`.
    pub fn url_for(&self, zip: &ZipCode) -> Result<Url, GeocodeError> {
        self.base_url
            .join(zip.as_str())
            .map_err(|e| GeocodeError::Parse(format!("failed to build geocode url: {}", e)))
    }
}

impl GeocodeProvider for ZippopotamClient {
    #[instrument(skip(self), fields(zip = %zip))]
    async fn resolve(&self, zip: &ZipCode) -> Result<Place, GeocodeError> {
        let url = self.url_for(zip)?;
        let start = Instant::now();

        let response = self.http.get(url).send().await;
        metrics::record_geocode_latency(start);
        let response = response?;

        if !response.status().is_success() {
            info!(status = %response.status(), "Geocoder has no place for ZIP");
            return Err(GeocodeError::NotFound {
                zip: zip.to_string(),
            });
        }

        let body: ZippopotamResponse = response.json().await.map_err(|e| {
            GeocodeError::Parse(format!("failed to parse geocode response: {}", e))
        })?;

        let place = body.into_place();
        debug!(city = %place.city, state = %place.state, "Resolved ZIP");

        Ok(place)
    }
}
