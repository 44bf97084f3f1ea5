//! Mock geocoder for unit testing.
//!
//! This module provides a geocoder that can be used in tests
//! without making real network requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::GeocodeError;
use crate::lookup::{Place, ZipCode};

use super::GeocodeProvider;

/// Configuration for mock geocoder behavior.
#[derive(Debug, Clone, Default)]
pub struct MockGeocodeConfig {
    /// Fail every request as a transport error.
    pub fail_requests: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// In-memory geocoder keyed by ZIP. Unknown ZIPs resolve to `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    /// Mock configuration.
    config: MockGeocodeConfig,
    /// Places by ZIP.
    places: Arc<Mutex<HashMap<String, Place>>>,
    /// Number of `resolve` calls seen.
    calls: Arc<AtomicU64>,
}

impl MockGeocoder {
    /// Create a new mock geocoder with no places.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock geocoder with custom configuration.
    pub fn with_config(config: MockGeocodeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Register a place for a ZIP.
    pub fn insert(&self, zip: &str, place: Place) {
        let mut places = self.places.lock().unwrap();
        places.insert(zip.to_string(), place);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_place(self, zip: &str, city: &str, state: &str) -> Self {
        self.insert(zip, Place::new(city, state));
        self
    }

    /// Clear all mock data.
    pub fn clear(&self) {
        self.places.lock().unwrap().clear();
    }

    /// Number of `resolve` calls made so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GeocodeProvider for MockGeocoder {
    async fn resolve(&self, zip: &ZipCode) -> Result<Place, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail_requests {
            return Err(GeocodeError::Parse("mock geocode failure".to_string()));
        }

        let place = self.places.lock().unwrap().get(zip.as_str()).cloned();
        place.ok_or_else(|| GeocodeError::NotFound {
            zip: zip.to_string(),
        })
    }
}
