//! ZIP-to-place geocoding.
//!
//! This module handles:
//! - The [`GeocodeProvider`] seam used by the resolver
//! - The Zippopotam.us client and its wire format
//! - A mock provider for testing

pub mod client;
pub mod mock;
pub mod types;

use std::future::Future;

use crate::error::GeocodeError;
use crate::lookup::{Place, ZipCode};

pub use client::ZippopotamClient;
pub use mock::{MockGeocodeConfig, MockGeocoder};
pub use types::{ZippopotamPlace, ZippopotamResponse};

/// Resolves a ZIP code to a city/state.
///
/// A non-success answer from the upstream service is `GeocodeError::NotFound`.
/// Missing fields in a successful answer become empty strings.
pub trait GeocodeProvider: Send + Sync {
    /// Resolve one ZIP.
    fn resolve(&self, zip: &ZipCode) -> impl Future<Output = Result<Place, GeocodeError>> + Send;
}

/// Geocoder selected at startup.
#[derive(Debug, Clone)]
pub enum Geocoder {
    /// Live Zippopotam.us client.
    Zippopotam(ZippopotamClient),
    /// In-memory geocoder for tests and offline runs.
    Mock(MockGeocoder),
}

impl GeocodeProvider for Geocoder {
    async fn resolve(&self, zip: &ZipCode) -> Result<Place, GeocodeError> {
        match self {
            Geocoder::Zippopotam(client) => client.resolve(zip).await,
            Geocoder::Mock(mock) => mock.resolve(zip).await,
        }
    }
}

impl From<ZippopotamClient> for Geocoder {
    fn from(client: ZippopotamClient) -> Self {
        Geocoder::Zippopotam(client)
    }
}

impl From<MockGeocoder> for Geocoder {
    fn from(mock: MockGeocoder) -> Self {
        Geocoder::Mock(mock)
    }
}
