//! Core lookup types: places, providers and match results.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Sentinel used for both fields when a state has no table entry.
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// Sentinel used when a state is present but carries no usable provider.
pub const NO_DATA_PROVIDER: &str = "No utility data available for this state";

/// City and state resolved from a ZIP code.
///
/// Either field may be empty when the geocoder returned incomplete data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    /// Place name as reported by the geocoder.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
}

impl Place {
    /// Create a new place.
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }
}

/// Electric and gas distribution companies serving an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    /// Electric utility.
    pub electric: String,
    /// Gas utility.
    pub gas: String,
}

impl Provider {
    /// Create a new provider record.
    pub fn new(electric: impl Into<String>, gas: impl Into<String>) -> Self {
        Self {
            electric: electric.into(),
            gas: gas.into(),
        }
    }

    /// Provider returned when the state is absent from the table.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_PROVIDER, UNKNOWN_PROVIDER)
    }

    /// Provider returned when a known state has nothing to offer.
    pub fn no_data() -> Self {
        Self::new(NO_DATA_PROVIDER, NO_DATA_PROVIDER)
    }
}

/// Which branch of the matcher produced the provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum MatchedVia {
    /// A city key matched the place name.
    #[serde(rename = "city")]
    #[strum(serialize = "city")]
    City,
    /// The state's default entry or fallback list was used.
    #[serde(rename = "stateDefault")]
    #[strum(serialize = "stateDefault")]
    StateDefault,
    /// No data for the state at all.
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    Unmatched,
}

/// Outcome of matching a place against the utility table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LookupResult {
    /// City as reported by the geocoder.
    pub city: String,
    /// State abbreviation as reported by the geocoder.
    pub state: String,
    /// Electric utility.
    pub electric: String,
    /// Gas utility.
    pub gas: String,
    /// Matching branch taken.
    pub matched_via: MatchedVia,
}

impl LookupResult {
    /// Build a result from a place and the provider chosen for it.
    pub fn new(place: &Place, provider: Provider, matched_via: MatchedVia) -> Self {
        Self {
            city: place.city.clone(),
            state: place.state.clone(),
            electric: provider.electric,
            gas: provider.gas,
            matched_via,
        }
    }
}
