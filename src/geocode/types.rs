//! Zippopotam.us wire format.

use serde::Deserialize;

use crate::lookup::Place;

/// Response body of `GET /us/{zip}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZippopotamResponse {
    /// Echo of the requested ZIP.
    #[serde(rename = "post code", default)]
    pub post_code: Option<String>,
    /// Country name.
    #[serde(default)]
    pub country: Option<String>,
    /// Places sharing the ZIP; the first one is used.
    #[serde(default)]
    pub places: Option<Vec<ZippopotamPlace>>,
}

/// Single place entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZippopotamPlace {
    /// City / place name.
    #[serde(rename = "place name", default)]
    pub place_name: Option<String>,
    /// Full state name.
    #[serde(default)]
    pub state: Option<String>,
    /// Two-letter state code.
    #[serde(rename = "state abbreviation", default)]
    pub state_abbreviation: Option<String>,
    /// Latitude, as a string.
    #[serde(default)]
    pub latitude: Option<String>,
    /// Longitude, as a string.
    #[serde(default)]
    pub longitude: Option<String>,
}

impl ZippopotamResponse {
    /// First place, with missing fields defaulted to empty strings.
    pub fn into_place(self) -> Place {
        let first = self
            .places
            .and_then(|places| places.into_iter().next())
            .unwrap_or_default();

        Place::new(
            first.place_name.unwrap_or_default().trim(),
            first.state_abbreviation.unwrap_or_default().trim(),
        )
    }
}
