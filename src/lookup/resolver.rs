//! ZIP to utility resolution: validate, geocode, match.

use tracing::{debug, instrument};

use crate::error::LookupError;
use crate::geocode::GeocodeProvider;
use crate::metrics;

use super::matcher::match_utility;
use super::table::UtilityTable;
use super::types::LookupResult;
use super::zip::ZipCode;

/// Resolves ZIP codes to utility providers.
///
/// Stateless apart from the shared geocoder and the read-only table, so one
/// instance serves every request.
#[derive(Debug, Clone)]
pub struct Resolver<G> {
    geocoder: G,
    table: &'static UtilityTable,
}

impl<G: GeocodeProvider> Resolver<G> {
    /// Create a resolver over the built-in table.
    pub fn new(geocoder: G) -> Self {
        Self::with_table(geocoder, UtilityTable::builtin())
    }

    /// Create a resolver over a specific table.
    pub fn with_table(geocoder: G, table: &'static UtilityTable) -> Self {
        Self { geocoder, table }
    }

    /// The table used for matching.
    pub fn table(&self) -> &'static UtilityTable {
        self.table
    }

    /// The geocoder in use.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Validate a raw ZIP and resolve it.
    pub async fn lookup(&self, raw_zip: Option<&str>) -> Result<LookupResult, LookupError> {
        let _timer = metrics::timer_lookup();

        let result = match ZipCode::parse_opt(raw_zip) {
            Ok(zip) => self.resolve(&zip).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(found) => metrics::inc_lookups(found.matched_via),
            Err(e) => metrics::inc_lookup_errors(e.kind()),
        }

        result
    }

    /// Resolve an already validated ZIP.
    #[instrument(skip(self), fields(zip = %zip))]
    pub async fn resolve(&self, zip: &ZipCode) -> Result<LookupResult, LookupError> {
        let place = self.geocoder.resolve(zip).await?;
        debug!(city = %place.city, state = %place.state, "Geocoded ZIP");

        Ok(match_utility(self.table, &place))
    }
}
