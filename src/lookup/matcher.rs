//! City-first, state-default-second utility matching.

use tracing::debug;

use super::table::UtilityTable;
use super::types::{LookupResult, MatchedVia, Place, Provider};

/// Match a place against the table. Never fails; missing data degrades to a
/// sentinel provider.
pub fn match_utility(table: &UtilityTable, place: &Place) -> LookupResult {
    let (provider, matched_via) = select_provider(table, &place.state, &place.city);
    debug!(
        city = %place.city,
        state = %place.state,
        matched_via = %matched_via,
        electric = %provider.electric,
        "Matched utility"
    );
    LookupResult::new(place, provider, matched_via)
}

/// Pick a provider for `state`/`city` and report which branch chose it.
pub fn select_provider(table: &UtilityTable, state: &str, city: &str) -> (Provider, MatchedVia) {
    let Some(entry) = table.get(state) else {
        return (Provider::unknown(), MatchedVia::Unmatched);
    };

    let city_key = city.to_lowercase();

    // First declared key contained in the city wins.
    if let Some((_, provider)) = entry
        .cities()
        .iter()
        .find(|(key, _)| city_key.contains(key.as_str()))
    {
        return (provider.clone(), MatchedVia::City);
    }

    if let Some(provider) = entry.default_entry() {
        return (provider.clone(), MatchedVia::StateDefault);
    }

    match entry.fallbacks().first() {
        Some(provider) => (provider.clone(), MatchedVia::StateDefault),
        None => (Provider::no_data(), MatchedVia::Unmatched),
    }
}
