//! Integration tests against the live Zippopotam.us API.
//!
//! These tests need network access.
//! Run with: cargo test --test integration -- --ignored

use utility_lookup::config::Config;
use utility_lookup::geocode::{GeocodeProvider, ZippopotamClient};
use utility_lookup::lookup::{MatchedVia, Resolver, ZipCode};
use utility_lookup::GeocodeError;

/// Get a test config from environment.
fn test_config() -> Config {
    dotenvy::dotenv().ok();

    let mut config = Config::default();
    if let Ok(base) = std::env::var("GEOCODE_BASE_URL") {
        config.geocode_base_url = base;
    }
    config
}

/// Test that a well-known ZIP resolves to its city.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_resolve_known_zip() {
    let client = ZippopotamClient::new(&test_config()).unwrap();
    let zip = ZipCode::parse("44101").unwrap();

    let result = client.resolve(&zip).await;
    assert!(result.is_ok(), "Failed to resolve: {:?}", result.err());

    let place = result.unwrap();
    assert_eq!(place.state, "OH");
    assert_eq!(place.city, "Cleveland");

    println!("44101 -> {}, {}", place.city, place.state);
}

/// Test that an unassigned ZIP is reported as not found.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_unknown_zip_not_found() {
    let client = ZippopotamClient::new(&test_config()).unwrap();
    let zip = ZipCode::parse("00000").unwrap();

    let result = client.resolve(&zip).await;
    assert!(
        matches!(result, Err(GeocodeError::NotFound { .. })),
        "Expected NotFound, got {:?}",
        result
    );
}

/// Test the full lookup path for a city-mapped ZIP.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_lookup_city_match() {
    let resolver = Resolver::new(ZippopotamClient::new(&test_config()).unwrap());

    let result = resolver.lookup(Some("19104")).await;
    assert!(result.is_ok(), "Lookup failed: {:?}", result.err());

    let result = result.unwrap();
    assert_eq!(result.state, "PA");
    assert_eq!(result.electric, "PECO Energy");
    assert_eq!(result.matched_via, MatchedVia::City);

    println!("19104 -> {:?}", result);
}

/// Test the full lookup path for a ZIP outside the table.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_lookup_uncovered_state() {
    let resolver = Resolver::new(ZippopotamClient::new(&test_config()).unwrap());

    let result = resolver.lookup(Some("59601")).await.unwrap();
    assert_eq!(result.state, "MT");
    assert_eq!(result.matched_via, MatchedVia::Unmatched);
}
