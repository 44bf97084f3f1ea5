//! Geocode client and full-stack tests against a local stand-in for
//! Zippopotam.us.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceExt;

use utility_lookup::api::{create_router, AppState};
use utility_lookup::config::Config;
use utility_lookup::geocode::{GeocodeProvider, ZippopotamClient};
use utility_lookup::lookup::{MatchedVia, Place, Resolver, ZipCode};
use utility_lookup::GeocodeError;

async fn fake_zippopotam(Path(zip): Path<String>) -> impl IntoResponse {
    match zip.as_str() {
        "44101" => (
            StatusCode::OK,
            Json(json!({
                "post code": "44101",
                "country": "United States",
                "country abbreviation": "US",
                "places": [{
                    "place name": "Cleveland",
                    "longitude": "-81.5996",
                    "state": "Ohio",
                    "state abbreviation": "OH",
                    "latitude": "41.5232"
                }]
            })),
        )
            .into_response(),
        "19901" => (
            StatusCode::OK,
            Json(json!({"places": [{"state abbreviation": "DE"}]})),
        )
            .into_response(),
        "00001" => (StatusCode::OK, Json(json!({"places": []}))).into_response(),
        "00002" => (StatusCode::OK, "<html>oops</html>").into_response(),
        "00003" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        "00500" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn spawn_fake() -> SocketAddr {
    let app = Router::new().route("/us/:zip", get(fake_zippopotam));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr, timeout_ms: u64) -> ZippopotamClient {
    let config = Config {
        geocode_base_url: format!("http://{}/us", addr),
        geocode_timeout_ms: timeout_ms,
        ..Config::default()
    };
    ZippopotamClient::new(&config).unwrap()
}

fn zip(raw: &str) -> ZipCode {
    ZipCode::parse(raw).unwrap()
}

#[tokio::test]
async fn resolves_first_place() {
    let client = client_for(spawn_fake().await, 5000);

    let place = client.resolve(&zip("44101")).await.unwrap();
    assert_eq!(place, Place::new("Cleveland", "OH"));
}

#[tokio::test]
async fn missing_place_name_is_empty() {
    let client = client_for(spawn_fake().await, 5000);

    let place = client.resolve(&zip("19901")).await.unwrap();
    assert_eq!(place, Place::new("", "DE"));

    let place = client.resolve(&zip("00001")).await.unwrap();
    assert_eq!(place, Place::default());
}

#[tokio::test]
async fn non_success_status_is_not_found() {
    let client = client_for(spawn_fake().await, 5000);

    for raw in ["99999", "00500"] {
        let err = client.resolve(&zip(raw)).await.unwrap_err();
        assert!(
            matches!(err, GeocodeError::NotFound { ref zip } if zip == raw),
            "{raw}: {err}"
        );
    }
}

#[tokio::test]
async fn undecodable_body_is_parse_error() {
    let client = client_for(spawn_fake().await, 5000);

    let err = client.resolve(&zip("00002")).await.unwrap_err();
    assert!(matches!(err, GeocodeError::Parse(_)), "{err}");
}

#[tokio::test]
async fn slow_geocoder_times_out() {
    let client = client_for(spawn_fake().await, 200);

    let err = client.resolve(&zip("00003")).await.unwrap_err();
    assert!(matches!(err, GeocodeError::Http(_)), "{err}");
}

#[tokio::test]
async fn full_stack_lookup_over_http() {
    let client = client_for(spawn_fake().await, 5000);

    let resolver = Resolver::new(client.clone());
    let result = resolver.lookup(Some("44101")).await.unwrap();
    assert_eq!(result.matched_via, MatchedVia::City);
    assert_eq!(result.electric, "The Illuminating Company (FirstEnergy)");

    let result = resolver.lookup(Some("19901")).await.unwrap();
    assert_eq!(result.electric, "Delmarva Power");
    assert_eq!(result.matched_via, MatchedVia::StateDefault);

    let state = AppState::new(Resolver::new(client.into()));
    let app = create_router(state);

    let request = axum::http::Request::builder()
        .uri("/api/lookup?zip=99999")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = axum::http::Request::builder()
        .uri("/api/lookup?zip=00002")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
