//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{health, lookup_get, lookup_post, ready, states, status, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Lookup endpoint
        .route("/api/lookup", get(lookup_get).post(lookup_post))
        .route("/api/v1/states", get(states))
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Status endpoint
        .route("/api/v1/status", get(status))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::geocode::{MockGeocodeConfig, MockGeocoder};
    use crate::lookup::Resolver;

    fn app_with(geocoder: MockGeocoder) -> Router {
        let state = AppState::new(Resolver::new(geocoder.into()));
        state.set_ready(true);
        create_router(state)
    }

    fn app() -> Router {
        app_with(
            MockGeocoder::new()
                .with_place("44101", "Cleveland", "OH")
                .with_place("45501", "Springfield", "OH")
                .with_place("10001", "New York", "NY")
                .with_place("96799", "Pago Pago", "AS"),
        )
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_req(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/lookup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let response = app().oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ready_endpoint_returns_503_when_not_ready() {
        let state = AppState::new(Resolver::new(MockGeocoder::new().into()));
        let app = create_router(state);

        let response = app.oneshot(get_req("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn ready_endpoint_returns_200_when_ready() {
        let response = app().oneshot(get_req("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn get_lookup_returns_city_match() {
        let response = app()
            .oneshot(get_req("/api/lookup?zip=44101"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["data"]["city"], "Cleveland");
        assert_eq!(body["data"]["state"], "OH");
        assert_eq!(
            body["data"]["electric"],
            "The Illuminating Company (FirstEnergy)"
        );
        assert_eq!(body["data"]["matched_via"], "city");
        assert_eq!(body["meta"], "Determined from city: Cleveland, state: OH.");
    }

    #[tokio::test]
    async fn post_lookup_returns_state_default() {
        let response = app()
            .oneshot(post_req(r#"{"zip": "45501"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["electric"], "Ohio Edison (FirstEnergy)");
        assert_eq!(body["data"]["matched_via"], "stateDefault");
    }

    #[tokio::test]
    async fn uncovered_state_is_still_200() {
        let response = app()
            .oneshot(get_req("/api/lookup?zip=96799"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["electric"], "Unknown");
        assert_eq!(body["data"]["matched_via"], "none");
    }

    #[tokio::test]
    async fn malformed_zips_return_400() {
        for uri in [
            "/api/lookup",
            "/api/lookup?zip=",
            "/api/lookup?zip=1234",
            "/api/lookup?zip=123456",
            "/api/lookup?zip=abcde",
            "/api/lookup?zip=44101-1234",
            "/api/lookup?zip=44101&zip=10001",
            "/api/lookup?zip=%2044101",
            "/api/lookup?zip=+44101",
            "/api/lookup?zip=44101%0A",
        ] {
            let response = app().oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                body_json(response).await,
                json!({"ok": false, "error": "Invalid ZIP"})
            );
        }
    }

    #[tokio::test]
    async fn malformed_bodies_return_400() {
        for body in [
            "",
            "not json",
            "{}",
            r#"{"zip": 44101}"#,
            r#"{"zip": null}"#,
            r#"{"zip": "4410"}"#,
            r#"{"zip": " 44101"}"#,
            r#"["44101"]"#,
        ] {
            let response = app().oneshot(post_req(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body:?}");
        }
    }

    #[tokio::test]
    async fn unknown_zip_returns_404() {
        let response = app()
            .oneshot(get_req("/api/lookup?zip=99999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"ok": false, "error": "ZIP not found"})
        );
    }

    #[tokio::test]
    async fn geocoder_failure_returns_500() {
        let app = app_with(MockGeocoder::with_config(MockGeocodeConfig {
            fail_requests: true,
            ..Default::default()
        }));

        let response = app.oneshot(get_req("/api/lookup?zip=44101")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"ok": false, "error": "lookup_failed"})
        );
    }

    #[tokio::test]
    async fn other_methods_are_rejected() {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/lookup?zip=44101")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn status_counts_lookups() {
        let state = AppState::new(Resolver::new(
            MockGeocoder::new().with_place("44101", "Cleveland", "OH").into(),
        ));
        state.set_ready(true);
        let app = create_router(state.clone());

        app.clone()
            .oneshot(get_req("/api/lookup?zip=44101"))
            .await
            .unwrap();
        app.clone()
            .oneshot(get_req("/api/lookup?zip=bad"))
            .await
            .unwrap();

        let response = app.oneshot(get_req("/api/v1/status")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["stats"]["lookups_succeeded"], 1);
        assert_eq!(body["stats"]["lookups_failed"], 1);
    }

    #[tokio::test]
    async fn states_endpoint_lists_table() {
        let response = app().oneshot(get_req("/api/v1/states")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let states: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["state"].as_str().unwrap())
            .collect();
        assert_eq!(states, vec!["CA", "DE", "MI", "NJ", "NY", "OH", "PA", "RI"]);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let response = app()
            .oneshot(get_req("/api-docs/openapi.json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["paths"]["/api/lookup"].is_object());
    }
}
