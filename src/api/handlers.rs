//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::error::LookupError;
use crate::geocode::Geocoder;
use crate::lookup::{zip_field, Resolver, UtilityTable};

use super::response::{assemble, ErrorResponse, LookupResponse};

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// ZIP resolver.
    pub resolver: Arc<Resolver<Geocoder>>,
    /// Whether the server is accepting lookups.
    pub ready: Arc<AtomicBool>,
    /// Lookup counters.
    pub counters: Arc<LookupCounters>,
    /// Process start time.
    pub started_at: Instant,
}

/// Lookup counters reported by the status endpoint.
#[derive(Debug, Default)]
pub struct LookupCounters {
    /// Lookups answered with 200.
    pub succeeded: AtomicU64,
    /// Lookups answered with 4xx/5xx.
    pub failed: AtomicU64,
}

impl AppState {
    /// Create new app state around a resolver.
    pub fn new(resolver: Resolver<Geocoder>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            ready: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(LookupCounters::default()),
            started_at: Instant::now(),
        }
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// The table the resolver matches against.
    pub fn table(&self) -> &'static UtilityTable {
        self.resolver.table()
    }

    async fn run_lookup(&self, raw_zip: Option<&str>) -> Result<Json<LookupResponse>, LookupError> {
        match self.resolver.lookup(raw_zip).await {
            Ok(result) => {
                self.counters.succeeded.fetch_add(1, Ordering::Relaxed);
                Ok(Json(assemble(result)))
            }
            Err(e) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }
}

/// Query string for `GET /api/lookup`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    /// 5-digit US ZIP code.
    pub zip: Option<String>,
}

/// JSON body for `POST /api/lookup`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LookupRequest {
    /// 5-digit US ZIP code.
    pub zip: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
    /// Number of states in the utility table.
    pub states: usize,
}

/// Status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// Number of states in the utility table.
    pub states: usize,
    /// Statistics.
    pub stats: StatsResponse,
}

/// Statistics in status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Lookups answered with 200.
    pub lookups_succeeded: u64,
    /// Lookups answered with an error.
    pub lookups_failed: u64,
}

/// One covered state.
#[derive(Debug, Serialize, ToSchema)]
pub struct StateSummary {
    /// State abbreviation.
    pub state: String,
    /// City keys in matching order.
    pub cities: Vec<String>,
    /// Whether the state has a `default` entry.
    pub has_default: bool,
    /// Length of the state-level fallback list.
    pub fallbacks: usize,
}

/// Look up the utility provider for a ZIP passed as `?zip=`.
#[utoipa::path(
    get,
    path = "/api/lookup",
    params(LookupQuery),
    responses(
        (status = 200, description = "Best-guess utility provider", body = LookupResponse),
        (status = 400, description = "Malformed ZIP", body = ErrorResponse),
        (status = 404, description = "ZIP unknown to the geocoder", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    ),
    tag = "lookup"
)]
pub async fn lookup_get(
    State(state): State<AppState>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<LookupResponse>, LookupError> {
    let zip = match query {
        Ok(Query(q)) => q.zip,
        Err(e) => {
            debug!(error = %e, "Rejected lookup query");
            None
        }
    };

    state.run_lookup(zip.as_deref()).await
}

/// Look up the utility provider for a ZIP passed as a JSON body.
#[utoipa::path(
    post,
    path = "/api/lookup",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "Best-guess utility provider", body = LookupResponse),
        (status = 400, description = "Malformed ZIP or body", body = ErrorResponse),
        (status = 404, description = "ZIP unknown to the geocoder", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    ),
    tag = "lookup"
)]
pub async fn lookup_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LookupResponse>, LookupError> {
    let value: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            debug!(error = %e, "Lookup body is not JSON");
            Value::Null
        })
    };

    state.run_lookup(zip_field(&value)).await
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is alive", body = HealthResponse)),
    tag = "ops"
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Accepting lookups", body = ReadyResponse),
        (status = 503, description = "Not ready yet", body = ReadyResponse)
    ),
    tag = "ops"
)]
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();

    let response = ReadyResponse {
        ready: is_ready,
        states: state.table().len(),
    };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns service status and statistics.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    responses((status = 200, description = "Service status", body = StatusResponse)),
    tag = "ops"
)]
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        states: state.table().len(),
        stats: StatsResponse {
            lookups_succeeded: state.counters.succeeded.load(Ordering::Relaxed),
            lookups_failed: state.counters.failed.load(Ordering::Relaxed),
        },
    })
}

/// Covered states handler.
#[utoipa::path(
    get,
    path = "/api/v1/states",
    responses((status = 200, description = "Covered states", body = [StateSummary])),
    tag = "lookup"
)]
pub async fn states(State(state): State<AppState>) -> impl IntoResponse {
    Json(summarize_table(state.table()))
}

/// Summaries of every state in the table, sorted by abbreviation.
pub fn summarize_table(table: &UtilityTable) -> Vec<StateSummary> {
    table
        .state_codes()
        .into_iter()
        .filter_map(|code| {
            let entry = table.get(code)?;
            Some(StateSummary {
                state: code.to_string(),
                cities: entry.cities().iter().map(|(k, _)| k.clone()).collect(),
                has_default: entry.default_entry().is_some(),
                fallbacks: entry.fallbacks().len(),
            })
        })
        .collect()
}
