//! OpenAPI document.

use utoipa::OpenApi;

use super::handlers::{
    HealthResponse, LookupRequest, ReadyResponse, StateSummary, StatsResponse, StatusResponse,
};
use super::response::{ErrorResponse, LookupResponse};
use crate::lookup::{LookupResult, MatchedVia};

/// OpenAPI description of the HTTP API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "utility-lookup",
        description = "Best-guess electric/gas utility provider for a US ZIP code"
    ),
    paths(
        super::handlers::lookup_get,
        super::handlers::lookup_post,
        super::handlers::states,
        super::handlers::health,
        super::handlers::ready,
        super::handlers::status,
    ),
    components(schemas(
        LookupRequest,
        LookupResponse,
        LookupResult,
        MatchedVia,
        ErrorResponse,
        StateSummary,
        HealthResponse,
        ReadyResponse,
        StatusResponse,
        StatsResponse,
    )),
    tags(
        (name = "lookup", description = "ZIP to utility lookup"),
        (name = "ops", description = "Health and status")
    )
)]
pub struct ApiDoc;
