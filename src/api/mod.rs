//! HTTP API module for the lookup, health and status endpoints.

pub mod docs;
pub mod handlers;
pub mod response;
pub mod routes;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use response::{assemble, ErrorResponse, LookupResponse};
pub use routes::create_router;
