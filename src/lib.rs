//! ZIP code to utility provider lookup service.
//!
//! Resolves a 5-digit US ZIP code to a city/state through an external
//! geocoder, then picks a best-guess electric and gas provider from a static,
//! hand-curated table.
//!
//! # Matching
//!
//! City keys are matched as substrings of the lowercased city name, in the
//! order the table declares them, before falling back to state-level data:
//!
//! ```text
//! ZIP 10001 -> New York, NY
//!   NY keys: "new york mills", "new york", "brooklyn", ...
//!   first match "new york"    -> Con Edison   (matched_via = city)
//! ZIP 45501 -> Springfield, OH
//!   no OH key matches         -> OH default  (matched_via = stateDefault)
//! ZIP 96799 -> Pago Pago, AS
//!   AS not in table           -> Unknown     (matched_via = none)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`lookup`]: ZIP validation, utility table, matcher and resolver
//! - [`geocode`]: Zippopotam.us client and mock geocoder
//! - [`api`]: HTTP API for lookups, health and status
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod geocode;
pub mod lookup;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{GeocodeError, LookupError, Result, ServiceError};
pub use lookup::{LookupResult, MatchedVia, Resolver, UtilityTable, ZipCode};
