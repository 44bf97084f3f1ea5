//! ZIP to utility lookup.
//!
//! This module handles:
//! - ZIP validation
//! - The static utility table
//! - City-first, state-default-second matching
//! - The resolver tying geocoding and matching together

pub mod matcher;
pub mod resolver;
pub mod table;
pub mod types;
pub mod zip;

pub use matcher::{match_utility, select_provider};
pub use resolver::Resolver;
pub use table::{StateUtilities, UtilityTable, DEFAULT_KEY};
pub use types::{LookupResult, MatchedVia, Place, Provider, NO_DATA_PROVIDER, UNKNOWN_PROVIDER};
pub use zip::{zip_field, ZipCode};
