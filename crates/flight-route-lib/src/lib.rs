//! Flight Route Library - Route Geometry and Selection for Flight Network Maps
//!
//! This library computes what a flight-network map has to draw: which routes
//! are visible for the selected airport and airline/aircraft filters, the
//! great-circle path of each one (continuous across the antimeridian), its
//! color and its tooltip text. Tile rendering, widgets and search live in the
//! consumers of this crate.
//!
//! # Architecture
//!
//! - **[`geo_math`]**: Great-circle interpolation, distance and longitude unwrapping
//! - **[`Dataset`]**: Immutable airports, airlines and routes with O(1) lookups
//! - **[`RouteIndex`]**: Outbound routes per origin airport, built once
//! - **[`FilterState`]**: Airline / aircraft / codeshare filter as a value type
//! - **[`color_for`]**: Deterministic airline colors
//! - **[`SelectionResolver`]**: Turns a [`SelectionState`] into a [`Resolution`]
//!
//! # Example
//!
//! ```rust
//! use flight_route_lib::{
//!     Airport, Config, Dataset, FilterState, GeoPoint, Route, SelectionResolver, SelectionState,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let airports = vec![
//!     Airport::new("JFK", "John F Kennedy", GeoPoint::new(40.64, -73.78))?,
//!     Airport::new("LHR", "Heathrow", GeoPoint::new(51.47, -0.45))?,
//! ];
//! let routes = vec![Route::new("JFK", "LHR").with_operators(["AA", "BA"])];
//! let dataset = Dataset::new(airports, vec![], routes, vec![]);
//!
//! let resolver = SelectionResolver::new(&dataset, Config::default());
//! let state = SelectionState::default()
//!     .with_airport("JFK")
//!     .with_filters(FilterState::new().with_airlines(["BA"]));
//!
//! for route in &resolver.resolve(&state) {
//!     println!("{} {} ({} points)", route.label(), route.color(), route.path().len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Performance Characteristics
//!
//! - **Index Build**: O(R) over all routes, once per dataset
//! - **Airport View**: O(K x S) where K = routes from the airport, S = path steps
//! - **Network View**: O(R) filter checks plus O(K x S) for the matches

mod color;
mod dataset;
mod filter;
pub mod geo_math;
mod index;
mod model;
mod selection;

// Public API exports
pub use color::{
    Color, DEFAULT_LIGHTNESS, DEFAULT_SATURATION, UNKNOWN_AIRLINE, airline_hue, color_for,
    color_for_with, color_source,
};
#[cfg(feature = "serde")]
pub use dataset::{AIRCRAFT_FILE, AIRLINES_FILE, AIRPORTS_FILE, ROUTES_FILE};
pub use dataset::{Dataset, DatasetInfo};
pub use filter::FilterState;
pub use geo_math::GeoPoint;
pub use index::RouteIndex;
pub use model::{Airline, Airport, CodeList, Route};
pub use selection::{
    Config, Resolution, ResolvedRoute, Selection, SelectionResolver, SelectionState,
};

/// Error types for the route library
///
/// Resolving a selection never fails; errors only come from validating and
/// loading records.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Invalid airport {code:?}: {reason}")]
    InvalidAirport { code: String, reason: String },

    #[cfg(feature = "serde")]
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;
