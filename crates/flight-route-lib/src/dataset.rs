//! Dataset - owned airports, airlines and routes plus the route index
//!
//! The lookup maps are built once by [`Dataset::new`] and only read afterwards,
//! so a loaded dataset can be shared freely between consumers.

use crate::{Airline, Airport, Route, RouteIndex};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[cfg(feature = "serde")]
use crate::Result;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counts describing a loaded dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatasetInfo {
    pub airport_count: usize,
    pub airline_count: usize,
    pub route_count: usize,
    pub aircraft_type_count: usize,
    /// Routes with at least one endpoint missing from the airport list
    pub dangling_route_count: usize,
}

/// Immutable airports, airlines, routes and aircraft types
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    airports: Vec<Airport>,
    airport_lookup: HashMap<String, usize>,
    airlines: Vec<Airline>,
    airline_lookup: HashMap<String, usize>,
    routes: Vec<Arc<Route>>,
    aircraft_types: Vec<String>,
    index: RouteIndex,
    dangling_route_count: usize,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Dataset {
    /// Build the lookup maps and the route index
    ///
    /// Data-quality problems are repaired rather than reported: repeated
    /// airport/airline codes and repeated (origin, destination) pairs keep
    /// their first occurrence, and repeated codes inside a route are dropped.
    /// Routes whose endpoints are unknown are kept; they are skipped when
    /// resolving a selection.
    pub fn new(
        airports: Vec<Airport>,
        airlines: Vec<Airline>,
        routes: Vec<Route>,
        aircraft_types: Vec<String>,
    ) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("dataset::new");

        let (airports, airport_lookup) = keyed_by_code(airports, "airport", Airport::iata);
        let (airlines, airline_lookup) = keyed_by_code(airlines, "airline", Airline::iata);

        let mut seen_pairs: HashSet<(String, String)> = HashSet::with_capacity(routes.len());
        let mut kept_routes = Vec::with_capacity(routes.len());
        let mut dangling_route_count = 0;
        for mut route in routes {
            let pair = (route.origin().to_string(), route.destination().to_string());
            if !seen_pairs.insert(pair) {
                tracing::warn!(
                    "Skipping duplicate route {} -> {}",
                    route.origin(),
                    route.destination()
                );
                continue;
            }
            if route.dedup_codes() {
                tracing::warn!(
                    "Removed repeated codes from route {} -> {}",
                    route.origin(),
                    route.destination()
                );
            }
            if !airport_lookup.contains_key(route.origin())
                || !airport_lookup.contains_key(route.destination())
            {
                dangling_route_count += 1;
            }
            kept_routes.push(Arc::new(route));
        }

        if dangling_route_count > 0 {
            tracing::debug!(
                "{} routes reference unknown airports and will never be drawn",
                dangling_route_count
            );
        }

        let mut seen_types = HashSet::with_capacity(aircraft_types.len());
        let aircraft_types: Vec<String> = aircraft_types
            .into_iter()
            .filter(|code| seen_types.insert(code.clone()))
            .collect();

        let index = RouteIndex::build(&kept_routes);

        tracing::info!(
            "Loaded {} airports, {} airlines, {} routes, {} aircraft types",
            airports.len(),
            airlines.len(),
            kept_routes.len(),
            aircraft_types.len()
        );

        Self {
            airports,
            airport_lookup,
            airlines,
            airline_lookup,
            routes: kept_routes,
            aircraft_types,
            index,
            dangling_route_count,
        }
    }

    /// Parse the ingestion JSON arrays and build a dataset
    ///
    /// Airports with unusable coordinates are skipped with a warning.
    #[cfg(feature = "serde")]
    pub fn from_json_readers<R: std::io::Read>(
        airports: R,
        airlines: R,
        routes: R,
        aircraft_types: Option<R>,
    ) -> Result<Self> {
        let airports: Vec<Airport> = serde_json::from_reader(airports)?;
        let airports = airports
            .into_iter()
            .filter(|airport| match airport.validate() {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!("Skipping airport: {err}");
                    false
                }
            })
            .collect();
        let airlines: Vec<Airline> = serde_json::from_reader(airlines)?;
        let routes: Vec<Route> = serde_json::from_reader(routes)?;
        let aircraft_types: Vec<String> = match aircraft_types {
            Some(reader) => serde_json::from_reader(reader)?,
            None => Vec::new(),
        };
        Ok(Self::new(airports, airlines, routes, aircraft_types))
    }

    /// Load `airports.json`, `airlines.json`, `routes.json` and, when present,
    /// `aircraft.json` from a directory
    #[cfg(feature = "serde")]
    pub fn load_dir<P: AsRef<std::path::Path>>(dir: P) -> Result<Self> {
        use std::fs::File;
        use std::io::BufReader;

        let dir = dir.as_ref();
        let open = |name: &str| -> Result<BufReader<File>> {
            Ok(BufReader::new(File::open(dir.join(name))?))
        };

        let aircraft_path = dir.join(AIRCRAFT_FILE);
        let aircraft_types = if aircraft_path.exists() {
            Some(open(AIRCRAFT_FILE)?)
        } else {
            tracing::debug!("No {} in {}", AIRCRAFT_FILE, dir.display());
            None
        };

        Self::from_json_readers(
            open(AIRPORTS_FILE)?,
            open(AIRLINES_FILE)?,
            open(ROUTES_FILE)?,
            aircraft_types,
        )
    }

    #[inline]
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airport_lookup.get(code).map(|&i| &self.airports[i])
    }

    #[inline]
    pub fn airline(&self, code: &str) -> Option<&Airline> {
        self.airline_lookup.get(code).map(|&i| &self.airlines[i])
    }

    /// Airports in load order
    #[inline]
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Airlines in load order
    #[inline]
    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }

    /// All routes in load order
    #[inline]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    /// Routes departing `airport`; empty for unknown airports
    #[inline]
    pub fn routes_from(&self, airport: &str) -> &[Arc<Route>] {
        self.index.routes_from(airport)
    }

    #[inline]
    pub fn aircraft_types(&self) -> &[String] {
        &self.aircraft_types
    }

    #[inline]
    pub fn index(&self) -> &RouteIndex {
        &self.index
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            airport_count: self.airports.len(),
            airline_count: self.airlines.len(),
            route_count: self.routes.len(),
            aircraft_type_count: self.aircraft_types.len(),
            dangling_route_count: self.dangling_route_count,
        }
    }
}

#[cfg(feature = "serde")]
pub const AIRPORTS_FILE: &str = "airports.json";
#[cfg(feature = "serde")]
pub const AIRLINES_FILE: &str = "airlines.json";
#[cfg(feature = "serde")]
pub const ROUTES_FILE: &str = "routes.json";
#[cfg(feature = "serde")]
pub const AIRCRAFT_FILE: &str = "aircraft.json";

/// Keep the first record for each code and build the code -> position map
fn keyed_by_code<T>(
    records: Vec<T>,
    kind: &str,
    code: impl Fn(&T) -> &str,
) -> (Vec<T>, HashMap<String, usize>) {
    let mut kept = Vec::with_capacity(records.len());
    let mut lookup = HashMap::with_capacity(records.len());
    for record in records {
        let key = code(&record).to_string();
        if lookup.contains_key(&key) {
            tracing::warn!("Skipping duplicate {kind} {key}");
            continue;
        }
        lookup.insert(key, kept.len());
        kept.push(record);
    }
    (kept, lookup)
}
