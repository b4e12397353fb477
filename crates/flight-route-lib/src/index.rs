//! Outbound route index keyed by origin airport

use crate::Route;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps an airport code to the routes departing from it
///
/// Built once per dataset and never updated; a reload builds a new index.
#[derive(Clone, Debug, Default)]
pub struct RouteIndex {
    by_origin: HashMap<String, Vec<Arc<Route>>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteIndex {
    /// Single pass over `routes`, keeping input order within each airport
    pub fn build(routes: &[Arc<Route>]) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("index::build");

        let mut by_origin: HashMap<String, Vec<Arc<Route>>> = HashMap::new();
        for route in routes {
            by_origin
                .entry(route.origin().to_string())
                .or_default()
                .push(Arc::clone(route));
        }

        tracing::debug!(
            "Indexed {} routes across {} origin airports",
            routes.len(),
            by_origin.len()
        );

        Self { by_origin }
    }

    /// Routes departing `airport`; empty for unknown airports
    #[inline]
    pub fn routes_from(&self, airport: &str) -> &[Arc<Route>] {
        self.by_origin.get(airport).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of airports with at least one outbound route
    #[inline]
    pub fn origin_count(&self) -> usize {
        self.by_origin.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_routes() -> Vec<Arc<Route>> {
        vec![
            Arc::new(Route::new("JFK", "LHR").with_operators(["AA"])),
            Arc::new(Route::new("LHR", "JFK").with_operators(["BA"])),
            Arc::new(Route::new("JFK", "CDG").with_operators(["AF"])),
            Arc::new(Route::new("JFK", "NRT").with_operators(["JL"])),
        ]
    }

    #[test]
    fn test_build_groups_by_origin_in_input_order() {
        let index = RouteIndex::build(&create_test_routes());
        assert_eq!(index.origin_count(), 2);

        let destinations: Vec<&str> = index
            .routes_from("JFK")
            .iter()
            .map(|route| route.destination())
            .collect();
        assert_eq!(destinations, ["LHR", "CDG", "NRT"]);
        assert_eq!(index.routes_from("LHR").len(), 1);
    }

    #[test]
    fn test_lookup_without_routes_is_empty() {
        let index = RouteIndex::build(&create_test_routes());
        // CDG only appears as a destination
        assert!(index.routes_from("CDG").is_empty());
        assert!(index.routes_from("ZZZ").is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = RouteIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.routes_from("JFK").is_empty());
    }

    #[test]
    fn test_index_shares_route_allocations() {
        let routes = create_test_routes();
        let index = RouteIndex::build(&routes);
        assert!(Arc::ptr_eq(&index.routes_from("LHR")[0], &routes[1]));
    }
}
