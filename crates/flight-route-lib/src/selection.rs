//! Selection resolver - decides which routes are drawn and how
//!
//! Two states drive the result: nothing selected (the airline network view,
//! which only shows routes when airlines are selected) or one airport selected
//! (its outbound routes). Both go through the same filtering, path and color
//! logic. Every call recomputes the full result from the immutable dataset.

use crate::{Airport, Color, Dataset, FilterState, GeoPoint, Route, color, geo_math};
use geo::{BoundingRect, LineString, MultiPoint, Point, Rect};
use std::collections::HashSet;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tuning for the resolver output
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Interpolation steps for routes of a selected airport (default 50)
    pub airport_path_steps: usize,
    /// Interpolation steps for the airline network view (default 30).
    /// Lower because that view can draw tens of thousands of routes.
    pub network_path_steps: usize,
    /// Route color saturation in percent (default 70)
    pub color_saturation: u8,
    /// Route color lightness in percent (default 50)
    pub color_lightness: u8,
    /// Operator names listed in a label before "+N more" (default 3)
    pub label_operator_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            airport_path_steps: geo_math::AIRPORT_PATH_STEPS,
            network_path_steps: geo_math::NETWORK_PATH_STEPS,
            color_saturation: color::DEFAULT_SATURATION,
            color_lightness: color::DEFAULT_LIGHTNESS,
            label_operator_limit: 3,
        }
    }
}

/// What the user has picked on the map
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Selection {
    #[default]
    None,
    Airport(String),
}

/// Selected airport (if any) together with the active filters
///
/// Like [`FilterState`], changes produce a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionState {
    selection: Selection,
    filters: FilterState,
}

impl SelectionState {
    pub fn new(selection: Selection, filters: FilterState) -> Self {
        Self { selection, filters }
    }

    pub fn with_airport(&self, code: impl Into<String>) -> Self {
        Self {
            selection: Selection::Airport(code.into()),
            filters: self.filters.clone(),
        }
    }

    pub fn without_airport(&self) -> Self {
        Self {
            selection: Selection::None,
            filters: self.filters.clone(),
        }
    }

    pub fn with_filters(&self, filters: FilterState) -> Self {
        Self {
            selection: self.selection.clone(),
            filters,
        }
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn selected_airport(&self) -> Option<&str> {
        match &self.selection {
            Selection::Airport(code) => Some(code),
            Selection::None => None,
        }
    }

    #[inline]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }
}

/// A route ready for the renderer
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ResolvedRoute<'a> {
    route: &'a Route,
    origin: &'a Airport,
    destination: &'a Airport,
    /// Airline the color was derived from
    color_airline: &'a str,
    color: Color,
    label: String,
    distance_km: f64,
    path: Vec<GeoPoint>,
}

impl<'a> ResolvedRoute<'a> {
    #[inline]
    pub fn route(&self) -> &'a Route {
        self.route
    }

    #[inline]
    pub fn origin(&self) -> &'a Airport {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> &'a Airport {
        self.destination
    }

    #[inline]
    pub fn color_airline(&self) -> &'a str {
        self.color_airline
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Tooltip text: endpoints and up to the first few operator names
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Antimeridian-continuous path from origin to destination
    #[inline]
    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    pub fn line_string(&self) -> LineString<f64> {
        geo_math::to_line_string(&self.path)
    }
}

/// Everything to draw for one selection state
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Resolution<'a> {
    routes: Vec<ResolvedRoute<'a>>,
    /// Distinct endpoint airports in first-seen order
    endpoints: Vec<&'a Airport>,
}

impl<'a> Resolution<'a> {
    #[inline]
    pub fn routes(&self) -> &[ResolvedRoute<'a>] {
        &self.routes
    }

    #[inline]
    pub fn endpoints(&self) -> &[&'a Airport] {
        &self.endpoints
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedRoute<'a>> {
        self.routes.iter()
    }

    /// Bounds of every drawn path (x = longitude, y = latitude)
    ///
    /// Longitudes may extend past +-180 for paths crossing the antimeridian.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let points: MultiPoint<f64> = self
            .routes
            .iter()
            .flat_map(|route| route.path.iter().copied().map(Point::from))
            .collect();
        points.bounding_rect()
    }
}

impl<'r, 'a> IntoIterator for &'r Resolution<'a> {
    type Item = &'r ResolvedRoute<'a>;
    type IntoIter = std::slice::Iter<'r, ResolvedRoute<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Resolves selection states against a loaded dataset
#[derive(Debug, Clone)]
pub struct SelectionResolver<'a> {
    dataset: &'a Dataset,
    config: Config,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<'a> SelectionResolver<'a> {
    pub fn new(dataset: &'a Dataset, config: Config) -> Self {
        Self { dataset, config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Routes that pass the filters for `state`, before geometry is computed
    pub fn matching_routes(&self, state: &SelectionState) -> Vec<&'a Route> {
        let filters = state.filters();
        self.candidates(state)
            .map(|(routes, _)| routes)
            .unwrap_or_default()
            .iter()
            .map(Arc::as_ref)
            .filter(|route| filters.matches(route))
            .collect()
    }

    /// Compute everything the renderer needs for `state`
    ///
    /// Routes whose endpoints are not in the dataset are skipped.
    pub fn resolve(&self, state: &SelectionState) -> Resolution<'a> {
        #[cfg(feature = "profiling")]
        profiling::scope!("selection::resolve");

        let Some((candidates, steps)) = self.candidates(state) else {
            return Resolution::default();
        };

        let filters = state.filters();
        let mut routes = Vec::new();
        let mut endpoints = Vec::new();
        let mut seen_endpoints = HashSet::new();
        let mut skipped = 0usize;

        for route in candidates.iter().map(Arc::as_ref) {
            if !filters.matches(route) {
                continue;
            }
            let Some(resolved) = self.resolve_route(route, filters, steps) else {
                tracing::trace!(
                    "Skipping route {} -> {} with unknown endpoint",
                    route.origin(),
                    route.destination()
                );
                skipped += 1;
                continue;
            };
            for airport in [resolved.origin, resolved.destination] {
                if seen_endpoints.insert(airport.iata()) {
                    endpoints.push(airport);
                }
            }
            routes.push(resolved);
        }

        tracing::debug!(
            "Resolved {} routes ({} skipped) for {:?}",
            routes.len(),
            skipped,
            state.selection()
        );

        Resolution { routes, endpoints }
    }

    /// Candidate routes and interpolation steps, or `None` if nothing is drawn
    fn candidates(&self, state: &SelectionState) -> Option<(&'a [Arc<Route>], usize)> {
        match state.selection() {
            Selection::Airport(code) => Some((
                self.dataset.routes_from(code),
                self.config.airport_path_steps,
            )),
            Selection::None if state.filters().airlines().is_empty() => None,
            Selection::None => Some((self.dataset.routes(), self.config.network_path_steps)),
        }
    }

    fn resolve_route(
        &self,
        route: &'a Route,
        filters: &FilterState,
        steps: usize,
    ) -> Option<ResolvedRoute<'a>> {
        let origin = self.dataset.airport(route.origin())?;
        let destination = self.dataset.airport(route.destination())?;

        let color_airline = color::color_source(route, filters);
        let color = color::color_for_with(
            color_airline,
            self.config.color_saturation,
            self.config.color_lightness,
        );

        let (start, end) = (origin.location(), destination.location());
        Some(ResolvedRoute {
            route,
            origin,
            destination,
            color_airline,
            color,
            label: self.label(route),
            distance_km: geo_math::great_circle_distance_km(start, end),
            path: geo_math::great_circle_path(start, end, steps),
        })
    }

    /// `JFK → LHR: American Airlines, British Airways (+2 more)`
    fn label(&self, route: &Route) -> String {
        let operators = route.operators();
        let limit = self.config.label_operator_limit.max(1);

        let names: Vec<&str> = operators
            .iter()
            .take(limit)
            .map(|code| self.dataset.airline(code).map_or(code.as_str(), |a| a.name()))
            .collect();

        let mut label = format!("{} → {}: ", route.origin(), route.destination());
        if names.is_empty() {
            label.push_str("unknown operator");
        } else {
            label.push_str(&names.join(", "));
        }
        if operators.len() > limit {
            label.push_str(&format!(" (+{} more)", operators.len() - limit));
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Airline;

    fn airport(code: &str, lat: f64, lon: f64) -> Airport {
        Airport::new(code, format!("{code} airport"), GeoPoint::new(lat, lon)).unwrap()
    }

    fn create_test_dataset() -> Dataset {
        let airports = vec![
            airport("JFK", 40.64, -73.78),
            airport("LHR", 51.47, -0.45),
            airport("CDG", 49.01, 2.55),
            airport("NRT", 35.77, 140.39),
            airport("SFO", 37.62, -122.38),
        ];
        let airlines = vec![
            Airline::new("AA", "American Airlines"),
            Airline::new("BA", "British Airways"),
            Airline::new("AF", "Air France"),
            Airline::new("DL", "Delta Air Lines"),
            Airline::new("JL", "Japan Airlines"),
        ];
        let routes = vec![
            Route::new("JFK", "LHR")
                .with_operators(["AA", "BA"])
                .with_aircraft(["777", "A380"]),
            Route::new("JFK", "CDG")
                .with_operators(["AF", "DL"])
                .with_codeshares(["AA"])
                .with_aircraft(["333"]),
            Route::new("JFK", "XXX").with_operators(["AA"]),
            Route::new("LHR", "CDG")
                .with_operators(["BA", "AF", "AA", "DL", "IB"])
                .with_aircraft(["320"]),
            Route::new("NRT", "SFO")
                .with_operators(["JL"])
                .with_codeshares(["AA"])
                .with_aircraft(["789"]),
        ];
        Dataset::new(airports, airlines, routes, vec![])
    }

    fn destinations<'a>(resolution: &Resolution<'a>) -> Vec<&'a str> {
        resolution
            .iter()
            .map(|route| route.destination().iata())
            .collect()
    }

    #[test]
    fn test_no_selection_without_airlines_draws_nothing() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let state = SelectionState::default();
        assert!(resolver.resolve(&state).is_empty());

        // Aircraft filters alone do not enable the network view
        let state = state.with_filters(FilterState::new().with_aircraft(["777"]));
        assert!(resolver.resolve(&state).is_empty());
    }

    #[test]
    fn test_airport_selection_uses_index_and_skips_unknown_endpoints() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let resolution = resolver.resolve(&SelectionState::default().with_airport("JFK"));
        assert_eq!(destinations(&resolution), ["LHR", "CDG"]);

        // JFK -> XXX passes the filter but cannot be drawn
        let matching = resolver.matching_routes(&SelectionState::default().with_airport("JFK"));
        assert_eq!(matching.len(), 3);
    }

    #[test]
    fn test_airport_selection_with_filters() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let filters = FilterState::new().with_airlines(["AA"]);
        let state = SelectionState::default().with_airport("JFK").with_filters(filters.clone());
        assert_eq!(destinations(&resolver.resolve(&state)), ["LHR"]);

        let state = state.with_filters(filters.with_codeshares(true));
        assert_eq!(destinations(&resolver.resolve(&state)), ["LHR", "CDG"]);
    }

    #[test]
    fn test_network_view_spans_all_airports() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let state = SelectionState::default()
            .with_filters(FilterState::new().with_airlines(["AA"]).with_codeshares(true));
        let resolution = resolver.resolve(&state);

        let pairs: Vec<(&str, &str)> = resolution
            .iter()
            .map(|r| (r.origin().iata(), r.destination().iata()))
            .collect();
        assert_eq!(
            pairs,
            [("JFK", "LHR"), ("JFK", "CDG"), ("LHR", "CDG"), ("NRT", "SFO")]
        );
        // Network view uses the coarser resolution
        assert!(resolution.iter().all(|r| r.path().len() == 31));
    }

    #[test]
    fn test_unknown_airport_selection_is_empty() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());
        assert!(resolver.resolve(&SelectionState::default().with_airport("ZZZ")).is_empty());
        // CDG has no outbound routes
        assert!(resolver.resolve(&SelectionState::default().with_airport("CDG")).is_empty());
    }

    #[test]
    fn test_resolved_route_geometry_and_color() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let resolution = resolver.resolve(&SelectionState::default().with_airport("JFK"));
        let jfk_lhr = &resolution.routes()[0];

        assert_eq!(jfk_lhr.path().len(), 51);
        assert_eq!(jfk_lhr.path()[0], GeoPoint::new(40.64, -73.78));
        assert_eq!(jfk_lhr.path()[50], GeoPoint::new(51.47, -0.45));
        assert_eq!(jfk_lhr.color_airline(), "AA");
        assert_eq!(jfk_lhr.color(), color::color_for("AA"));
        assert!(jfk_lhr.distance_km() > 5_400.0 && jfk_lhr.distance_km() < 5_600.0);
        assert_eq!(jfk_lhr.line_string().0.len(), 51);
    }

    #[test]
    fn test_color_follows_selected_operator() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let state = SelectionState::default()
            .with_airport("JFK")
            .with_filters(FilterState::new().with_airlines(["BA"]));
        let resolution = resolver.resolve(&state);
        assert_eq!(resolution.len(), 1);
        assert_eq!(resolution.routes()[0].color_airline(), "BA");
    }

    #[test]
    fn test_labels() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let jfk = resolver.resolve(&SelectionState::default().with_airport("JFK"));
        assert_eq!(
            jfk.routes()[0].label(),
            "JFK → LHR: American Airlines, British Airways"
        );

        let lhr = resolver.resolve(&SelectionState::default().with_airport("LHR"));
        assert_eq!(
            lhr.routes()[0].label(),
            "LHR → CDG: British Airways, Air France, American Airlines (+2 more)"
        );
    }

    #[test]
    fn test_label_falls_back_to_codes() {
        let dataset = Dataset::new(
            vec![airport("AAA", 0.0, 0.0), airport("BBB", 1.0, 1.0), airport("CCC", 2.0, 2.0)],
            vec![],
            vec![
                Route::new("AAA", "BBB").with_operators(["ZZ"]),
                Route::new("AAA", "CCC"),
            ],
            vec![],
        );
        let resolver = SelectionResolver::new(&dataset, Config::default());
        let resolution = resolver.resolve(&SelectionState::default().with_airport("AAA"));
        assert_eq!(resolution.routes()[0].label(), "AAA → BBB: ZZ");
        assert_eq!(resolution.routes()[1].label(), "AAA → CCC: unknown operator");
        assert_eq!(resolution.routes()[1].color_airline(), color::UNKNOWN_AIRLINE);
    }

    #[test]
    fn test_endpoints_are_distinct() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        let resolution = resolver.resolve(&SelectionState::default().with_airport("JFK"));
        let codes: Vec<&str> = resolution.endpoints().iter().map(|a| a.iata()).collect();
        assert_eq!(codes, ["JFK", "LHR", "CDG"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());
        let state = SelectionState::default()
            .with_filters(FilterState::new().with_airlines(["AA"]).with_codeshares(true));

        let first = resolver.resolve(&state);
        let second = resolver.resolve(&state);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.path(), b.path());
            assert_eq!(a.label(), b.label());
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn test_bounding_rect_covers_paths() {
        let dataset = create_test_dataset();
        let resolver = SelectionResolver::new(&dataset, Config::default());

        assert!(resolver.resolve(&SelectionState::default()).bounding_rect().is_none());

        let resolution = resolver.resolve(&SelectionState::default().with_airport("JFK"));
        let rect = resolution.bounding_rect().unwrap();
        assert!(rect.min().x <= -73.78 && rect.max().x >= 2.55);
        assert!(rect.min().y <= 40.64 && rect.max().y >= 51.47);
    }

    #[test]
    fn test_custom_config() {
        let dataset = create_test_dataset();
        let config = Config {
            airport_path_steps: 4,
            color_saturation: 90,
            label_operator_limit: 1,
            ..Config::default()
        };
        let resolver = SelectionResolver::new(&dataset, config);
        let resolution = resolver.resolve(&SelectionState::default().with_airport("JFK"));
        let first = &resolution.routes()[0];
        assert_eq!(first.path().len(), 5);
        assert_eq!(first.color().saturation(), 90);
        assert_eq!(first.label(), "JFK → LHR: American Airlines (+1 more)");
    }

    #[test]
    fn test_state_transitions_build_new_values() {
        let initial = SelectionState::default();
        let selected = initial.with_airport("JFK");
        assert_eq!(initial.selected_airport(), None);
        assert_eq!(selected.selected_airport(), Some("JFK"));
        assert_eq!(selected.without_airport(), initial);

        let filtered = selected.with_filters(FilterState::new().toggle_airline("AA"));
        assert_eq!(filtered.selected_airport(), Some("JFK"));
        assert_ne!(filtered, selected);
        assert_eq!(
            SelectionState::new(Selection::Airport("JFK".into()), FilterState::new()),
            selected
        );
    }
}
