//! Airline / aircraft route filter
//!
//! [`FilterState`] is a value: every user action produces a new state instead
//! of mutating the current one, so two states can be compared to detect a
//! change.

use crate::Route;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Active airline and aircraft restrictions
///
/// An empty selection means "no restriction" for that criterion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterState {
    airlines: BTreeSet<String>,
    aircraft: BTreeSet<String>,
    include_codeshares: bool,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl FilterState {
    /// Unrestricted filter: every route matches
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_airlines<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.airlines = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aircraft<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aircraft = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_codeshares(mut self, include_codeshares: bool) -> Self {
        self.include_codeshares = include_codeshares;
        self
    }

    /// New state with `code` added to or removed from the airline selection
    pub fn toggle_airline(&self, code: &str) -> Self {
        let mut next = self.clone();
        if !next.airlines.remove(code) {
            next.airlines.insert(code.to_string());
        }
        next
    }

    /// New state with `code` added to or removed from the aircraft selection
    pub fn toggle_aircraft(&self, code: &str) -> Self {
        let mut next = self.clone();
        if !next.aircraft.remove(code) {
            next.aircraft.insert(code.to_string());
        }
        next
    }

    #[inline]
    pub fn airlines(&self) -> &BTreeSet<String> {
        &self.airlines
    }

    #[inline]
    pub fn aircraft(&self) -> &BTreeSet<String> {
        &self.aircraft
    }

    #[inline]
    pub fn include_codeshares(&self) -> bool {
        self.include_codeshares
    }

    /// True when neither airlines nor aircraft are restricted
    #[inline]
    pub fn is_unrestricted(&self) -> bool {
        self.airlines.is_empty() && self.aircraft.is_empty()
    }

    /// Whether `route` passes both the airline and the aircraft criterion
    #[inline]
    pub fn matches(&self, route: &Route) -> bool {
        self.matches_airline(route) && self.matches_aircraft(route)
    }

    /// Operators always count; codeshares only add matches when enabled
    fn matches_airline(&self, route: &Route) -> bool {
        if self.airlines.is_empty() {
            return true;
        }
        let selected = |code: &String| self.airlines.contains(code);
        route.operators().iter().any(selected)
            || (self.include_codeshares && route.codeshares().iter().any(selected))
    }

    fn matches_aircraft(&self, route: &Route) -> bool {
        self.aircraft.is_empty()
            || route
                .aircraft()
                .iter()
                .any(|code| self.aircraft.contains(code))
    }
}
