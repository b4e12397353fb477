//! Airport, airline and route records
//!
//! These are immutable once loaded. Field names follow the records written by
//! the ingestion step (`iata`, `icao`, `lat`, `lon`, `type`, ...), so with the
//! `serde` feature they deserialize straight from its JSON output.

use crate::{DataError, Result, geo_math::GeoPoint};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Most routes are flown by a handful of airlines with a handful of types
pub type CodeList = SmallVec<[String; 4]>;

/// An airport with scheduled service
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airport {
    iata: String,
    #[cfg_attr(feature = "serde", serde(default))]
    icao: Option<String>,
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    city: String,
    #[cfg_attr(feature = "serde", serde(default))]
    country: String,
    lat: f64,
    lon: f64,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    category: String,
}

impl Airport {
    /// Create an airport, rejecting coordinates that cannot be drawn
    pub fn new(
        iata: impl Into<String>,
        name: impl Into<String>,
        location: GeoPoint,
    ) -> Result<Self> {
        let airport = Self {
            iata: iata.into(),
            icao: None,
            name: name.into(),
            city: String::new(),
            country: String::new(),
            lat: location.lat,
            lon: location.lon,
            category: String::new(),
        };
        airport.validate()?;
        Ok(airport)
    }

    pub fn with_icao(mut self, icao: impl Into<String>) -> Self {
        self.icao = Some(icao.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Check the code and coordinate of a (possibly deserialized) record
    pub fn validate(&self) -> Result<()> {
        if self.iata.trim().is_empty() {
            return Err(DataError::InvalidAirport {
                code: self.iata.clone(),
                reason: "empty IATA code".to_string(),
            });
        }
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(DataError::InvalidAirport {
                code: self.iata.clone(),
                reason: format!("latitude {} out of range", self.lat),
            });
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(DataError::InvalidAirport {
                code: self.iata.clone(),
                reason: format!("longitude {} out of range", self.lon),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn iata(&self) -> &str {
        &self.iata
    }

    #[inline]
    pub fn icao(&self) -> Option<&str> {
        self.icao.as_deref()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[inline]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Airport category tag, e.g. `large_airport`
    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// An active airline
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airline {
    iata: String,
    #[cfg_attr(feature = "serde", serde(default))]
    icao: Option<String>,
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    country: String,
}

impl Airline {
    pub fn new(iata: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iata: iata.into(),
            icao: None,
            name: name.into(),
            country: String::new(),
        }
    }

    pub fn with_icao(mut self, icao: impl Into<String>) -> Self {
        self.icao = Some(icao.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    #[inline]
    pub fn iata(&self) -> &str {
        &self.iata
    }

    #[inline]
    pub fn icao(&self) -> Option<&str> {
        self.icao.as_deref()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn country(&self) -> &str {
        &self.country
    }
}

/// A direct (origin, destination) route
///
/// `operators` fly the route, `codeshares` only market it. The code lists keep
/// their input order; the first operator is used as the default color source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    origin: String,
    destination: String,
    #[cfg_attr(feature = "serde", serde(default))]
    operators: CodeList,
    #[cfg_attr(feature = "serde", serde(default))]
    codeshares: CodeList,
    #[cfg_attr(feature = "serde", serde(default))]
    aircraft: CodeList,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            operators: CodeList::new(),
            codeshares: CodeList::new(),
            aircraft: CodeList::new(),
        }
    }

    pub fn with_operators<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators = unique_codes(codes);
        self
    }

    pub fn with_codeshares<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codeshares = unique_codes(codes);
        self
    }

    pub fn with_aircraft<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aircraft = unique_codes(codes);
        self
    }

    /// Drop repeated codes, keeping first occurrences
    ///
    /// Returns true if anything was removed.
    pub(crate) fn dedup_codes(&mut self) -> bool {
        let before = self.operators.len() + self.codeshares.len() + self.aircraft.len();
        self.operators = unique_codes(std::mem::take(&mut self.operators));
        self.codeshares = unique_codes(std::mem::take(&mut self.codeshares));
        self.aircraft = unique_codes(std::mem::take(&mut self.aircraft));
        before != self.operators.len() + self.codeshares.len() + self.aircraft.len()
    }

    #[inline]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[inline]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    #[inline]
    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    #[inline]
    pub fn codeshares(&self) -> &[String] {
        &self.codeshares
    }

    #[inline]
    pub fn aircraft(&self) -> &[String] {
        &self.aircraft
    }
}

fn unique_codes<I, S>(codes: I) -> CodeList
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = CodeList::new();
    for code in codes {
        let code = code.into();
        if !out.contains(&code) {
            out.push(code);
        }
    }
    out
}
