//! Spherical geometry for drawing flight routes
//!
//! Great-circle interpolation between two airports and the longitude
//! unwrapping pass that keeps a sampled path continuous across the
//! antimeridian when it is drawn on a flat projection.

use geo::{Coord, LineString, Point};
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Interpolation steps used when exploring the routes of a single airport
pub const AIRPORT_PATH_STEPS: usize = 50;

/// Interpolation steps used when drawing a whole airline network
pub const NETWORK_PATH_STEPS: usize = 30;

/// Chord length of `a + b` below which two unit vectors count as antipodal
const ANTIPODAL_TOLERANCE: f64 = 1e-7;

/// A geographic coordinate in degrees
///
/// After [`unwrap_longitudes`] the longitude may leave the usual
/// `[-180, 180]` range (roughly `[-540, 540]` for a single route).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Unit vector on the sphere for this coordinate
    #[inline(always)]
    fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    /// Unit vector pointing north along the meridian of this coordinate
    #[inline(always)]
    fn north_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [-lat.sin() * lon.cos(), -lat.sin() * lon.sin(), lat.cos()]
    }

    #[inline(always)]
    fn from_unit_vector([x, y, z]: [f64; 3]) -> Self {
        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);
        Self::new(lat.to_degrees(), lon.to_degrees())
    }
}

impl From<GeoPoint> for Coord<f64> {
    #[inline]
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.lon,
            y: point.lat,
        }
    }
}

impl From<GeoPoint> for Point<f64> {
    #[inline]
    fn from(point: GeoPoint) -> Self {
        Point::new(point.lon, point.lat)
    }
}

#[inline(always)]
fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline(always)]
fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline(always)]
fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// Central angle between two coordinates in radians (haversine formula)
///
/// Always in `[0, PI]`, i.e. the angle of the minor arc.
#[inline]
pub fn central_angle(start: GeoPoint, end: GeoPoint) -> f64 {
    let lat1 = start.lat.to_radians();
    let lat2 = end.lat.to_radians();
    let delta_lat = (end.lat - start.lat).to_radians();
    let delta_lon = (end.lon - start.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push h slightly above 1 for antipodal points
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Great-circle distance in kilometers
#[inline]
pub fn great_circle_distance_km(start: GeoPoint, end: GeoPoint) -> f64 {
    EARTH_RADIUS_KM * central_angle(start, end)
}

/// Sample the great-circle arc from `start` to `end`
///
/// Returns `steps + 1` points, the first equal to `start` and the last equal
/// to `end`. Longitudes of the samples are wrapped to `(-180, 180]`; see
/// [`unwrap_longitudes`] before drawing. A `steps` of 0 is treated as 1.
pub fn interpolate_great_circle(start: GeoPoint, end: GeoPoint, steps: usize) -> Vec<GeoPoint> {
    let steps = steps.max(1);
    let a = start.to_unit_vector();
    let b = end.to_unit_vector();

    let sum = [a[0] + b[0], a[1] + b[1], a[2] + b[2]];
    let mut points = Vec::with_capacity(steps + 1);

    if norm(sum) < ANTIPODAL_TOLERANCE {
        // Every great circle through the start reaches the antipode, rotate
        // along the meridian of the start point.
        let north = start.north_vector();
        for i in 0..=steps {
            let angle = PI * i as f64 / steps as f64;
            let (sin, cos) = angle.sin_cos();
            points.push(GeoPoint::from_unit_vector([
                cos * a[0] + sin * north[0],
                cos * a[1] + sin * north[1],
                cos * a[2] + sin * north[2],
            ]));
        }
    } else {
        // atan2 stays accurate close to 0 and PI, unlike the haversine
        let d = norm(cross(a, b)).atan2(dot(a, b));
        if d == 0.0 {
            return vec![start; steps + 1];
        }
        let sin_d = d.sin();

        for i in 0..=steps {
            let f = i as f64 / steps as f64;
            let wa = ((1.0 - f) * d).sin() / sin_d;
            let wb = (f * d).sin() / sin_d;
            points.push(GeoPoint::from_unit_vector([
                wa * a[0] + wb * b[0],
                wa * a[1] + wb * b[1],
                wa * a[2] + wb * b[2],
            ]));
        }
    }

    // Longitude is undefined at the poles, pin the endpoints to the inputs.
    points[0] = start;
    points[steps] = end;
    points
}

/// Make a sampled path continuous in longitude
///
/// Shifts each longitude by a multiple of 360 degrees so that it lies within
/// 180 degrees of the previous (already shifted) one. Latitudes and the first
/// point are left untouched.
pub fn unwrap_longitudes(points: &mut [GeoPoint]) {
    for i in 1..points.len() {
        let prev = points[i - 1].lon;
        let mut lon = points[i].lon;
        if !prev.is_finite() || !lon.is_finite() {
            continue;
        }
        let delta = lon - prev;
        if !delta.is_finite() {
            continue;
        }
        if delta.abs() > 180.0 {
            lon = prev + (delta + 180.0).rem_euclid(360.0) - 180.0;
        }
        points[i].lon = lon;
    }
}

/// Interpolated and unwrapped path, ready to be drawn
pub fn great_circle_path(start: GeoPoint, end: GeoPoint, steps: usize) -> Vec<GeoPoint> {
    #[cfg(feature = "profiling")]
    profiling::scope!("geo_math::great_circle_path");

    let mut points = interpolate_great_circle(start, end, steps);
    unwrap_longitudes(&mut points);
    points
}

/// Convert a path into a `geo` line string (x = longitude, y = latitude)
pub fn to_line_string(points: &[GeoPoint]) -> LineString<f64> {
    points.iter().copied().map(Coord::from).collect()
}
