//! Coordinates and great-circle distance.
//!
//! The default formula is the spherical law of cosines applied to the
//! right spherical triangle formed by the latitude and longitude deltas:
//!
//! `d = R * acos(cos(Δlat) * cos(Δlon))`
//!
//! This treats the angle between the two legs as a right angle and ignores
//! the absolute latitude of either point, so it overestimates east-west
//! separation away from the equator. It is kept as the default because the
//! per-day figures it produces are the ones existing reports were built on.
//! [`DistanceFormula::Haversine`] solves the full triangle for callers that
//! need true great-circle distance.
//!
//! The deltas are taken between signed coordinates. Older versions of these
//! reports folded each latitude and longitude to its absolute value before
//! subtracting, which puts a point and its mirror image across the equator
//! or the prime meridian at distance zero; that step is not applied here.

use serde::{Deserialize, Serialize};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// Scale factor of fixed-point E7 coordinates.
pub const E7_SCALE: f64 = 10_000_000.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate from decimal degrees.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Decode a fixed-point coordinate (degrees × 10^7).
    pub fn from_e7(lat_e7: i64, lon_e7: i64) -> Self {
        Self {
            lat: lat_e7 as f64 / E7_SCALE,
            lon: lon_e7 as f64 / E7_SCALE,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// Formula used to turn two coordinates into meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DistanceFormula {
    /// Spherical law of cosines on the coordinate deltas (approximation).
    #[default]
    Cosine,
    /// Haversine great-circle distance.
    Haversine,
}

impl DistanceFormula {
    /// Returns the formula name as used in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Haversine => "haversine",
        }
    }

    /// Distance in meters between `a` and `b`.
    pub fn distance(self, a: Coordinate, b: Coordinate) -> f64 {
        match self {
            Self::Cosine => law_of_cosines(a, b),
            Self::Haversine => haversine(a, b),
        }
    }
}

impl std::fmt::Display for DistanceFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approximate distance in meters using the spherical law of cosines.
///
/// Symmetric in its arguments (cosine is even) and zero for identical
/// points. The product of cosines is clamped to `[-1, 1]` so rounding can
/// never push `acos` out of its domain.
pub fn law_of_cosines(a: Coordinate, b: Coordinate) -> f64 {
    let lat_diff = (b.lat - a.lat).to_radians();
    let lon_diff = (b.lon - a.lon).to_radians();
    let cos = (lat_diff.cos() * lon_diff.cos()).clamp(-1.0, 1.0);
    cos.acos() * EARTH_RADIUS_M
}

/// Great-circle distance in meters using the haversine formula.
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (b.lon - a.lon).to_radians() / 2.0;

    let h = (lat1.cos() * lat2.cos())
        .mul_add(half_dlon.sin().powi(2), half_dlat.sin().powi(2))
        .clamp(0.0, 1.0);
    2.0 * h.sqrt().asin() * EARTH_RADIUS_M
}
