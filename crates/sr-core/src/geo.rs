//! Geographic coordinate type and canonical key codec.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Node identity in the routing
//! table is the *exact* canonical key `"lat,lon"` — two coordinates are the
//! same node iff their keys match — so a coordinate must survive a
//! format → parse round trip bit-exactly.  `f64`'s `Display` prints the
//! shortest decimal that round-trips, which gives us that for free.

use crate::error::CoreError;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres (mean Earth radius
    /// 6371 km).
    ///
    /// Symmetric up to floating-point rounding; exactly zero for equal
    /// points.  Non-finite inputs propagate as non-finite output.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        const R_KM: f64 = 6371.0;

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R_KM * c
    }

    /// Haversine distance in metres.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        self.distance_km(other) * 1000.0
    }

    /// Canonical `"lat,lon"` key used for node identity and as the map key
    /// in the persisted routing-table format.
    pub fn key(self) -> String {
        format!("{},{}", self.lat, self.lon)
    }

    /// Parse a canonical `"lat,lon"` key.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidCoordinate`] unless the key is two
    /// comma-separated finite floats.
    pub fn parse_key(key: &str) -> Result<GeoPoint, CoreError> {
        let bad = || CoreError::InvalidCoordinate(key.to_string());
        let (lat, lon) = key.split_once(',').ok_or_else(bad)?;
        let lat: f64 = lat.trim().parse().map_err(|_| bad())?;
        let lon: f64 = lon.trim().parse().map_err(|_| bad())?;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(bad());
        }
        Ok(GeoPoint::new(lat, lon))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}
