use geo::HaversineDistance;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::SignalMapTypesError;

/// Mean earth radius in meters used by the great-circle distance.
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

/// Point on the surface of the earth given by latitude and longitude in degrees.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }

    /// Great-circle distance to the `other` point in meters.
    ///
    /// The distance is symmetric and grows monotonically with the angular separation of the points.
    /// Coordinates that cannot be represented as `f64` give `NaN`.
    fn distance_to(&self, other: &impl GeoPoint) -> f64 {
        let this = geo::Point::new(as_f64(self.lon()), as_f64(self.lat()));
        let other = geo::Point::new(as_f64(other.lon()), as_f64(other.lat()));

        this.haversine_distance(&other)
    }
}

fn as_f64<N: Float>(value: N) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Geo point that can be constructed from its coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude.
    fn latlon(lat: N, lon: N) -> Self;
    /// Creates a point from longitude and latitude.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

/// 2d point on the surface of the earth.
///
/// Serializes as `{"lat": .., "lng": ..}`, which is the shape the location datasets and the web map
/// services use.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    #[serde(rename = "lng", alias = "lon")]
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a new point from another one.
    pub fn from(other: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            lat: other.lat(),
            lon: other.lon(),
        }
    }

    /// Checks that both coordinates are finite and lie within `[-90, 90]` and `[-180, 180]`.
    pub fn validate(&self) -> Result<(), SignalMapTypesError> {
        let valid = self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon);

        if valid {
            Ok(())
        } else {
            Err(SignalMapTypesError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use signalmap_types::GeoPoint;
/// use signalmap_types::latlon;
///
/// let point = latlon!(2.19, 102.25);
/// assert_eq!(point.lat(), 2.19);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <::signalmap_types::GeoPoint2d as ::signalmap_types::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    #[test]
    fn distance_along_equator() {
        let origin = latlon!(0.0, 0.0);
        let one_degree = latlon!(0.0, 1.0);

        // One degree of arc on the mean sphere.
        let expected = EARTH_MEAN_RADIUS * 1f64.to_radians();
        assert_relative_eq!(origin.distance_to(&one_degree), expected, epsilon = 1e-3);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = latlon!(2.1896, 102.2501);
        let b = latlon!(2.3, 102.3);

        assert_relative_eq!(a.distance_to(&b), b.distance_to(&a), epsilon = 1e-9);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn distance_is_monotonic() {
        let origin = latlon!(0.0, 0.0);
        let near = latlon!(0.0, 1.0);
        let far = latlon!(0.0, 2.0);
        let diagonal = latlon!(1.0, 1.0);

        assert!(origin.distance_to(&near) < origin.distance_to(&far));
        assert!(origin.distance_to(&near) < origin.distance_to(&diagonal));
    }

    #[test]
    fn deserializes_lat_lng_object() {
        let point: GeoPoint2d =
            serde_json::from_str(r#"{"lat": 2.25, "lng": 102.1}"#).expect("invalid json");
        assert_eq!(point, latlon!(2.25, 102.1));

        let serialized = serde_json::to_string(&point).expect("serialization failed");
        assert_eq!(serialized, r#"{"lat":2.25,"lng":102.1}"#);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(latlon!(90.0, -180.0).validate().is_ok());
        assert_matches!(
            latlon!(91.0, 0.0).validate(),
            Err(SignalMapTypesError::InvalidCoordinate { .. })
        );
        assert_matches!(
            latlon!(0.0, f64::NAN).validate(),
            Err(SignalMapTypesError::InvalidCoordinate { .. })
        );
    }
}
