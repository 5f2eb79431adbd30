//! Geographic primitives used by the signal map widget: points in latitude and longitude
//! ([`GeoPoint`], [`GeoPoint2d`]), rectangular viewports ([`GeoRect`]) and great-circle distances
//! between them.

// Lets the `latlon!` macro resolve inside this crate too.
extern crate self as signalmap_types;

pub mod error;
mod geo_point;
mod geo_rect;

pub use error::SignalMapTypesError;
pub use geo_point::{GeoPoint, GeoPoint2d, NewGeoPoint, EARTH_MEAN_RADIUS};
pub use geo_rect::GeoRect;
