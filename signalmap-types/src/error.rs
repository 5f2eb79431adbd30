//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum SignalMapTypesError {
    /// Coordinate is not a finite value or is out of the valid degree range.
    #[error("invalid coordinate: lat {lat}, lng {lon}")]
    InvalidCoordinate {
        /// Latitude as given.
        lat: f64,
        /// Longitude as given.
        lon: f64,
    },
}
