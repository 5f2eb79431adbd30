//! Locating the user and marking their position on the map.

use async_trait::async_trait;
use maybe_sync::{MaybeSend, MaybeSync};
use signalmap_types::GeoPoint2d;
use thiserror::Error;

use crate::display::{MapDisplay, MarkerHandle, PinStyle};

/// Why a geolocation lookup failed. All variants are reported to the user the same way.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user refused to share the position.
    #[error("permission denied")]
    PermissionDenied,
    /// The platform has no geolocation capability.
    #[error("geolocation is not supported")]
    Unsupported,
    /// The service could not provide a position, e.g. on timeout.
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

impl GeolocationError {
    /// Message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Error: Your browser doesn't support geolocation.",
            GeolocationError::PermissionDenied | GeolocationError::Unavailable(_) => {
                "Error: The Geolocation service failed or you denied permission."
            }
        }
    }
}

/// One-shot position lookup.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Geolocation: MaybeSend + MaybeSync {
    /// Returns the current position of the user. Implementations make a single attempt.
    async fn current_position(&self) -> Result<GeoPoint2d, GeolocationError>;
}

/// Marker of the user's position on the map.
#[derive(Debug, Default)]
pub struct UserLocation {
    marker: Option<MarkerHandle>,
    position: Option<GeoPoint2d>,
}

impl UserLocation {
    /// Marker of the last known position.
    pub fn marker(&self) -> Option<MarkerHandle> {
        self.marker
    }

    /// Last known position.
    pub fn position(&self) -> Option<GeoPoint2d> {
        self.position
    }

    /// Moves the marker to `position` and brings the map there.
    ///
    /// The old marker is removed before the new one is added.
    pub fn place(
        &mut self,
        position: GeoPoint2d,
        map: &mut dyn MapDisplay,
        zoom: f64,
    ) -> MarkerHandle {
        if let Some(old) = self.marker.take() {
            map.remove_feature(old);
        }

        let marker = map.add_point_feature(position, &PinStyle::user_location(), "Your Location");
        map.pan_to(position);
        map.set_zoom(zoom);

        self.marker = Some(marker);
        self.position = Some(position);

        marker
    }
}
