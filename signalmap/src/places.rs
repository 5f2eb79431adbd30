//! Place search adapter.
//!
//! Free text search is delegated to an external places service. The adapter only keeps the single
//! marker of the most recent result and frames the map around it.

use async_trait::async_trait;
use maybe_sync::{MaybeSend, MaybeSync};
use serde::{Deserialize, Serialize};
use signalmap_types::{GeoPoint2d, GeoRect};

use crate::display::{MapDisplay, MarkerHandle, PinStyle};
use crate::error::SignalMapError;

/// Text query sent to a [`PlacesSearch`] service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceQuery {
    /// What the user typed.
    pub text: String,
    /// Region results should preferably come from, usually the current map view.
    pub bias: Option<GeoRect>,
    /// Country code results are restricted to.
    pub region: String,
}

/// A place found by a [`PlacesSearch`] service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Display name of the place.
    pub name: String,
    /// Representative point of the place.
    pub position: GeoPoint2d,
    /// Region the place covers, if it is more than a point.
    pub viewport: Option<GeoRect>,
}

/// External text-to-location search.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PlacesSearch: MaybeSend + MaybeSync {
    /// Runs the query. An empty vector means nothing was found, which is not an error.
    async fn search(&self, query: &PlaceQuery) -> Result<Vec<PlaceResult>, SignalMapError>;
}

/// How the map was framed around a search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Framing {
    /// Map was fitted to the result's viewport.
    Viewport(GeoRect),
    /// Map was centered on the result's point with a fixed zoom.
    Point {
        /// New center.
        center: GeoPoint2d,
        /// New zoom level.
        zoom: f64,
    },
}

/// Outcome of applying a set of search results.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    /// Nothing was found. The map is left untouched.
    NoResults,
    /// The first result is now highlighted.
    Highlighted {
        /// Marker of the result.
        marker: MarkerHandle,
        /// How the map was moved.
        framing: Framing,
    },
}

/// The highlight marker of the last place search and the search bias region.
#[derive(Debug, Default)]
pub struct PlaceHighlight {
    marker: Option<MarkerHandle>,
    result: Option<PlaceResult>,
    bias: Option<GeoRect>,
}

impl PlaceHighlight {
    /// Marker of the current result.
    pub fn marker(&self) -> Option<MarkerHandle> {
        self.marker
    }

    /// The currently highlighted result.
    pub fn result(&self) -> Option<&PlaceResult> {
        self.result.as_ref()
    }

    /// Region future searches are biased towards.
    pub fn bias(&self) -> Option<GeoRect> {
        self.bias
    }

    /// Updates the bias region, normally on every change of the map view bounds.
    pub fn set_bias(&mut self, bias: GeoRect) {
        self.bias = Some(bias);
    }

    /// Highlights the first of the `results`.
    ///
    /// The previous highlight marker is removed before the new one is created. The map is fitted
    /// to the result's viewport if it has one, otherwise centered on its point at `fallback_zoom`.
    /// Empty `results` change nothing.
    pub fn apply(
        &mut self,
        results: &[PlaceResult],
        map: &mut dyn MapDisplay,
        fallback_zoom: f64,
    ) -> PlaceOutcome {
        let Some(place) = results.first() else {
            log::debug!("Place search returned no results");
            return PlaceOutcome::NoResults;
        };

        self.clear(map);

        let marker = map.add_point_feature(place.position, &PinStyle::search_result(), &place.name);
        let framing = match place.viewport {
            Some(viewport) => {
                map.fit_viewport(viewport);
                Framing::Viewport(viewport)
            }
            None => {
                map.set_center(place.position);
                map.set_zoom(fallback_zoom);
                Framing::Point {
                    center: place.position,
                    zoom: fallback_zoom,
                }
            }
        };

        log::info!("Highlighted place {:?}", place.name);
        self.marker = Some(marker);
        self.result = Some(place.clone());

        PlaceOutcome::Highlighted { marker, framing }
    }

    /// Removes the highlight marker. Returns false if there was none.
    pub fn clear(&mut self, map: &mut dyn MapDisplay) -> bool {
        self.result = None;
        match self.marker.take() {
            Some(marker) => {
                map.remove_feature(marker);
                true
            }
            None => false,
        }
    }
}
