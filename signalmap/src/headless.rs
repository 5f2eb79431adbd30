//! In-memory collaborators that record what the widget asks them to do.
//!
//! Useful for tests and for running the widget without any UI. [`HeadlessUi`] implements all the
//! display traits over one shared state, so a clone kept outside of the widget can be used to
//! inspect the result:
//!
//! ```
//! use signalmap::headless::HeadlessUi;
//! use signalmap::SignalMapBuilder;
//!
//! let ui = HeadlessUi::new();
//! let builder = SignalMapBuilder::new().with_headless(&ui);
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};
use signalmap_types::{GeoPoint2d, GeoRect};

use crate::display::{
    ControlPanel, DetailContent, DetailSurface, ListDisplay, MapDisplay, MarkerHandle, PinStyle,
    RowHandle,
};
use crate::error::SignalMapError;
use crate::geolocation::{Geolocation, GeolocationError};
use crate::places::{PlaceQuery, PlaceResult, PlacesSearch};

/// A feature added to the headless map.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessFeature {
    /// Position of the feature.
    pub position: GeoPoint2d,
    /// Style it was added with.
    pub style: PinStyle,
    /// Title it was added with.
    pub title: String,
    /// Current visibility.
    pub visible: bool,
    /// Set once the feature is removed.
    pub removed: bool,
}

/// A row added to the headless list.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessRow {
    /// Row text.
    pub text: String,
    /// Current visibility.
    pub visible: bool,
    /// Current highlight.
    pub active: bool,
}

/// Everything the headless collaborators have been told.
#[derive(Debug, Default)]
pub struct HeadlessState {
    /// Arguments of [`MapDisplay::initialize`], if it was called.
    pub initialized: Option<(GeoPoint2d, f64, String)>,
    /// Features in the order they were added. A feature's handle is its index.
    pub features: Vec<HeadlessFeature>,
    /// Current view center.
    pub center: Option<GeoPoint2d>,
    /// Current zoom.
    pub zoom: Option<f64>,
    /// Last viewport the map was fitted to.
    pub viewport: Option<GeoRect>,
    /// Positions the map was panned to.
    pub pans: Vec<GeoPoint2d>,
    /// Number of visibility changes requested for features and rows.
    pub visibility_updates: usize,
    /// Rows in the order they were added. A row's handle is its index.
    pub rows: Vec<HeadlessRow>,
    /// Every detail surface opening.
    pub details: Vec<(MarkerHandle, DetailContent)>,
    /// Every user-visible notification.
    pub notifications: Vec<String>,
    /// Content of the filter input.
    pub filter_text: String,
    /// Content of the place search input.
    pub place_query: String,
}

/// Shared in-memory implementation of all display collaborators.
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessUi {
    /// Creates an empty UI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the recorded state.
    pub fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock()
    }

    /// Feature with the given handle.
    pub fn feature(&self, handle: MarkerHandle) -> Option<HeadlessFeature> {
        self.state.lock().features.get(handle.0 as usize).cloned()
    }

    /// Features that have not been removed.
    pub fn live_features(&self) -> Vec<HeadlessFeature> {
        self.state
            .lock()
            .features
            .iter()
            .filter(|f| !f.removed)
            .cloned()
            .collect()
    }

    /// Titles of the features currently shown on the map.
    pub fn visible_titles(&self) -> Vec<String> {
        self.state
            .lock()
            .features
            .iter()
            .filter(|f| f.visible && !f.removed)
            .map(|f| f.title.clone())
            .collect()
    }

    /// Texts of the rows currently shown in the list.
    pub fn visible_rows(&self) -> Vec<String> {
        self.state
            .lock()
            .rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.text.clone())
            .collect()
    }

    /// Texts of the highlighted rows.
    pub fn active_rows(&self) -> Vec<String> {
        self.state
            .lock()
            .rows
            .iter()
            .filter(|row| row.active)
            .map(|row| row.text.clone())
            .collect()
    }

    /// Notifications shown so far.
    pub fn notifications(&self) -> Vec<String> {
        self.state.lock().notifications.clone()
    }

    /// Detail surface openings so far.
    pub fn details(&self) -> Vec<(MarkerHandle, DetailContent)> {
        self.state.lock().details.clone()
    }
}

impl MapDisplay for HeadlessUi {
    fn initialize(&mut self, center: GeoPoint2d, zoom: f64, style_id: &str) {
        let mut state = self.state.lock();
        state.initialized = Some((center, zoom, style_id.to_string()));
        state.center = Some(center);
        state.zoom = Some(zoom);
    }

    fn add_point_feature(
        &mut self,
        position: GeoPoint2d,
        style: &PinStyle,
        title: &str,
    ) -> MarkerHandle {
        let mut state = self.state.lock();
        state.features.push(HeadlessFeature {
            position,
            style: *style,
            title: title.to_string(),
            visible: true,
            removed: false,
        });

        MarkerHandle(state.features.len() as u64 - 1)
    }

    fn remove_feature(&mut self, handle: MarkerHandle) {
        if let Some(feature) = self.state.lock().features.get_mut(handle.0 as usize) {
            feature.removed = true;
        }
    }

    fn set_feature_visible(&mut self, handle: MarkerHandle, visible: bool) {
        let mut state = self.state.lock();
        state.visibility_updates += 1;
        if let Some(feature) = state.features.get_mut(handle.0 as usize) {
            feature.visible = visible;
        }
    }

    fn pan_to(&mut self, position: GeoPoint2d) {
        let mut state = self.state.lock();
        state.pans.push(position);
        state.center = Some(position);
    }

    fn set_center(&mut self, position: GeoPoint2d) {
        self.state.lock().center = Some(position);
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.state.lock().zoom = Some(zoom);
    }

    fn fit_viewport(&mut self, bounds: GeoRect) {
        let mut state = self.state.lock();
        state.viewport = Some(bounds);
        state.center = Some(bounds.center());
    }
}

impl ListDisplay for HeadlessUi {
    fn add_row(&mut self, text: &str) -> RowHandle {
        let mut state = self.state.lock();
        state.rows.push(HeadlessRow {
            text: text.to_string(),
            visible: true,
            active: false,
        });

        RowHandle(state.rows.len() as u64 - 1)
    }

    fn set_row_visible(&mut self, handle: RowHandle, visible: bool) {
        let mut state = self.state.lock();
        state.visibility_updates += 1;
        if let Some(row) = state.rows.get_mut(handle.0 as usize) {
            row.visible = visible;
        }
    }

    fn set_row_active(&mut self, handle: RowHandle, active: bool) {
        if let Some(row) = self.state.lock().rows.get_mut(handle.0 as usize) {
            row.active = active;
        }
    }
}

impl DetailSurface for HeadlessUi {
    fn open(&mut self, marker: MarkerHandle, content: DetailContent) {
        self.state.lock().details.push((marker, content));
    }
}

impl ControlPanel for HeadlessUi {
    fn notify(&mut self, message: &str) {
        log::info!("Notification: {message}");
        self.state.lock().notifications.push(message.to_string());
    }

    fn set_filter_text(&mut self, text: &str) {
        self.state.lock().filter_text = text.to_string();
    }

    fn set_place_query(&mut self, text: &str) {
        self.state.lock().place_query = text.to_string();
    }
}

/// Geolocation that always answers with the same result.
#[derive(Debug, Clone)]
pub struct FixedGeolocation(pub Result<GeoPoint2d, GeolocationError>);

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Geolocation for FixedGeolocation {
    async fn current_position(&self) -> Result<GeoPoint2d, GeolocationError> {
        self.0.clone()
    }
}

/// Places search over a fixed list of places.
///
/// A place matches if its name contains the query text, ignoring case. Matches inside the bias
/// region come first, otherwise the list order is kept.
#[derive(Debug, Clone, Default)]
pub struct GazetteerSearch {
    places: Vec<PlaceResult>,
}

impl GazetteerSearch {
    /// Creates a search over the given places.
    pub fn new(places: Vec<PlaceResult>) -> Self {
        Self { places }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PlacesSearch for GazetteerSearch {
    async fn search(&self, query: &PlaceQuery) -> Result<Vec<PlaceResult>, SignalMapError> {
        let text = query.text.trim().to_lowercase();
        if text.is_empty() {
            return Ok(vec![]);
        }

        let mut found: Vec<PlaceResult> = self
            .places
            .iter()
            .filter(|place| place.name.to_lowercase().contains(&text))
            .cloned()
            .collect();

        if let Some(bias) = query.bias {
            // Stable sort keeps the list order within both groups.
            found.sort_by_key(|place| !bias.contains(&place.position));
        }

        Ok(found)
    }
}
