//! Bindings to the page-side object that draws the widget.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use signalmap::display::{
    ControlPanel, DetailContent, DetailSurface, ListDisplay, MapDisplay, MarkerHandle, PinStyle,
    RowHandle,
};
use signalmap::geolocation::{Geolocation, GeolocationError};
use signalmap::places::{PlaceQuery, PlaceResult, PlacesSearch};
use signalmap::SignalMapError;
use signalmap_types::{GeoPoint2d, GeoRect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    /// Page object that owns the actual map, list and input controls.
    ///
    /// Markers and rows are identified by numeric ids assigned by the widget. Positions are passed
    /// as `{lat, lng}` objects and bounds as `{south, west, north, east}`.
    ///
    /// `currentPosition()` must return a promise resolving to a position. On failure it rejects
    /// with `{code, message}`, where code `1` means permission was denied and code `0` means the
    /// browser has no geolocation support. `searchPlaces(query)` resolves to an array of
    /// `{name, position, viewport}` objects.
    pub type WidgetHost;

    #[wasm_bindgen(method, js_name = initMap)]
    fn init_map(this: &WidgetHost, center: JsValue, zoom: f64, style_id: &str);
    #[wasm_bindgen(method, js_name = addMarker)]
    fn add_marker(this: &WidgetHost, id: f64, position: JsValue, style: JsValue, title: &str);
    #[wasm_bindgen(method, js_name = removeMarker)]
    fn remove_marker(this: &WidgetHost, id: f64);
    #[wasm_bindgen(method, js_name = setMarkerVisible)]
    fn set_marker_visible(this: &WidgetHost, id: f64, visible: bool);
    #[wasm_bindgen(method, js_name = panTo)]
    fn pan_to(this: &WidgetHost, position: JsValue);
    #[wasm_bindgen(method, js_name = setCenter)]
    fn set_center(this: &WidgetHost, position: JsValue);
    #[wasm_bindgen(method, js_name = setZoom)]
    fn set_zoom(this: &WidgetHost, zoom: f64);
    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &WidgetHost, bounds: JsValue);

    #[wasm_bindgen(method, js_name = addRow)]
    fn add_row(this: &WidgetHost, id: f64, text: &str);
    #[wasm_bindgen(method, js_name = setRowVisible)]
    fn set_row_visible(this: &WidgetHost, id: f64, visible: bool);
    #[wasm_bindgen(method, js_name = setRowActive)]
    fn set_row_active(this: &WidgetHost, id: f64, active: bool);

    #[wasm_bindgen(method, js_name = openDetail)]
    fn open_detail(this: &WidgetHost, marker: f64, content: JsValue);

    #[wasm_bindgen(method)]
    fn notify(this: &WidgetHost, message: &str);
    #[wasm_bindgen(method, js_name = setFilterText)]
    fn set_filter_text(this: &WidgetHost, text: &str);
    #[wasm_bindgen(method, js_name = setPlaceQuery)]
    fn set_place_query(this: &WidgetHost, text: &str);

    #[wasm_bindgen(method, js_name = currentPosition)]
    fn current_position(this: &WidgetHost) -> js_sys::Promise;
    #[wasm_bindgen(method, js_name = searchPlaces)]
    fn search_places(this: &WidgetHost, query: JsValue) -> js_sys::Promise;
}

fn to_js(value: &impl Serialize) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|err| {
        log::error!("Failed to pass value to the page: {err}");
        JsValue::NULL
    })
}

/// Display collaborators that forward every call to the [`WidgetHost`].
#[derive(Clone)]
pub struct HostDisplay {
    host: Rc<WidgetHost>,
    next_id: Rc<Cell<u64>>,
}

impl HostDisplay {
    /// Creates the collaborators over the host.
    pub fn new(host: Rc<WidgetHost>) -> Self {
        Self {
            host,
            next_id: Rc::new(Cell::new(0)),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl MapDisplay for HostDisplay {
    fn initialize(&mut self, center: GeoPoint2d, zoom: f64, style_id: &str) {
        self.host.init_map(to_js(&center), zoom, style_id);
    }

    fn add_point_feature(
        &mut self,
        position: GeoPoint2d,
        style: &PinStyle,
        title: &str,
    ) -> MarkerHandle {
        let id = self.next_id();
        self.host
            .add_marker(id as f64, to_js(&position), to_js(style), title);
        MarkerHandle(id)
    }

    fn remove_feature(&mut self, handle: MarkerHandle) {
        self.host.remove_marker(handle.0 as f64);
    }

    fn set_feature_visible(&mut self, handle: MarkerHandle, visible: bool) {
        self.host.set_marker_visible(handle.0 as f64, visible);
    }

    fn pan_to(&mut self, position: GeoPoint2d) {
        self.host.pan_to(to_js(&position));
    }

    fn set_center(&mut self, position: GeoPoint2d) {
        self.host.set_center(to_js(&position));
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.host.set_zoom(zoom);
    }

    fn fit_viewport(&mut self, bounds: GeoRect) {
        self.host.fit_bounds(to_js(&bounds));
    }
}

impl ListDisplay for HostDisplay {
    fn add_row(&mut self, text: &str) -> RowHandle {
        let id = self.next_id();
        self.host.add_row(id as f64, text);
        RowHandle(id)
    }

    fn set_row_visible(&mut self, handle: RowHandle, visible: bool) {
        self.host.set_row_visible(handle.0 as f64, visible);
    }

    fn set_row_active(&mut self, handle: RowHandle, active: bool) {
        self.host.set_row_active(handle.0 as f64, active);
    }
}

impl DetailSurface for HostDisplay {
    fn open(&mut self, marker: MarkerHandle, content: DetailContent) {
        self.host.open_detail(marker.0 as f64, to_js(&content));
    }
}

impl ControlPanel for HostDisplay {
    fn notify(&mut self, message: &str) {
        self.host.notify(message);
    }

    fn set_filter_text(&mut self, text: &str) {
        self.host.set_filter_text(text);
    }

    fn set_place_query(&mut self, text: &str) {
        self.host.set_place_query(text);
    }
}

#[derive(Debug, Deserialize)]
struct HostPositionError {
    code: u16,
    #[serde(default)]
    message: String,
}

fn position_error(value: JsValue) -> GeolocationError {
    match serde_wasm_bindgen::from_value::<HostPositionError>(value) {
        Ok(HostPositionError { code: 0, .. }) => GeolocationError::Unsupported,
        Ok(HostPositionError { code: 1, .. }) => GeolocationError::PermissionDenied,
        Ok(HostPositionError { message, .. }) => GeolocationError::Unavailable(message),
        Err(err) => GeolocationError::Unavailable(err.to_string()),
    }
}

/// External services provided by the [`WidgetHost`].
#[derive(Clone)]
pub struct HostServices {
    host: Rc<WidgetHost>,
}

impl HostServices {
    /// Creates the services over the host.
    pub fn new(host: Rc<WidgetHost>) -> Self {
        Self { host }
    }
}

#[async_trait(?Send)]
impl Geolocation for HostServices {
    async fn current_position(&self) -> Result<GeoPoint2d, GeolocationError> {
        let value = JsFuture::from(self.host.current_position())
            .await
            .map_err(position_error)?;

        serde_wasm_bindgen::from_value(value)
            .map_err(|err| GeolocationError::Unavailable(err.to_string()))
    }
}

#[async_trait(?Send)]
impl PlacesSearch for HostServices {
    async fn search(&self, query: &PlaceQuery) -> Result<Vec<PlaceResult>, SignalMapError> {
        let query = serde_wasm_bindgen::to_value(query)
            .map_err(|err| SignalMapError::Generic(err.to_string()))?;
        let value = JsFuture::from(self.host.search_places(query)).await?;

        serde_wasm_bindgen::from_value(value)
            .map_err(|err| SignalMapError::Generic(err.to_string()))
    }
}
