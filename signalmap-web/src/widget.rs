//! The widget handle exported to the page.

use std::rc::Rc;

use serde::Serialize;
use signalmap::display::{MarkerHandle, RowHandle};
use signalmap::places::PlaceOutcome;
use signalmap::record::{Category, IntersectionType};
use signalmap::{
    EventOutcome, LocateOutcome, SharedSignalMap, SignalMapBuilder, SignalMapError, UiEvent,
    WidgetConfig,
};
use signalmap_types::GeoRect;
use wasm_bindgen::prelude::*;

use crate::host::{HostDisplay, HostServices, WidgetHost};
use crate::ids::handle_id;

fn js_error(err: SignalMapError) -> JsValue {
    JsError::from(err).into()
}

/// Loads the dataset and shows the widget.
///
/// `config` may be `undefined` to use the default configuration.
#[wasm_bindgen]
pub async fn start(host: WidgetHost, config: JsValue) -> Result<SignalMapWidget, JsError> {
    console_error_panic_hook::set_once();
    // Fails if the page starts more than one widget, the first logger stays.
    let _ = console_log::init_with_level(log::Level::Info);

    let config: WidgetConfig = if config.is_undefined() || config.is_null() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    let host = Rc::new(host);
    let display = HostDisplay::new(host.clone());
    let widget = SignalMapBuilder::new()
        .with_config(config)
        .with_map_display(display.clone())
        .with_list_display(display.clone())
        .with_detail_surface(display.clone())
        .with_control_panel(display)
        .load_configured()
        .await?;

    Ok(SignalMapWidget {
        widget: widget.into_shared(),
        services: HostServices::new(host),
    })
}

/// Nearest light reported back to the page after a successful locate.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NearestLight {
    code: String,
    distance_km: f64,
}

/// Running widget.
#[wasm_bindgen]
pub struct SignalMapWidget {
    widget: SharedSignalMap,
    services: HostServices,
}

impl SignalMapWidget {
    fn dispatch(&self, event: UiEvent) -> Result<bool, JsError> {
        let outcome = self.widget.write().handle_event(event)?;
        Ok(outcome != EventOutcome::Ignored)
    }
}

#[wasm_bindgen]
impl SignalMapWidget {
    /// Number of lights that pass the current filters.
    #[wasm_bindgen(js_name = visibleCount)]
    pub fn visible_count(&self) -> usize {
        self.widget.read().catalog().visible_count()
    }

    /// Text filter input changed.
    #[wasm_bindgen(js_name = setSearchText)]
    pub fn set_search_text(&self, text: String) -> Result<(), JsError> {
        self.dispatch(UiEvent::SearchTextChanged(text))?;
        Ok(())
    }

    /// Category checkbox toggled. `value` is the checkbox value, e.g. `"Jasin"`.
    #[wasm_bindgen(js_name = toggleCategory)]
    pub fn toggle_category(&self, value: &str, checked: bool) -> Result<(), JsError> {
        let category: Category = value.parse()?;
        self.dispatch(UiEvent::CategoryToggled { category, checked })?;
        Ok(())
    }

    /// Intersection type checkbox toggled. `value` is the checkbox value, e.g. `"4-Way"`.
    #[wasm_bindgen(js_name = toggleIntersectionType)]
    pub fn toggle_intersection_type(&self, value: &str, checked: bool) -> Result<(), JsError> {
        let intersection_type: IntersectionType = value.parse()?;
        self.dispatch(UiEvent::IntersectionTypeToggled {
            intersection_type,
            checked,
        })?;
        Ok(())
    }

    /// "Clear" button of the text filter.
    #[wasm_bindgen(js_name = clearFilter)]
    pub fn clear_filter(&self) -> Result<(), JsError> {
        self.dispatch(UiEvent::ClearFilterClicked)?;
        Ok(())
    }

    /// "Clear" button of the place search.
    #[wasm_bindgen(js_name = clearSearch)]
    pub fn clear_search(&self) -> Result<(), JsError> {
        self.dispatch(UiEvent::ClearSearchClicked)?;
        Ok(())
    }

    /// A marker was clicked. Returns false if the marker is unknown to the widget.
    #[wasm_bindgen(js_name = markerClicked)]
    pub fn marker_clicked(&self, id: f64) -> Result<bool, JsError> {
        match handle_id(id) {
            Some(id) => self.dispatch(UiEvent::MarkerClicked(MarkerHandle(id))),
            None => Ok(false),
        }
    }

    /// A list row was clicked. Returns false if the row is unknown to the widget.
    #[wasm_bindgen(js_name = rowClicked)]
    pub fn row_clicked(&self, id: f64) -> Result<bool, JsError> {
        match handle_id(id) {
            Some(id) => self.dispatch(UiEvent::ListRowClicked(RowHandle(id))),
            None => Ok(false),
        }
    }

    /// The detail popup was closed by the user.
    #[wasm_bindgen(js_name = detailClosed)]
    pub fn detail_closed(&self) -> Result<(), JsError> {
        self.dispatch(UiEvent::DetailClosed)?;
        Ok(())
    }

    /// Visible map bounds changed. `bounds` is a `{south, west, north, east}` object.
    #[wasm_bindgen(js_name = boundsChanged)]
    pub fn bounds_changed(&self, bounds: JsValue) -> Result<(), JsError> {
        let bounds: GeoRect = serde_wasm_bindgen::from_value(bounds)?;
        self.dispatch(UiEvent::BoundsChanged(bounds))?;
        Ok(())
    }

    /// The page's own search box produced results.
    #[wasm_bindgen(js_name = placesChanged)]
    pub fn places_changed(&self, results: JsValue) -> Result<bool, JsError> {
        let results = serde_wasm_bindgen::from_value(results)?;
        let outcome = self.widget.write().handle_event(UiEvent::PlacesChanged(results))?;
        Ok(matches!(outcome, EventOutcome::Place(PlaceOutcome::Highlighted { .. })))
    }

    /// "Find me" button. Resolves to `{code, distanceKm}` of the nearest visible light, or
    /// `undefined` if there is none or the position is not available.
    #[wasm_bindgen(js_name = findMe)]
    pub fn find_me(&self) -> js_sys::Promise {
        let widget = self.widget.clone();
        let services = self.services.clone();

        wasm_bindgen_futures::future_to_promise(async move {
            let ticket = widget.write().begin_locate().map_err(js_error)?;
            let result = signalmap::geolocation::Geolocation::current_position(&services).await;
            let outcome = widget
                .write()
                .complete_locate(ticket, result)
                .map_err(js_error)?;

            let LocateOutcome::Nearest { nearest, .. } = outcome else {
                return Ok(JsValue::UNDEFINED);
            };

            let widget = widget.read();
            let Some(entry) = widget.catalog().get(nearest.index) else {
                return Ok(JsValue::UNDEFINED);
            };

            let light = NearestLight {
                code: entry.record().code.clone(),
                distance_km: nearest.distance_km(),
            };
            serde_wasm_bindgen::to_value(&light).map_err(JsValue::from)
        })
    }

    /// Searches for a place through the host's places service. Resolves to true if a place was
    /// found and highlighted.
    #[wasm_bindgen(js_name = searchPlaces)]
    pub fn search_places(&self, text: String) -> js_sys::Promise {
        let widget = self.widget.clone();
        let services = self.services.clone();

        wasm_bindgen_futures::future_to_promise(async move {
            let (ticket, query) = {
                let mut widget = widget.write();
                let ticket = widget.begin_place_search().map_err(js_error)?;
                (ticket, widget.place_query(&text))
            };
            let results = signalmap::places::PlacesSearch::search(&services, &query).await;
            let outcome = widget
                .write()
                .complete_place_search(ticket, results)
                .map_err(js_error)?;

            Ok(JsValue::from_bool(matches!(
                outcome,
                PlaceOutcome::Highlighted { .. }
            )))
        })
    }
}
