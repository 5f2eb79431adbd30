use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;
use signalmap_types::GeoPoint2d;

use crate::catalog::Catalog;
use crate::config::WidgetConfig;
use crate::control::{
    EventOutcome, LocateOutcome, PendingRequest, RequestGuard, RequestKind, RequestTicket, UiEvent,
};
use crate::display::{
    ControlPanel, DetailContent, DetailSurface, ListDisplay, MapDisplay, MarkerHandle, RowHandle,
};
use crate::error::SignalMapError;
use crate::filter::{apply_filters, FilterOutcome, FilterState};
use crate::geolocation::{Geolocation, GeolocationError, UserLocation};
use crate::locator::{find_nearest_visible, Nearest};
use crate::places::{PlaceHighlight, PlaceOutcome, PlaceQuery, PlaceResult, PlacesSearch};
use crate::record::{Category, IntersectionType};
use crate::selection::{SelectOutcome, Selection};

/// Message shown when the user is located but no light passes the filters.
pub const NOTHING_VISIBLE_MESSAGE: &str = "No traffic lights found matching your current filters.";

/// Widget shared between threads. The lock serializes filter passes and nearest-point lookups, so
/// a lookup always sees a completely applied filter.
pub type SharedSignalMap = Arc<RwLock<SignalMap>>;

/// The traffic light map widget.
///
/// Owns the catalog, the filter and selection state, the search and user location markers and
/// the collaborators everything is displayed through. Created with
/// [`SignalMapBuilder`](crate::SignalMapBuilder). All operations take `&mut self`, which keeps
/// every mutation of the shared state explicit and ordered.
pub struct SignalMap {
    pub(crate) config: WidgetConfig,
    pub(crate) catalog: Catalog,
    pub(crate) filter: FilterState,
    pub(crate) selection: Selection,
    pub(crate) place: PlaceHighlight,
    pub(crate) user_location: UserLocation,
    pub(crate) requests: RequestGuard,
    pub(crate) map: Box<dyn MapDisplay>,
    pub(crate) list: Box<dyn ListDisplay>,
    pub(crate) detail: Box<dyn DetailSurface>,
    pub(crate) controls: Box<dyn ControlPanel>,
}

impl Debug for SignalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalMap")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("filter", &self.filter)
            .field("selection", &self.selection)
            .field("place", &self.place)
            .field("user_location", &self.user_location)
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl SignalMap {
    /// Configuration the widget was built with.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// All traffic lights.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current state of the filter controls.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Index of the active entry.
    pub fn active(&self) -> Option<usize> {
        self.selection.active()
    }

    /// State of the place search highlight.
    pub fn place(&self) -> &PlaceHighlight {
        &self.place
    }

    /// State of the user location marker.
    pub fn user_location(&self) -> &UserLocation {
        &self.user_location
    }

    /// Wraps the widget for access from several threads.
    pub fn into_shared(self) -> SharedSignalMap {
        Arc::new(RwLock::new(self))
    }

    /// Recomputes visibility of every entry from the current filter state and pushes the changes
    /// to the map and the list.
    pub fn apply_filters(&mut self) -> FilterOutcome {
        let outcome = apply_filters(&mut self.catalog, &self.filter);

        for index in &outcome.changed {
            let Some(entry) = self.catalog.get(*index) else {
                continue;
            };

            self.map.set_feature_visible(entry.marker(), entry.is_visible());
            self.list.set_row_visible(entry.row(), entry.is_visible());
        }

        outcome
    }

    /// Replaces the filter search text and reapplies the filter.
    pub fn set_search_text(&mut self, text: &str) -> FilterOutcome {
        self.filter.set_search_text(text);
        self.apply_filters()
    }

    /// Selects or deselects a category and reapplies the filter.
    pub fn set_category(&mut self, category: Category, checked: bool) -> FilterOutcome {
        self.filter.set_category(category, checked);
        self.apply_filters()
    }

    /// Selects or deselects an intersection type and reapplies the filter.
    pub fn set_intersection_type(
        &mut self,
        intersection_type: IntersectionType,
        checked: bool,
    ) -> FilterOutcome {
        self.filter.set_intersection_type(intersection_type, checked);
        self.apply_filters()
    }

    /// Empties the filter search text and reapplies the filter. Selected tags stay in effect.
    pub fn clear_filter_text(&mut self) -> FilterOutcome {
        self.filter.clear_search_text();
        self.controls.set_filter_text("");
        self.apply_filters()
    }

    /// Makes the entry at `index` the active one and opens its details.
    pub fn select(&mut self, index: usize) -> Result<SelectOutcome, SignalMapError> {
        self.selection.select(
            index,
            &mut self.catalog,
            self.list.as_mut(),
            self.detail.as_mut(),
            &self.config,
        )
    }

    /// Handles a click on a list row: pans to the light and selects it.
    pub fn click_row(&mut self, row: RowHandle) -> Result<Option<SelectOutcome>, SignalMapError> {
        let Some(index) = self.catalog.find_by_row(row) else {
            return Ok(None);
        };

        if let Some(entry) = self.catalog.get(index) {
            self.map.pan_to(entry.record().position);
        }

        self.select(index).map(Some)
    }

    /// Handles a click on a map feature. Returns false if the marker is not known to the widget.
    pub fn click_marker(&mut self, marker: MarkerHandle) -> Result<bool, SignalMapError> {
        if self.user_location.marker() == Some(marker) {
            // The greeting replaces whatever the detail surface showed.
            self.selection.detail_closed();
            self.detail.open(marker, DetailContent::text("You are here!"));
            return Ok(true);
        }

        match self.catalog.find_by_marker(marker) {
            Some(index) => {
                self.select(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Visible entry closest to `reference`.
    pub fn find_nearest_visible(&self, reference: &GeoPoint2d) -> Option<Nearest> {
        find_nearest_visible(reference, &self.catalog)
    }

    /// Starts a geolocation request. Fails if one is already running.
    pub fn begin_locate(&mut self) -> Result<RequestTicket, SignalMapError> {
        self.requests.begin(RequestKind::Geolocation)
    }

    /// Completes the geolocation request started with [`SignalMap::begin_locate`].
    ///
    /// On success the user marker is replaced, the map is brought to the position and the closest
    /// visible light is looked up. If there is none, the user is notified. On failure the user is
    /// notified and the map is not touched.
    pub fn complete_locate(
        &mut self,
        ticket: RequestTicket,
        result: Result<GeoPoint2d, GeolocationError>,
    ) -> Result<LocateOutcome, SignalMapError> {
        if ticket.kind() != RequestKind::Geolocation {
            return Err(SignalMapError::StaleRequest(ticket.kind()));
        }
        self.requests.finish(ticket)?;

        let position = match result {
            Ok(position) => position,
            Err(err) => {
                log::warn!("Geolocation failed: {err}");
                self.controls.notify(err.user_message());
                return Ok(LocateOutcome::Failed(err));
            }
        };

        self.user_location
            .place(position, self.map.as_mut(), self.config.locate_zoom);

        match self.find_nearest_visible(&position) {
            Some(nearest) => {
                if let Some(entry) = self.catalog.get(nearest.index) {
                    log::info!(
                        "Nearest traffic light is {} at {:.2} km",
                        entry.record().code,
                        nearest.distance_km()
                    );
                }
                Ok(LocateOutcome::Nearest { position, nearest })
            }
            None => {
                self.controls.notify(NOTHING_VISIBLE_MESSAGE);
                Ok(LocateOutcome::NothingVisible { position })
            }
        }
    }

    /// Locates the user with the given service, see [`SignalMap::complete_locate`].
    ///
    /// If the returned future is dropped before the position arrives, the request is abandoned
    /// and a new one can be started.
    pub async fn locate_user(
        &mut self,
        geolocation: &dyn Geolocation,
    ) -> Result<LocateOutcome, SignalMapError> {
        let ticket = self.begin_locate()?;
        let pending = PendingRequest::new(&mut self.requests, ticket);
        let result = geolocation.current_position().await;
        let ticket = pending.into_ticket();

        self.complete_locate(ticket, result)
    }

    /// Highlights the first of the place search `results`. Empty results change nothing.
    pub fn apply_place_results(&mut self, results: &[PlaceResult]) -> PlaceOutcome {
        self.place
            .apply(results, self.map.as_mut(), self.config.place_zoom)
    }

    /// Query for the text, biased to the current map bounds.
    pub fn place_query(&self, text: &str) -> PlaceQuery {
        PlaceQuery {
            text: text.to_string(),
            bias: self.place.bias(),
            region: self.config.region.clone(),
        }
    }

    /// Starts a place search request. Fails if one is already running.
    pub fn begin_place_search(&mut self) -> Result<RequestTicket, SignalMapError> {
        self.requests.begin(RequestKind::PlaceSearch)
    }

    /// Completes the place search started with [`SignalMap::begin_place_search`].
    pub fn complete_place_search(
        &mut self,
        ticket: RequestTicket,
        results: Result<Vec<PlaceResult>, SignalMapError>,
    ) -> Result<PlaceOutcome, SignalMapError> {
        if ticket.kind() != RequestKind::PlaceSearch {
            return Err(SignalMapError::StaleRequest(ticket.kind()));
        }
        self.requests.finish(ticket)?;

        Ok(self.apply_place_results(&results?))
    }

    /// Searches for a place with the given service and highlights the first result.
    ///
    /// Dropping the returned future abandons the request.
    pub async fn search_places(
        &mut self,
        search: &dyn PlacesSearch,
        text: &str,
    ) -> Result<PlaceOutcome, SignalMapError> {
        let ticket = self.begin_place_search()?;
        let query = self.place_query(text);
        let pending = PendingRequest::new(&mut self.requests, ticket);
        let results = search.search(&query).await;
        let ticket = pending.into_ticket();

        self.complete_place_search(ticket, results)
    }

    /// Gives up on a request started with [`SignalMap::begin_locate`] or
    /// [`SignalMap::begin_place_search`] whose result will never arrive. Returns false if the
    /// ticket does not belong to the running request.
    pub fn cancel_request(&mut self, ticket: RequestTicket) -> bool {
        self.requests.abandon(ticket)
    }

    /// Removes the place search highlight and empties the search input.
    pub fn clear_place_search(&mut self) {
        self.controls.set_place_query("");
        self.place.clear(self.map.as_mut());
    }

    /// Processes one UI event.
    pub fn handle_event(&mut self, event: UiEvent) -> Result<EventOutcome, SignalMapError> {
        log::trace!("Handling {event:?}");

        let outcome = match event {
            UiEvent::SearchTextChanged(text) => {
                self.set_search_text(&text);
                EventOutcome::Handled
            }
            UiEvent::CategoryToggled { category, checked } => {
                self.set_category(category, checked);
                EventOutcome::Handled
            }
            UiEvent::IntersectionTypeToggled {
                intersection_type,
                checked,
            } => {
                self.set_intersection_type(intersection_type, checked);
                EventOutcome::Handled
            }
            UiEvent::ClearFilterClicked => {
                self.clear_filter_text();
                EventOutcome::Handled
            }
            UiEvent::ClearSearchClicked => {
                self.clear_place_search();
                EventOutcome::Handled
            }
            UiEvent::FindMeClicked => EventOutcome::LocationRequested(self.begin_locate()?),
            UiEvent::LocationResolved { ticket, result } => {
                EventOutcome::Located(self.complete_locate(ticket, result)?)
            }
            UiEvent::MarkerClicked(marker) => match self.click_marker(marker)? {
                true => EventOutcome::Handled,
                false => EventOutcome::Ignored,
            },
            UiEvent::ListRowClicked(row) => match self.click_row(row)? {
                Some(_) => EventOutcome::Handled,
                None => EventOutcome::Ignored,
            },
            UiEvent::DetailClosed => {
                self.selection.detail_closed();
                EventOutcome::Handled
            }
            UiEvent::BoundsChanged(bounds) => {
                self.place.set_bias(bounds);
                EventOutcome::Handled
            }
            UiEvent::PlacesChanged(results) => {
                EventOutcome::Place(self.apply_place_results(&results))
            }
        };

        Ok(outcome)
    }
}
