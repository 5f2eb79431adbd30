//! Interaction wiring: the events a host UI feeds into the widget.
//!
//! A host translates its own callbacks (input changes, checkbox toggles, button and marker clicks,
//! completions of external services) into [`UiEvent`]s and passes them to
//! [`SignalMap::handle_event`](crate::SignalMap::handle_event). Events are processed one at a
//! time, in the order they arrive.

use signalmap_types::{GeoPoint2d, GeoRect};

use crate::display::{MarkerHandle, RowHandle};
use crate::geolocation::GeolocationError;
use crate::locator::Nearest;
use crate::places::{PlaceOutcome, PlaceResult};
use crate::record::{Category, IntersectionType};

mod request;

pub(crate) use request::PendingRequest;
pub use request::{RequestGuard, RequestKind, RequestTicket};

/// Something the user did, or an external service answered.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Text of the list filter input changed.
    SearchTextChanged(String),
    /// A category checkbox was toggled.
    CategoryToggled {
        /// Category of the checkbox.
        category: Category,
        /// New state of the checkbox.
        checked: bool,
    },
    /// An intersection type checkbox was toggled.
    IntersectionTypeToggled {
        /// Intersection type of the checkbox.
        intersection_type: IntersectionType,
        /// New state of the checkbox.
        checked: bool,
    },
    /// "Clear filter" button.
    ClearFilterClicked,
    /// "Clear search" button next to the place search input.
    ClearSearchClicked,
    /// "Find my location" button.
    FindMeClicked,
    /// The geolocation request started by [`UiEvent::FindMeClicked`] completed.
    LocationResolved {
        /// Ticket returned in [`EventOutcome::LocationRequested`].
        ticket: RequestTicket,
        /// Answer of the geolocation service.
        result: Result<GeoPoint2d, GeolocationError>,
    },
    /// A map feature was clicked.
    MarkerClicked(MarkerHandle),
    /// A list row was clicked.
    ListRowClicked(RowHandle),
    /// The detail surface was closed by the user.
    DetailClosed,
    /// The map view bounds changed.
    BoundsChanged(GeoRect),
    /// The places search box produced results.
    PlacesChanged(Vec<PlaceResult>),
}

/// What handling an event resulted in.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The widget state was updated.
    Handled,
    /// The event did not concern anything the widget knows about.
    Ignored,
    /// The host must now ask the geolocation service for the position and send the answer back
    /// with [`UiEvent::LocationResolved`] carrying this ticket.
    LocationRequested(RequestTicket),
    /// Geolocation finished.
    Located(LocateOutcome),
    /// Place search results were applied.
    Place(PlaceOutcome),
}

/// Result of a "find my location" round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    /// The user was located and the closest visible light found.
    Nearest {
        /// Where the user is.
        position: GeoPoint2d,
        /// Closest visible light.
        nearest: Nearest,
    },
    /// The user was located but no light is visible with the current filters.
    NothingVisible {
        /// Where the user is.
        position: GeoPoint2d,
    },
    /// The position could not be obtained. The map was not changed.
    Failed(GeolocationError),
}
