use std::thread;

use approx::assert_relative_eq;
use assert_matches::assert_matches;
use async_trait::async_trait;
use signalmap_types::{latlon, GeoPoint2d};

use super::{build, light, melaka_dataset};
use crate::control::RequestKind;
use crate::dataset::Dataset;
use crate::display::{DetailContent, PinStyle};
use crate::geolocation::{Geolocation, GeolocationError};
use crate::headless::{FixedGeolocation, HeadlessUi};
use crate::record::{Category, IntersectionType};
use crate::{EventOutcome, LocateOutcome, SignalMapError, UiEvent, NOTHING_VISIBLE_MESSAGE};

fn equator_dataset() -> Dataset {
    Dataset::new(vec![
        light("FAR", "", Category::Jasin, IntersectionType::FourWay, 0.0, 2.0),
        light("NEAR", "", Category::Jasin, IntersectionType::FourWay, 0.0, 1.0),
    ])
    .expect("valid dataset")
}

#[test]
fn locate_finds_nearest_visible() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, equator_dataset());
    let geolocation = FixedGeolocation(Ok(latlon!(0.0, 0.0)));

    let outcome = tokio_test::block_on(widget.locate_user(&geolocation))
        .expect("no request running");

    let LocateOutcome::Nearest { position, nearest } = outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert_eq!(position, latlon!(0.0, 0.0));
    assert_eq!(nearest.index, 1);
    assert_relative_eq!(nearest.distance_km(), 111.195, epsilon = 1e-3);

    let user_marker = widget.user_location().marker().expect("user marker");
    let feature = ui.feature(user_marker).expect("feature exists");
    assert_eq!(feature.style, PinStyle::user_location());
    assert_eq!(feature.title, "Your Location");

    let state = ui.state();
    assert_eq!(state.pans, vec![latlon!(0.0, 0.0)]);
    assert_eq!(state.zoom, Some(16.0));
    assert!(state.notifications.is_empty());
}

#[test]
fn relocating_replaces_user_marker() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());

    tokio_test::block_on(widget.locate_user(&FixedGeolocation(Ok(latlon!(2.2, 102.25)))))
        .expect("no request running");
    let first = widget.user_location().marker().expect("user marker");

    tokio_test::block_on(widget.locate_user(&FixedGeolocation(Ok(latlon!(2.3, 102.3)))))
        .expect("no request running");
    let second = widget.user_location().marker().expect("user marker");

    assert_ne!(first, second);
    assert!(ui.feature(first).expect("feature exists").removed);
    assert_eq!(widget.user_location().position(), Some(latlon!(2.3, 102.3)));

    let user_markers = ui
        .live_features()
        .into_iter()
        .filter(|f| f.style == PinStyle::user_location())
        .count();
    assert_eq!(user_markers, 1);
}

#[test]
fn failure_notifies_and_leaves_map_untouched() {
    for error in [
        GeolocationError::PermissionDenied,
        GeolocationError::Unsupported,
        GeolocationError::Unavailable("timeout".into()),
    ] {
        let ui = HeadlessUi::new();
        let mut widget = build(&ui, melaka_dataset());
        let (features_before, center_before) = {
            let state = ui.state();
            (state.features.clone(), state.center)
        };

        let geolocation = FixedGeolocation(Err(error.clone()));
        let outcome = tokio_test::block_on(widget.locate_user(&geolocation))
            .expect("no request running");

        assert_eq!(outcome, LocateOutcome::Failed(error.clone()));
        assert_eq!(ui.notifications(), vec![error.user_message()]);
        assert!(widget.user_location().marker().is_none());

        let state = ui.state();
        assert_eq!(state.features, features_before);
        assert_eq!(state.center, center_before);
        assert!(state.pans.is_empty());
    }
}

#[test]
fn nothing_visible_is_reported() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());
    widget.set_search_text("no such light");

    let geolocation = FixedGeolocation(Ok(latlon!(2.2, 102.25)));
    let outcome = tokio_test::block_on(widget.locate_user(&geolocation))
        .expect("no request running");

    assert_eq!(
        outcome,
        LocateOutcome::NothingVisible {
            position: latlon!(2.2, 102.25)
        }
    );
    assert_eq!(ui.notifications(), vec![NOTHING_VISIBLE_MESSAGE]);
    // The user is still shown on the map.
    assert!(widget.user_location().marker().is_some());
}

#[test]
fn locate_respects_filters() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());
    widget.set_category(Category::Jasin, true);

    // Right next to TL-001, but only TL-003 is visible.
    let geolocation = FixedGeolocation(Ok(latlon!(2.1966, 102.2487)));
    let outcome = tokio_test::block_on(widget.locate_user(&geolocation))
        .expect("no request running");

    assert_matches!(outcome, LocateOutcome::Nearest { nearest, .. } if nearest.index == 2);
}

#[test]
fn event_round_trip() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, equator_dataset());

    let EventOutcome::LocationRequested(ticket) = widget
        .handle_event(UiEvent::FindMeClicked)
        .expect("no request running")
    else {
        panic!("location was not requested");
    };

    assert_matches!(
        widget.handle_event(UiEvent::FindMeClicked),
        Err(SignalMapError::RequestInFlight(RequestKind::Geolocation))
    );

    let outcome = widget
        .handle_event(UiEvent::LocationResolved {
            ticket,
            result: Ok(latlon!(0.0, 0.0)),
        })
        .expect("ticket is valid");
    assert_matches!(
        outcome,
        EventOutcome::Located(LocateOutcome::Nearest { nearest, .. }) if nearest.index == 1
    );

    // The same completion cannot be delivered twice.
    assert_matches!(
        widget.handle_event(UiEvent::LocationResolved {
            ticket,
            result: Ok(latlon!(0.0, 0.0)),
        }),
        Err(SignalMapError::StaleRequest(RequestKind::Geolocation))
    );
}

#[test]
fn place_ticket_cannot_complete_locate() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, equator_dataset());

    let ticket = widget.begin_place_search().expect("no request running");
    assert_matches!(
        widget.complete_locate(ticket, Ok(latlon!(0.0, 0.0))),
        Err(SignalMapError::StaleRequest(RequestKind::PlaceSearch))
    );
}

#[test]
fn user_marker_click_opens_greeting() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, equator_dataset());
    tokio_test::block_on(widget.locate_user(&FixedGeolocation(Ok(latlon!(0.0, 0.0)))))
        .expect("no request running");
    let marker = widget.user_location().marker().expect("user marker");

    let outcome = widget
        .handle_event(UiEvent::MarkerClicked(marker))
        .expect("valid click");

    assert_eq!(outcome, EventOutcome::Handled);
    assert_eq!(ui.details(), vec![(marker, DetailContent::text("You are here!"))]);
    assert_eq!(widget.active(), None);
}

#[test]
fn light_details_return_after_greeting() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, equator_dataset());
    let light = widget.catalog().get(1).expect("entry").marker();

    widget
        .handle_event(UiEvent::MarkerClicked(light))
        .expect("valid click");
    tokio_test::block_on(widget.locate_user(&FixedGeolocation(Ok(latlon!(0.0, 0.0)))))
        .expect("no request running");
    let user = widget.user_location().marker().expect("user marker");
    widget
        .handle_event(UiEvent::MarkerClicked(user))
        .expect("valid click");

    widget
        .handle_event(UiEvent::MarkerClicked(light))
        .expect("valid click");

    let details = ui.details();
    assert_eq!(details.len(), 3);
    let (marker, content) = &details[2];
    assert_eq!(*marker, light);
    assert_eq!(content.title, "NEAR");
    assert_eq!(widget.active(), Some(1));

    // Clicking it once more while its details are shown changes nothing.
    widget
        .handle_event(UiEvent::MarkerClicked(light))
        .expect("valid click");
    assert_eq!(ui.details().len(), 3);
}

struct NoAnswer;

#[async_trait]
impl Geolocation for NoAnswer {
    async fn current_position(&self) -> Result<GeoPoint2d, GeolocationError> {
        std::future::pending().await
    }
}

#[test]
fn dropped_locate_releases_the_request() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, equator_dataset());
    let geolocation = NoAnswer;

    {
        let mut task = tokio_test::task::spawn(widget.locate_user(&geolocation));
        assert!(task.poll().is_pending());
    }

    assert!(widget.user_location().marker().is_none());
    let ticket = widget.begin_locate().expect("abandoned request does not block");
    widget
        .complete_locate(ticket, Ok(latlon!(0.0, 0.0)))
        .expect("ticket is valid");
}

#[test]
fn unanswered_request_can_be_cancelled() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, equator_dataset());

    let EventOutcome::LocationRequested(lost) = widget
        .handle_event(UiEvent::FindMeClicked)
        .expect("no request running")
    else {
        panic!("location was not requested");
    };
    assert!(widget.cancel_request(lost));
    assert!(!widget.cancel_request(lost));

    let outcome = widget
        .handle_event(UiEvent::FindMeClicked)
        .expect("cancelled request does not block");
    assert_matches!(outcome, EventOutcome::LocationRequested(_));

    // A late answer to the cancelled request is ignored.
    assert_matches!(
        widget.handle_event(UiEvent::LocationResolved {
            ticket: lost,
            result: Ok(latlon!(0.0, 0.0)),
        }),
        Err(SignalMapError::StaleRequest(RequestKind::Geolocation))
    );
    assert!(widget.user_location().marker().is_none());
}

#[test]
fn shared_widget_serializes_filter_and_locate() {
    let ui = HeadlessUi::new();
    let shared = build(&ui, melaka_dataset()).into_shared();

    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for i in 0..100 {
                let text = if i % 2 == 0 { "jalan" } else { "" };
                shared.write().set_search_text(text);
            }
        })
    };

    let reader = {
        let shared = shared.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                let widget = shared.read();
                let visible = widget.catalog().visible_codes().len();
                let nearest = widget.find_nearest_visible(&latlon!(2.2, 102.25));
                // A lookup sees either the filtered or the unfiltered catalog, never a mix.
                assert!(visible == 2 || visible == 5);
                let nearest = nearest.expect("something is always visible");
                assert!(widget.catalog().get(nearest.index).expect("entry").is_visible());
            }
        })
    };

    writer.join().expect("writer panicked");
    reader.join().expect("reader panicked");
}
