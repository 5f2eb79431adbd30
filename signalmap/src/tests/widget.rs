use assert_matches::assert_matches;
use bytes::Bytes;
use signalmap_types::latlon;

use super::{build, light, melaka_dataset};
use crate::dataset::{Dataset, DatasetSource};
use crate::display::{MarkerHandle, PinShape, PinStyle, RowHandle};
use crate::headless::HeadlessUi;
use crate::record::{Category, IntersectionType};
use crate::{EventOutcome, SignalMapBuilder, SignalMapError, UiEvent, LOAD_FAILED_MESSAGE};

#[test]
fn build_renders_every_record() {
    let ui = HeadlessUi::new();
    let widget = build(&ui, melaka_dataset());

    assert_eq!(widget.catalog().len(), 5);
    assert_eq!(ui.visible_titles(), vec!["TL-001", "TL-002", "TL-003", "TL-004", "TL-005"]);
    assert_eq!(ui.visible_rows()[1], "TL-002 - Simpang Ampat");

    let state = ui.state();
    let (center, zoom, style_id) = state.initialized.clone().expect("map was not initialized");
    assert_eq!(center, latlon!(2.3, 102.3));
    assert_eq!(zoom, 11.0);
    assert_eq!(style_id, "f49b240c79c381e43a2b689c");

    assert_eq!(state.features[1].style, PinStyle::for_category(Category::AlorGajah));
    assert_eq!(state.features[1].style.shape, PinShape::Pin);
    assert_eq!(state.features[1].position, latlon!(2.3585, 102.2090));
}

#[test]
fn missing_collaborator() {
    let ui = HeadlessUi::new();
    let result = SignalMapBuilder::new()
        .with_map_display(ui.clone())
        .with_list_display(ui.clone())
        .with_detail_surface(ui.clone())
        .build(melaka_dataset());

    assert_matches!(
        result,
        Err(SignalMapError::MissingCollaborator("control panel"))
    );
}

#[test]
fn debug_output_skips_collaborators() {
    let ui = HeadlessUi::new();
    let widget = build(&ui, melaka_dataset());

    let debug = format!("{widget:?}");
    assert!(debug.starts_with("SignalMap {"));
    assert!(debug.contains("TL-003"));
    assert!(debug.ends_with(".. }"));
}

#[test]
fn load_failure_is_reported_once_without_rendering() {
    let ui = HeadlessUi::new();
    let result = tokio_test::block_on(
        SignalMapBuilder::new()
            .with_headless(&ui)
            .load(DatasetSource::Bytes(Bytes::from_static(b"not json"))),
    );

    assert_matches!(result, Err(SignalMapError::Decoding(_)));
    assert_eq!(ui.notifications(), vec![LOAD_FAILED_MESSAGE]);

    let state = ui.state();
    assert!(state.initialized.is_none());
    assert!(state.features.is_empty());
    assert!(state.rows.is_empty());
}

#[test]
fn load_from_bytes() {
    let ui = HeadlessUi::new();
    let json = r#"[{
        "code": "TL-100",
        "description": "Klebang",
        "category": "Melaka Tengah",
        "intersectionType": "T-Junction",
        "position": {"lat": 2.2161, "lng": 102.1960}
    }]"#;

    let widget = tokio_test::block_on(
        SignalMapBuilder::new()
            .with_headless(&ui)
            .load(DatasetSource::Bytes(Bytes::from_static(json.as_bytes()))),
    )
    .expect("valid dataset");

    assert_eq!(widget.catalog().visible_codes(), vec!["TL-100"]);
    assert!(ui.notifications().is_empty());
}

#[test]
fn two_entry_scenario() {
    let ui = HeadlessUi::new();
    let dataset = Dataset::new(vec![
        light("A", "", Category::Jasin, IntersectionType::FourWay, 0.0, 0.0),
        light("B", "", Category::Slip, IntersectionType::FourWay, 1.0, 1.0),
    ])
    .expect("valid dataset");
    let mut widget = build(&ui, dataset);

    widget.set_category(Category::Jasin, true);
    assert_eq!(widget.catalog().visible_codes(), vec!["A"]);
    assert_eq!(ui.visible_titles(), vec!["A"]);

    widget.set_category(Category::Jasin, false);
    widget.set_search_text("b");
    assert_eq!(widget.catalog().visible_codes(), vec!["B"]);
    assert_eq!(ui.visible_rows(), vec!["B - "]);

    widget.set_search_text("");
    assert_eq!(widget.catalog().visible_codes(), vec!["A", "B"]);
    assert_eq!(ui.visible_titles(), vec!["A", "B"]);
}

#[test]
fn filter_events_keep_map_and_list_in_sync() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());

    let outcome = widget
        .handle_event(UiEvent::CategoryToggled {
            category: Category::MelakaTengah,
            checked: true,
        })
        .expect("filter events never fail");
    assert_eq!(outcome, EventOutcome::Handled);
    assert_eq!(ui.visible_titles(), vec!["TL-001", "TL-005"]);

    widget
        .handle_event(UiEvent::IntersectionTypeToggled {
            intersection_type: IntersectionType::Pedestrian,
            checked: true,
        })
        .expect("filter events never fail");
    assert_eq!(ui.visible_titles(), vec!["TL-005"]);
    assert_eq!(ui.visible_rows(), vec!["TL-005 - Jalan Tun Razak"]);

    widget
        .handle_event(UiEvent::SearchTextChanged("HANG".into()))
        .expect("filter events never fail");
    assert!(ui.visible_titles().is_empty());
    assert!(ui.visible_rows().is_empty());
}

#[test]
fn unchanged_filter_makes_no_display_calls() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());

    widget.set_search_text("jalan");
    let updates = ui.state().visibility_updates;
    // Three entries were hidden, each on the map and in the list.
    assert_eq!(updates, 6);

    let outcome = widget.apply_filters();
    assert!(outcome.changed.is_empty());
    assert_eq!(outcome.visible, 2);
    assert_eq!(ui.state().visibility_updates, updates);
}

#[test]
fn clear_filter_keeps_tags() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());

    widget.set_category(Category::MelakaTengah, true);
    widget.set_search_text("hang tuah");
    assert_eq!(widget.catalog().visible_codes(), vec!["TL-001"]);

    let outcome = widget
        .handle_event(UiEvent::ClearFilterClicked)
        .expect("filter events never fail");

    assert_eq!(outcome, EventOutcome::Handled);
    assert_eq!(widget.filter().search_text(), "");
    assert_eq!(ui.state().filter_text, "");
    assert_eq!(widget.catalog().visible_codes(), vec!["TL-001", "TL-005"]);
}

#[test]
fn marker_click_selects_entry() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());
    let marker = widget.catalog().get(2).expect("entry").marker();

    let outcome = widget
        .handle_event(UiEvent::MarkerClicked(marker))
        .expect("valid click");

    assert_eq!(outcome, EventOutcome::Handled);
    assert_eq!(widget.active(), Some(2));
    assert_eq!(ui.active_rows(), vec!["TL-003 - Bandar Jasin"]);

    let details = ui.details();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].0, marker);
    assert_eq!(details[0].1.title, "TL-003");
    // Clicking a marker does not move the map.
    assert!(ui.state().pans.is_empty());

    // Second click on the same marker does not reopen the popup.
    widget
        .handle_event(UiEvent::MarkerClicked(marker))
        .expect("valid click");
    assert_eq!(ui.details().len(), 1);

    widget
        .handle_event(UiEvent::DetailClosed)
        .expect("valid event");
    widget
        .handle_event(UiEvent::MarkerClicked(marker))
        .expect("valid click");
    assert_eq!(ui.details().len(), 2);
}

#[test]
fn row_click_pans_and_selects() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());
    widget.select(0).expect("valid index");

    let row = widget.catalog().get(3).expect("entry").row();
    widget
        .handle_event(UiEvent::ListRowClicked(row))
        .expect("valid click");

    assert_eq!(widget.active(), Some(3));
    assert_eq!(ui.state().pans, vec![latlon!(2.2640, 102.2866)]);
    assert_eq!(ui.active_rows(), vec!["TL-004 - Ayer Keroh Toll"]);
    assert!(!widget.catalog().get(0).expect("entry").is_active());
}

#[test]
fn unknown_handles_are_ignored() {
    let ui = HeadlessUi::new();
    let mut widget = build(&ui, melaka_dataset());

    assert_eq!(
        widget
            .handle_event(UiEvent::MarkerClicked(MarkerHandle(999)))
            .expect("valid event"),
        EventOutcome::Ignored
    );
    assert_eq!(
        widget
            .handle_event(UiEvent::ListRowClicked(RowHandle(999)))
            .expect("valid event"),
        EventOutcome::Ignored
    );
    assert_eq!(widget.active(), None);
    assert!(ui.details().is_empty());
}
