//! Runs the widget without any UI and prints what it would show.
//!
//! ```sh
//! RUST_LOG=info cargo run --example headless
//! ```

use std::path::PathBuf;

use signalmap::headless::{FixedGeolocation, GazetteerSearch, HeadlessUi};
use signalmap::places::PlaceResult;
use signalmap::record::Category;
use signalmap::signalmap_types::latlon;
use signalmap::{DatasetSource, LocateOutcome, SignalMapBuilder, UiEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/data/traffic-lights.json");
    let ui = HeadlessUi::new();
    let mut widget = SignalMapBuilder::new()
        .with_headless(&ui)
        .load(DatasetSource::File(path))
        .await?;

    println!("Loaded {} traffic lights", widget.catalog().len());

    widget.handle_event(UiEvent::CategoryToggled {
        category: Category::MelakaTengah,
        checked: true,
    })?;
    println!("Melaka Tengah: {:?}", ui.visible_rows());

    widget.handle_event(UiEvent::SearchTextChanged("tun ali".into()))?;
    println!("Melaka Tengah, \"tun ali\": {:?}", ui.visible_rows());

    widget.handle_event(UiEvent::ClearFilterClicked)?;

    let geolocation = FixedGeolocation(Ok(latlon!(2.2, 102.25)));
    match widget.locate_user(&geolocation).await? {
        LocateOutcome::Nearest { nearest, .. } => {
            let entry = widget
                .catalog()
                .get(nearest.index)
                .ok_or_else(|| anyhow::anyhow!("nearest light is not in the catalog"))?;
            println!(
                "Nearest light: {} ({:.2} km)",
                entry.display_text(),
                nearest.distance_km()
            );
        }
        other => println!("Locate: {other:?}"),
    }

    let search = GazetteerSearch::new(vec![PlaceResult {
        name: "Menara Taming Sari".into(),
        position: latlon!(2.1917, 102.2469),
        viewport: None,
    }]);
    let outcome = widget.search_places(&search, "taming sari").await?;
    println!("Place search: {outcome:?}");

    for message in ui.notifications() {
        println!("Notification: {message}");
    }

    Ok(())
}
