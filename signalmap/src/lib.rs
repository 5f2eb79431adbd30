//! Signal map is the core of a single-page widget that shows traffic lights on an interactive map
//! and lets the user filter them, search for places and find the light closest to them.
//!
//! # Quick start
//!
//! ```no_run
//! use signalmap::{DatasetSource, SignalMapBuilder, UiEvent};
//! use signalmap::headless::HeadlessUi;
//! use signalmap::record::Category;
//!
//! # tokio_test::block_on(async {
//! let ui = HeadlessUi::new();
//! let mut widget = SignalMapBuilder::new()
//!     .with_headless(&ui)
//!     .load(DatasetSource::Url("traffic-lights.json".into()))
//!     .await
//!     .expect("dataset must load");
//!
//! widget
//!     .handle_event(UiEvent::CategoryToggled { category: Category::Jasin, checked: true })
//!     .expect("filter events never fail");
//! # });
//! ```
//!
//! # Main components
//!
//! The widget does not render anything by itself. Everything visible is delegated to
//! collaborators provided by the host (see [`display`]): a [`MapDisplay`](display::MapDisplay)
//! showing point features, a [`ListDisplay`](display::ListDisplay) with one row per light, a
//! [`DetailSurface`](display::DetailSurface) popup and a [`ControlPanel`](display::ControlPanel)
//! for input fields and notifications. External services for place search and geolocation are
//! abstracted by [`PlacesSearch`](places::PlacesSearch) and
//! [`Geolocation`](geolocation::Geolocation).
//!
//! The state itself lives in [`SignalMap`]:
//!
//! * the [`Catalog`](catalog::Catalog) of all lights with their visibility and highlight flags,
//! * the [`FilterState`](filter::FilterState) the [filter engine](filter::apply_filters)
//!   recomputes visibility from,
//! * the [nearest-point locator](locator::find_nearest_visible) over the visible lights,
//! * the place search highlight marker and the user location marker.
//!
//! The host feeds user actions into the widget as [`UiEvent`]s.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod builder;
pub mod catalog;
mod color;
pub mod config;
pub mod control;
pub mod dataset;
pub mod display;
pub mod error;
pub mod filter;
pub mod geolocation;
pub mod headless;
pub mod locator;
pub mod places;
pub mod platform;
pub mod record;
pub mod selection;
mod widget;

#[cfg(test)]
mod tests;

pub use builder::{SignalMapBuilder, LOAD_FAILED_MESSAGE};
pub use color::Color;
pub use config::WidgetConfig;
pub use control::{EventOutcome, LocateOutcome, UiEvent};
pub use dataset::{load_dataset, parse_dataset, Dataset, DatasetSource};
pub use error::SignalMapError;
pub use widget::{SharedSignalMap, SignalMap, NOTHING_VISIBLE_MESSAGE};

// Reexport signalmap_types
pub use signalmap_types;
