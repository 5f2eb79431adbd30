//! Browser bindings for the signal map widget.
//!
//! The page implements a [`WidgetHost`] object that draws the map and the list, then starts the
//! widget and forwards user input to the returned [`SignalMapWidget`]:
//!
//! ```js
//! import init, { start } from "./signalmap_web.js";
//!
//! await init();
//! const widget = await start(host, { datasetUrl: "traffic-lights.json" });
//! categoryCheckbox.onchange = (e) => widget.toggleCategory(e.target.value, e.target.checked);
//! ```

mod ids;

#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod widget;

#[cfg(target_arch = "wasm32")]
pub use host::{HostDisplay, HostServices, WidgetHost};
#[cfg(target_arch = "wasm32")]
pub use widget::{start, SignalMapWidget};
