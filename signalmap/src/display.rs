//! Collaborators the widget renders through.
//!
//! The widget never draws anything itself. Markers, list rows, the detail popup and notifications
//! are owned by the host UI, which hands back opaque handles the widget keeps in its catalog.

use maybe_sync::{MaybeSend, MaybeSync};
use serde::{Deserialize, Serialize};
use signalmap_types::{GeoPoint2d, GeoRect};

use crate::color::Color;
use crate::record::Category;

/// Opaque reference to a feature shown by a [`MapDisplay`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

/// Opaque reference to a row shown by a [`ListDisplay`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowHandle(pub u64);

/// Shape of a point feature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinShape {
    /// Balloon pin with a glyph.
    Pin,
    /// Round dot, used for the user's own position.
    Dot,
}

/// Appearance of a point feature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinStyle {
    /// Shape of the feature.
    pub shape: PinShape,
    /// Fill color.
    pub background: Color,
    /// Outline color.
    pub border: Color,
    /// Glyph color.
    pub glyph: Color,
}

impl PinStyle {
    /// Pin of a traffic light of the given category.
    pub fn for_category(category: Category) -> Self {
        Self {
            shape: PinShape::Pin,
            background: category.pin_color(),
            border: Color::from_hex("#333333"),
            glyph: Color::WHITE,
        }
    }

    /// Pin of a place search result.
    pub fn search_result() -> Self {
        Self {
            shape: PinShape::Pin,
            background: Color::from_hex("#EA4335"),
            border: Color::from_hex("#A02D24"),
            glyph: Color::WHITE,
        }
    }

    /// Dot marking the user's position.
    pub fn user_location() -> Self {
        Self {
            shape: PinShape::Dot,
            background: Color::from_hex("#4285F4"),
            border: Color::WHITE,
            glyph: Color::WHITE,
        }
    }
}

/// Street-level image panel embedded into the detail surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreetView {
    /// Where the camera stands.
    pub position: GeoPoint2d,
    /// Compass heading in degrees.
    pub heading: f64,
    /// Camera pitch in degrees.
    pub pitch: f64,
}

/// Content of the detail surface opened for a marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailContent {
    /// Bold heading line.
    pub title: String,
    /// Description line.
    pub description: Option<String>,
    /// "Get Directions" link target.
    pub directions_url: Option<String>,
    /// Street-level image panel.
    pub street_view: Option<StreetView>,
}

impl DetailContent {
    /// Content consisting of the title only.
    pub fn text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            directions_url: None,
            street_view: None,
        }
    }
}

/// Interactive map the features are placed on.
pub trait MapDisplay: MaybeSend + MaybeSync {
    /// Sets up the initial view. Called once, before any feature is added.
    fn initialize(&mut self, center: GeoPoint2d, zoom: f64, style_id: &str);
    /// Adds a visible point feature.
    fn add_point_feature(
        &mut self,
        position: GeoPoint2d,
        style: &PinStyle,
        title: &str,
    ) -> MarkerHandle;
    /// Removes the feature from the map. The handle must not be used afterwards.
    fn remove_feature(&mut self, handle: MarkerHandle);
    /// Shows or hides the feature.
    fn set_feature_visible(&mut self, handle: MarkerHandle, visible: bool);
    /// Moves the view center to the position, animated if the display supports it.
    fn pan_to(&mut self, position: GeoPoint2d);
    /// Moves the view center to the position immediately.
    fn set_center(&mut self, position: GeoPoint2d);
    /// Sets the zoom level.
    fn set_zoom(&mut self, zoom: f64);
    /// Frames the view to the region.
    fn fit_viewport(&mut self, bounds: GeoRect);
}

/// List of traffic lights shown next to the map.
pub trait ListDisplay: MaybeSend + MaybeSync {
    /// Appends a visible row with the given text.
    fn add_row(&mut self, text: &str) -> RowHandle;
    /// Shows or hides the row.
    fn set_row_visible(&mut self, handle: RowHandle, visible: bool);
    /// Sets or clears the row's highlight.
    fn set_row_active(&mut self, handle: RowHandle, active: bool);
}

/// Popup showing details of a marker.
pub trait DetailSurface: MaybeSend + MaybeSync {
    /// Opens the popup anchored at the marker, replacing any content shown before.
    fn open(&mut self, marker: MarkerHandle, content: DetailContent);
}

/// Input fields and notifications of the widget.
pub trait ControlPanel: MaybeSend + MaybeSync {
    /// Shows a user-visible message.
    fn notify(&mut self, message: &str);
    /// Replaces the content of the list filter input.
    fn set_filter_text(&mut self, text: &str);
    /// Replaces the content of the place search input.
    fn set_place_query(&mut self, text: &str);
}
