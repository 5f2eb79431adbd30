//! Selection of the active traffic light and the content of its detail popup.

use signalmap_types::GeoPoint;

use crate::catalog::Catalog;
use crate::config::WidgetConfig;
use crate::display::{DetailContent, DetailSurface, ListDisplay, StreetView};
use crate::error::SignalMapError;
use crate::record::LocationRecord;

/// Tracks the single active catalog entry.
#[derive(Debug, Default)]
pub struct Selection {
    active: Option<usize>,
    detail_open: bool,
}

/// Result of [`Selection::select`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The entry became active and its detail surface was opened.
    Selected,
    /// The entry was already active with its detail surface open. Nothing was changed.
    Unchanged,
    /// The entry was already active, its closed detail surface was opened again.
    Reopened,
}

impl Selection {
    /// Index of the active entry.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Makes the entry at `index` the active one.
    ///
    /// The highlight of the previously active row is cleared, the entry's row is highlighted and
    /// the detail surface is opened for its marker.
    pub fn select(
        &mut self,
        index: usize,
        catalog: &mut Catalog,
        list: &mut dyn ListDisplay,
        detail: &mut dyn DetailSurface,
        config: &WidgetConfig,
    ) -> Result<SelectOutcome, SignalMapError> {
        if catalog.get(index).is_none() {
            return Err(SignalMapError::Generic(format!(
                "no catalog entry with index {index}"
            )));
        }

        let outcome = if self.active == Some(index) {
            if self.detail_open {
                return Ok(SelectOutcome::Unchanged);
            }
            SelectOutcome::Reopened
        } else {
            if let Some(previous) = self.active.and_then(|i| catalog.get_mut(i)) {
                previous.set_active(false);
                list.set_row_active(previous.row(), false);
            }
            SelectOutcome::Selected
        };

        let Some(entry) = catalog.get_mut(index) else {
            return Ok(outcome);
        };

        entry.set_active(true);
        list.set_row_active(entry.row(), true);

        let content = detail_content(entry.record(), config)?;
        detail.open(entry.marker(), content);

        self.active = Some(index);
        self.detail_open = true;

        Ok(outcome)
    }

    /// Records that the user closed the detail surface. The entry stays active.
    pub fn detail_closed(&mut self) {
        self.detail_open = false;
    }
}

fn detail_content(
    record: &LocationRecord,
    config: &WidgetConfig,
) -> Result<DetailContent, SignalMapError> {
    log::debug!(
        "Opening detail of {} at {}, {}",
        record.code,
        record.position.lat(),
        record.position.lon()
    );

    Ok(DetailContent {
        title: record.code.clone(),
        description: Some(record.description.clone()),
        directions_url: Some(config.directions_url_for(&record.position)?),
        street_view: Some(StreetView {
            position: record.position,
            heading: config.street_view.heading,
            pitch: config.street_view.pitch,
        }),
    })
}
