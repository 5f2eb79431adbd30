//! Feature catalog: every loaded traffic light with its marker, list row and display state.

use crate::display::{MarkerHandle, RowHandle};
use crate::record::LocationRecord;

/// In-memory list of all traffic lights of a session.
///
/// Every [`LocationRecord`] gets exactly one [`CatalogEntry`] when the widget is built. Entries are
/// never removed, and their index is stable for the lifetime of the catalog. The catalog is the
/// single source of truth for which lights are currently visible and which one is active.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// A traffic light together with its display state.
#[derive(Debug)]
pub struct CatalogEntry {
    record: LocationRecord,
    display_text: String,
    visible: bool,
    active: bool,
    marker: MarkerHandle,
    row: RowHandle,
}

impl CatalogEntry {
    /// Creates a visible, inactive entry.
    pub fn new(record: LocationRecord, marker: MarkerHandle, row: RowHandle) -> Self {
        Self {
            display_text: record.display_text(),
            record,
            visible: true,
            active: false,
            marker,
            row,
        }
    }

    /// The traffic light.
    pub fn record(&self) -> &LocationRecord {
        &self.record
    }

    /// Text of the list row, as the user sees it.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Returns true if the entry passed the last filter pass.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true if the entry is the highlighted one.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marker of the entry on the map.
    pub fn marker(&self) -> MarkerHandle {
        self.marker
    }

    /// Row of the entry in the list.
    pub fn row(&self) -> RowHandle {
        self.row
    }

    /// Sets the visibility flag, returning true if it changed.
    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Catalog {
    /// Creates a catalog from entries in display order.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Adds an entry at the end of the list.
    pub fn push(&mut self, entry: CatalogEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of visible entries.
    pub fn visible_count(&self) -> usize {
        self.iter_visible().count()
    }

    /// Returns the entry at the index, or `None` if the index is out of range.
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut CatalogEntry> {
        self.entries.get_mut(index)
    }

    /// Iterates over the entries in display order together with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &CatalogEntry)> {
        self.entries.iter().enumerate()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut CatalogEntry)> {
        self.entries.iter_mut().enumerate()
    }

    /// Iterates over the visible entries in display order together with their indices.
    pub fn iter_visible(&self) -> impl Iterator<Item = (usize, &CatalogEntry)> {
        self.iter().filter(|(_, entry)| entry.is_visible())
    }

    /// Index of the entry owning the marker.
    pub fn find_by_marker(&self, marker: MarkerHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.marker == marker)
    }

    /// Index of the entry owning the list row.
    pub fn find_by_row(&self, row: RowHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.row == row)
    }

    /// Index of the entry with the given code.
    pub fn find_by_code(&self, code: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.record.code == code)
    }

    /// Codes of the visible entries in display order.
    pub fn visible_codes(&self) -> Vec<&str> {
        self.iter_visible()
            .map(|(_, entry)| entry.record.code.as_str())
            .collect()
    }
}
