//! Filter engine: decides which catalog entries are visible.
//!
//! An entry is visible only if it passes all three predicates of the [`FilterState`] at once:
//! the category set, the intersection type set and the search text. An empty set or an empty
//! search text does not restrict anything.

use ahash::AHashSet;

use crate::catalog::{Catalog, CatalogEntry};
use crate::record::{Category, IntersectionType};

/// Current state of the filter controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    search_text: String,
    categories: AHashSet<Category>,
    intersection_types: AHashSet<IntersectionType>,
}

impl FilterState {
    /// Filter that shows everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search text as typed by the user.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Selected categories.
    pub fn categories(&self) -> &AHashSet<Category> {
        &self.categories
    }

    /// Selected intersection types.
    pub fn intersection_types(&self) -> &AHashSet<IntersectionType> {
        &self.intersection_types
    }

    /// Replaces the search text.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Clears the search text, keeping the selected tags.
    pub fn clear_search_text(&mut self) {
        self.search_text.clear();
    }

    /// Selects or deselects the category.
    pub fn set_category(&mut self, category: Category, selected: bool) {
        if selected {
            self.categories.insert(category);
        } else {
            self.categories.remove(&category);
        }
    }

    /// Selects or deselects the intersection type.
    pub fn set_intersection_type(&mut self, intersection_type: IntersectionType, selected: bool) {
        if selected {
            self.intersection_types.insert(intersection_type);
        } else {
            self.intersection_types.remove(&intersection_type);
        }
    }

    /// Builder-style variant of [`FilterState::set_category`].
    pub fn with_category(mut self, category: Category) -> Self {
        self.set_category(category, true);
        self
    }

    /// Builder-style variant of [`FilterState::set_intersection_type`].
    pub fn with_intersection_type(mut self, intersection_type: IntersectionType) -> Self {
        self.set_intersection_type(intersection_type, true);
        self
    }

    /// Builder-style variant of [`FilterState::set_search_text`].
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.set_search_text(text);
        self
    }

    /// Resets every control.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Returns true if the entry passes all three predicates.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.matches_category(entry.record().category)
            && self.matches_intersection_type(entry.record().intersection_type)
            && self.matches_text(entry.display_text())
    }

    fn matches_category(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }

    fn matches_intersection_type(&self, intersection_type: IntersectionType) -> bool {
        self.intersection_types.is_empty() || self.intersection_types.contains(&intersection_type)
    }

    fn matches_text(&self, display_text: &str) -> bool {
        self.search_text.is_empty()
            || display_text
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }
}

/// Result of a filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Indices of the entries whose visibility flipped.
    pub changed: Vec<usize>,
    /// Number of visible entries after the pass.
    pub visible: usize,
}

/// Recomputes the visibility of every entry in the catalog.
///
/// Runs over the whole catalog every time. Applying the same state twice leaves the visibility set
/// unchanged, and the second pass reports no changes.
pub fn apply_filters(catalog: &mut Catalog, state: &FilterState) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for (index, entry) in catalog.iter_mut() {
        let visible = state.matches(entry);
        if entry.set_visible(visible) {
            outcome.changed.push(index);
        }

        if visible {
            outcome.visible += 1;
        }
    }

    log::debug!(
        "Filter pass: {} of {} entries visible, {} changed",
        outcome.visible,
        catalog.len(),
        outcome.changed.len()
    );

    outcome
}
