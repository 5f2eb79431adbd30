//! Nearest-point locator over the visible catalog entries.
//!
//! Distances are great-circle distances on a spherical Earth, see
//! [`GeoPoint::distance_to`](signalmap_types::GeoPoint::distance_to).

use signalmap_types::{GeoPoint, GeoPoint2d};

use crate::catalog::Catalog;

/// The visible catalog entry closest to a reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Index of the entry in the catalog.
    pub index: usize,
    /// Great-circle distance from the reference point in meters.
    pub distance_m: f64,
}

impl Nearest {
    /// Distance in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }
}

/// Finds the visible entry with the smallest great-circle distance to `reference`.
///
/// Hidden entries are skipped. When several entries are at exactly the same distance, the one that
/// comes first in the catalog wins. Returns `None` if nothing is visible.
pub fn find_nearest_visible(reference: &GeoPoint2d, catalog: &Catalog) -> Option<Nearest> {
    let mut nearest: Option<Nearest> = None;

    for (index, entry) in catalog.iter_visible() {
        let distance_m = reference.distance_to(&entry.record().position);
        let closer = match nearest {
            Some(best) => distance_m < best.distance_m,
            None => true,
        };

        if closer {
            nearest = Some(Nearest { index, distance_m });
        }
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{catalog_of, record};
    use crate::filter::{apply_filters, FilterState};
    use crate::record::{Category, IntersectionType};
    use approx::assert_relative_eq;
    use signalmap_types::latlon;

    #[test]
    fn empty_catalog() {
        let catalog = catalog_of(vec![]);
        assert_eq!(find_nearest_visible(&latlon!(0.0, 0.0), &catalog), None);
    }

    #[test]
    fn nothing_visible() {
        let mut catalog = catalog_of(vec![record(
            "A",
            "",
            Category::Jasin,
            IntersectionType::FourWay,
            latlon!(0.0, 0.0),
        )]);
        apply_filters(&mut catalog, &FilterState::new().with_search_text("nothing"));

        assert_eq!(find_nearest_visible(&latlon!(0.0, 0.0), &catalog), None);
    }

    #[test]
    fn single_visible_entry_wins_regardless_of_distance() {
        let mut catalog = catalog_of(vec![
            record("NEAR", "", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, 0.001)),
            record("FAR", "", Category::Slip, IntersectionType::FourWay, latlon!(60.0, 120.0)),
        ]);
        apply_filters(&mut catalog, &FilterState::new().with_category(Category::Slip));

        let nearest = find_nearest_visible(&latlon!(0.0, 0.0), &catalog).expect("one visible");
        assert_eq!(nearest.index, 1);
    }

    #[test]
    fn picks_smaller_great_circle_distance() {
        let catalog = catalog_of(vec![
            record("TWO", "", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, 2.0)),
            record("ONE", "", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, 1.0)),
        ]);

        let nearest = find_nearest_visible(&latlon!(0.0, 0.0), &catalog).expect("entries visible");
        assert_eq!(nearest.index, 1);
        assert_relative_eq!(nearest.distance_km(), 111.195, epsilon = 1e-3);
    }

    #[test]
    fn ties_keep_first_seen() {
        // Mirror images around the reference point are at exactly the same distance.
        let catalog = catalog_of(vec![
            record("EAST", "", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, 1.0)),
            record("WEST", "", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, -1.0)),
            record("EAST-AGAIN", "", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, 1.0)),
        ]);

        for _ in 0..10 {
            let nearest =
                find_nearest_visible(&latlon!(0.0, 0.0), &catalog).expect("entries visible");
            assert_eq!(nearest.index, 0);
        }
    }

    #[test]
    fn hidden_entries_are_skipped() {
        let mut catalog = catalog_of(vec![
            record(
                "CLOSE",
                "hidden",
                Category::Jasin,
                IntersectionType::FourWay,
                latlon!(0.0, 0.5),
            ),
            record("MID", "shown", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, 1.0)),
            record("FAR", "shown", Category::Jasin, IntersectionType::FourWay, latlon!(0.0, 2.0)),
        ]);
        apply_filters(&mut catalog, &FilterState::new().with_search_text("shown"));

        let nearest = find_nearest_visible(&latlon!(0.0, 0.0), &catalog).expect("entries visible");
        assert_eq!(nearest.index, 1);
    }
}
