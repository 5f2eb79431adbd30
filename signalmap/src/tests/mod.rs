use signalmap_types::latlon;

use crate::dataset::Dataset;
use crate::headless::HeadlessUi;
use crate::record::{Category, IntersectionType, LocationRecord};
use crate::{SignalMap, SignalMapBuilder};

mod locate;
mod widget;

pub(crate) fn light(
    code: &str,
    description: &str,
    category: Category,
    intersection_type: IntersectionType,
    lat: f64,
    lon: f64,
) -> LocationRecord {
    LocationRecord {
        code: code.to_string(),
        description: description.to_string(),
        category,
        intersection_type,
        position: latlon!(lat, lon),
    }
}

pub(crate) fn melaka_dataset() -> Dataset {
    use Category::*;
    use IntersectionType::*;

    let lights = [
        ("TL-001", "Jalan Hang Tuah", MelakaTengah, FourWay, 2.1965, 102.2486),
        ("TL-002", "Simpang Ampat", AlorGajah, ThreeWay, 2.3585, 102.2090),
        ("TL-003", "Bandar Jasin", Jasin, FourWay, 2.3094, 102.4311),
        ("TL-004", "Ayer Keroh Toll", Slip, Roundabout, 2.2640, 102.2866),
        ("TL-005", "Jalan Tun Razak", MelakaTengah, Pedestrian, 2.2100, 102.2560),
    ];

    Dataset::new(
        lights
            .into_iter()
            .map(|(code, description, category, kind, lat, lon)| {
                light(code, description, category, kind, lat, lon)
            })
            .collect(),
    )
    .expect("valid dataset")
}

pub(crate) fn build(ui: &HeadlessUi, dataset: Dataset) -> SignalMap {
    SignalMapBuilder::new()
        .with_headless(ui)
        .build(dataset)
        .expect("failed to build widget")
}
