use serde::{Deserialize, Serialize};

use crate::geo_point::{GeoPoint, GeoPoint2d, NewGeoPoint};

/// Rectangular geographic region given by its south-west and north-east corners.
///
/// Used both as the viewport that frames a map and as the region that search requests are biased
/// towards. Regions crossing the antimeridian are not supported.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl GeoRect {
    /// Creates a rectangle from two opposite corners given in any order.
    pub fn new(a: &impl GeoPoint<Num = f64>, b: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            south: a.lat().min(b.lat()),
            west: a.lon().min(b.lon()),
            north: a.lat().max(b.lat()),
            east: a.lon().max(b.lon()),
        }
    }

    /// Smallest rectangle containing all the given points. Returns `None` for an empty iterator.
    pub fn from_points<'a, P>(points: impl IntoIterator<Item = &'a P>) -> Option<Self>
    where
        P: GeoPoint<Num = f64> + 'a,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Self::new(first, first);

        Some(iter.fold(init, |rect, p| rect.merge(Self::new(p, p))))
    }

    /// South-west corner.
    pub fn south_west(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(self.south, self.west)
    }

    /// North-east corner.
    pub fn north_east(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(self.north, self.east)
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Center of the rectangle.
    pub fn center(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Returns true if the point lies inside the rectangle or on its border.
    pub fn contains(&self, point: &impl GeoPoint<Num = f64>) -> bool {
        (self.south..=self.north).contains(&point.lat())
            && (self.west..=self.east).contains(&point.lon())
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }
}
