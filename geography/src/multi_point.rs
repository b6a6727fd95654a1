//! Set of points.

use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, Layout};
use crate::point::Point;

/// A set of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
    parts: Vec<Point>,
}

impl MultiPoint {
    /// Creates a new multipoint.
    pub fn new(parts: Vec<Point>) -> Self {
        Self { parts }
    }

    /// Returns the points.
    pub fn parts(&self) -> &[Point] {
        &self.parts
    }

    /// Iterates over positions of the non-empty points.
    pub fn positions(&self) -> impl Iterator<Item = &'_ Coordinate> {
        self.parts.iter().filter_map(Point::coordinate)
    }

    /// Whether none of the points has a position.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(Point::is_empty)
    }

    /// Ordinates carried by the positions.
    pub fn layout(&self) -> Layout {
        Layout::of(self.positions())
    }
}

impl From<Vec<Point>> for MultiPoint {
    fn from(parts: Vec<Point>) -> Self {
        Self { parts }
    }
}

impl From<Vec<Coordinate>> for MultiPoint {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self {
            parts: coordinates.into_iter().map(Point::new).collect(),
        }
    }
}
