//! Point shape.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Point geometry. An empty point has no coordinate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point(Option<Coordinate>);

impl Point {
    /// Creates a new point at the given position.
    pub const fn new(coordinate: Coordinate) -> Self {
        Self(Some(coordinate))
    }

    /// Point without a position.
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Position of the point, `None` for empty points.
    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.0.as_ref()
    }

    /// Whether the point has no position.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Coordinate> for Point {
    fn from(value: Coordinate) -> Self {
        Self::new(value)
    }
}

impl From<Option<Coordinate>> for Point {
    fn from(value: Option<Coordinate>) -> Self {
        Self(value)
    }
}
