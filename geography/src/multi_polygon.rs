//! Set of polygons.

use serde::{Deserialize, Serialize};

use crate::coordinate::{Coordinate, Layout};
use crate::polygon::Polygon;

/// A set of polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    parts: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a new multipolygon.
    pub fn new(parts: Vec<Polygon>) -> Self {
        Self { parts }
    }

    /// Returns the polygons.
    pub fn parts(&self) -> &[Polygon] {
        &self.parts
    }

    /// Iterates over positions of all polygons.
    pub fn positions(&self) -> impl Iterator<Item = &'_ Coordinate> {
        self.parts.iter().flat_map(Polygon::positions)
    }

    /// Whether none of the polygons has rings.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(Polygon::is_empty)
    }

    /// Sum of the areas of all polygons.
    pub fn area(&self) -> f64 {
        self.parts.iter().map(Polygon::area).sum()
    }

    /// Ordinates carried by the positions.
    pub fn layout(&self) -> Layout {
        Layout::of(self.positions())
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(parts: Vec<Polygon>) -> Self {
        Self { parts }
    }
}
