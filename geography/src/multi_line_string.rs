//! Set of line strings.

use serde::{Deserialize, Serialize};

use crate::contour::{Contour, LineString};
use crate::coordinate::{Coordinate, Layout};

/// A set of line strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
    parts: Vec<LineString>,
}

impl MultiLineString {
    /// Creates a new multi line string.
    pub fn new(parts: Vec<LineString>) -> Self {
        Self { parts }
    }

    /// Returns the line strings.
    pub fn parts(&self) -> &[LineString] {
        &self.parts
    }

    /// Iterates over positions of all line strings.
    pub fn positions(&self) -> impl Iterator<Item = &'_ Coordinate> {
        self.parts.iter().flat_map(|line| line.positions().iter())
    }

    /// Whether none of the line strings has positions.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(LineString::is_empty)
    }

    /// Sum of the lengths of all line strings.
    pub fn length(&self) -> f64 {
        self.parts.iter().map(Contour::length).sum()
    }

    /// Ordinates carried by the positions.
    pub fn layout(&self) -> Layout {
        Layout::of(self.positions())
    }
}

impl From<Vec<LineString>> for MultiLineString {
    fn from(parts: Vec<LineString>) -> Self {
        Self { parts }
    }
}
