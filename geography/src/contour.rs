//! Contour is a sequence of positions connected by straight segments.
//!
//! Two contour types exist:
//! * [`LineString`] - an open or closed curve. A non-empty line string has at least two positions.
//! * [`LinearRing`] - a closed curve bounding a part of a [`Polygon`](crate::Polygon). It has at least
//!   four positions and its first position equals its last one.
//!
//! Unlike some other representations, closed contours here store the closing position explicitly, the same way
//! the interchange formats do.

use std::ops::Deref;

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::cartesian::CartesianPoint2d;
use crate::coordinate::{Coordinate, Layout};
use crate::error::GeographyError;
use crate::segment::Segment;

/// Sequence of positions. See module level documentation for details.
pub trait Contour {
    /// All positions of the contour, including the closing one for closed contours.
    fn positions(&self) -> &[Coordinate];

    /// Whether the contour is closed: it is not empty and its first and last positions coincide.
    fn is_closed(&self) -> bool {
        match (self.positions().first(), self.positions().last()) {
            (Some(first), Some(last)) => self.positions().len() > 1 && first.equal(last),
            _ => false,
        }
    }

    /// Iterates over segments of the contour.
    fn iter_segments(&self) -> impl Iterator<Item = Segment<'_, Coordinate>> {
        self.positions().windows(2).map(|w| Segment(&w[0], &w[1]))
    }

    /// Planar length of the contour in coordinate units.
    fn length(&self) -> f64 {
        self.iter_segments().map(|s| s.length()).sum()
    }

    /// Ordinates carried by the positions.
    fn layout(&self) -> Layout {
        Layout::of(self.positions())
    }
}

/// Open or closed curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct LineString {
    points: Vec<Coordinate>,
}

impl LineString {
    /// Creates a new line string. Fails if exactly one position is given.
    pub fn new(points: Vec<Coordinate>) -> Result<Self, GeographyError> {
        Self::validate(&points).map_err(|reason| GeographyError::invalid_argument("points", reason))?;
        Ok(Self { points })
    }

    /// Line string without positions.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_valid(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub(crate) fn validate(points: &[Coordinate]) -> Result<(), &'static str> {
        if points.len() == 1 {
            Err("line string must have no positions or at least 2 positions")
        } else {
            Ok(())
        }
    }

    /// Whether the line string has no positions.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns positions of the line string.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }
}

impl Deref for LineString {
    type Target = [Coordinate];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl Contour for LineString {
    fn positions(&self) -> &[Coordinate] {
        &self.points
    }
}

/// Closed curve bounding a polygon or one of its holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct LinearRing {
    points: Vec<Coordinate>,
}

impl LinearRing {
    /// Creates a new ring. Fails unless there are at least 4 positions and the first one equals the last one.
    pub fn new(points: Vec<Coordinate>) -> Result<Self, GeographyError> {
        Self::validate(&points).map_err(|reason| GeographyError::invalid_argument("points", reason))?;
        Ok(Self { points })
    }

    pub(crate) fn from_valid(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub(crate) fn validate(points: &[Coordinate]) -> Result<(), &'static str> {
        if points.len() < 4 {
            return Err("ring must have at least 4 positions");
        }

        let (first, last) = (&points[0], &points[points.len() - 1]);
        if !first.equal(last) {
            return Err("ring is not closed");
        }

        Ok(())
    }

    /// Signed planar area enclosed by the ring: positive for counterclockwise rings.
    pub fn area_signed(&self) -> f64 {
        let aggr = self
            .points
            .windows(2)
            .fold(f64::zero(), |aggr, w| {
                aggr + w[0].x() * w[1].y() - w[1].x() * w[0].y()
            });

        aggr / 2.0
    }

    /// Returns positions of the ring.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }
}

impl Deref for LinearRing {
    type Target = [Coordinate];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl Contour for LinearRing {
    fn positions(&self) -> &[Coordinate] {
        &self.points
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl TryFrom<Vec<Coordinate>> for LineString {
    type Error = GeographyError;

    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<LineString> for Vec<Coordinate> {
    fn from(value: LineString) -> Self {
        value.points
    }
}

impl TryFrom<Vec<Coordinate>> for LinearRing {
    type Error = GeographyError;

    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<LinearRing> for Vec<Coordinate> {
    fn from(value: LinearRing) -> Self {
        value.points
    }
}

impl From<LinearRing> for LineString {
    fn from(value: LinearRing) -> Self {
        Self {
            points: value.points,
        }
    }
}
