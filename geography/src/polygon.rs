//! Polygon shape.

use geo::Validation;
use serde::{Deserialize, Serialize};

use crate::contour::{Contour, LinearRing};
use crate::coordinate::{Coordinate, Layout};
use crate::error::GeographyError;
use crate::segment::Segment;

/// Polygon geometry. Polygon consists of one exterior ring, and zero or more interior rings.
///
/// Interior rings represent *holes* in the polygon. An empty polygon has no rings at all.
///
/// Rings of a polygon never cross themselves or each other, and every hole lies inside the exterior ring. Rings
/// may only touch at isolated points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LinearRing>", into = "Vec<LinearRing>")]
pub struct Polygon {
    rings: Vec<LinearRing>,
}

impl Polygon {
    /// Creates a new polygon.
    ///
    /// Fails with [`GeographyError::InvalidArgument`] if a ring crosses itself, a hole is not inside the exterior
    /// ring, or two rings share a segment or an area.
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Result<Self, GeographyError> {
        let mut rings = Vec::with_capacity(interiors.len() + 1);
        rings.push(exterior);
        rings.extend(interiors);

        Self::validate(&rings).map_err(|reason| GeographyError::invalid_argument("rings", reason))?;
        Ok(Self { rings })
    }

    /// Polygon without any rings.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_rings(rings: Vec<LinearRing>) -> Self {
        Self { rings }
    }

    /// Checks how the rings relate to each other. Every ring must already be a valid [`LinearRing`].
    pub(crate) fn validate(rings: &[LinearRing]) -> Result<(), String> {
        let Some((exterior, interiors)) = rings.split_first() else {
            return Ok(());
        };

        let polygon = geo_types::Polygon::new(
            to_geo_ring(exterior),
            interiors.iter().map(to_geo_ring).collect(),
        );
        polygon.check_validation().map_err(|err| err.to_string())
    }

    /// Whether the polygon has no rings.
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Exterior ring of the polygon, `None` for empty polygons.
    pub fn exterior(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    /// Iterates over interior rings.
    pub fn interiors(&self) -> impl Iterator<Item = &'_ LinearRing> {
        self.rings.iter().skip(1)
    }

    /// Iterates over all rings of the polygon starting with the exterior one.
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    /// Iterates over all segments of the polygon rings.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_, Coordinate>> {
        self.rings.iter().flat_map(LinearRing::iter_segments)
    }

    /// Iterates over all positions of all rings.
    pub fn positions(&self) -> impl Iterator<Item = &'_ Coordinate> {
        self.rings.iter().flat_map(|ring| ring.positions().iter())
    }

    /// Planar area of the exterior ring minus the holes.
    pub fn area(&self) -> f64 {
        let Some(exterior) = self.exterior() else {
            return 0.0;
        };

        let holes: f64 = self.interiors().map(|r| r.area_signed().abs()).sum();
        (exterior.area_signed().abs() - holes).max(0.0)
    }

    /// Ordinates carried by the positions.
    pub fn layout(&self) -> Layout {
        Layout::of(self.positions())
    }
}

impl TryFrom<Vec<LinearRing>> for Polygon {
    type Error = GeographyError;

    fn try_from(rings: Vec<LinearRing>) -> Result<Self, Self::Error> {
        Self::validate(&rings).map_err(|reason| GeographyError::invalid_argument("rings", reason))?;
        Ok(Self { rings })
    }
}

impl From<Polygon> for Vec<LinearRing> {
    fn from(value: Polygon) -> Self {
        value.rings
    }
}

fn to_geo_ring(ring: &LinearRing) -> geo_types::LineString {
    ring.iter()
        .map(|c| geo_types::Coord {
            x: c.longitude(),
            y: c.latitude(),
        })
        .collect()
}
