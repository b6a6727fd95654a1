//! Kind-specific read-only views of a [`Geography`] value.
//!
//! Accessors that don't apply to the kind of the value return `None` instead of failing, so members of a
//! heterogeneous collection can be queried without checking their kind first. Index based accessors fail with
//! [`GeographyError::IndexOutOfRange`] only when the kind applies but the index does not.

use geo::Area;

use crate::contour::Contour;
use crate::coordinate::Coordinate;
use crate::error::GeographyError;
use crate::geometry::{Geom, Geography};
use crate::geometry_type::Dimension;
use crate::ops::Parts;
use crate::point::Point;

impl Geography {
    /// Number of members of a collection kind (`Multi*` or geometry collection).
    pub fn element_count(&self) -> Option<usize> {
        match self.geom() {
            Geom::MultiPoint(v) => Some(v.parts().len()),
            Geom::MultiLineString(v) => Some(v.parts().len()),
            Geom::MultiPolygon(v) => Some(v.parts().len()),
            Geom::GeometryCollection(members) => Some(members.len()),
            _ => None,
        }
    }

    /// Member of a collection kind at the given zero-based index.
    pub fn element_at(&self, index: usize) -> Result<Option<Geography>, GeographyError> {
        let Some(count) = self.element_count() else {
            return Ok(None);
        };

        if index >= count {
            return Err(GeographyError::IndexOutOfRange { index, count });
        }

        let member = match self.geom() {
            Geom::MultiPoint(v) => Geom::Point(v.parts()[index]),
            Geom::MultiLineString(v) => Geom::LineString(v.parts()[index].clone()),
            Geom::MultiPolygon(v) => Geom::Polygon(v.parts()[index].clone()),
            Geom::GeometryCollection(members) => members[index].clone(),
            _ => return Ok(None),
        };

        Ok(Some(Self::from_valid(member, self.coordinate_system_id())))
    }

    fn point_coordinate(&self) -> Option<&Coordinate> {
        match self.geom() {
            Geom::Point(point) => point.coordinate(),
            _ => None,
        }
    }

    /// Latitude of a non-empty point.
    pub fn latitude(&self) -> Option<f64> {
        self.point_coordinate().map(Coordinate::latitude)
    }

    /// Longitude of a non-empty point.
    pub fn longitude(&self) -> Option<f64> {
        self.point_coordinate().map(Coordinate::longitude)
    }

    /// Elevation of a non-empty point, if the point has one.
    pub fn elevation(&self) -> Option<f64> {
        self.point_coordinate().and_then(Coordinate::elevation)
    }

    /// Measure of a non-empty point, if the point has one.
    pub fn measure(&self) -> Option<f64> {
        self.point_coordinate().and_then(Coordinate::measure)
    }

    /// Planar length in degrees.
    ///
    /// Points have zero length, curves the sum of their segments. Surfaces, and collections containing them,
    /// have no length.
    pub fn length(&self) -> Option<f64> {
        let mut length = 0.0;
        let mut stack = vec![self.geom()];
        while let Some(geom) = stack.pop() {
            match geom {
                Geom::Point(_) | Geom::MultiPoint(_) => {}
                Geom::LineString(v) => length += v.length(),
                Geom::MultiLineString(v) => length += v.length(),
                Geom::Polygon(_) | Geom::MultiPolygon(_) => return None,
                Geom::GeometryCollection(members) => stack.extend(members),
            }
        }

        Some(length)
    }

    /// Planar area in square degrees of a surface, or of a collection of dimension 2.
    ///
    /// Surfaces of a collection that overlap are counted once.
    pub fn area(&self) -> Option<f64> {
        if self.dimension() != Dimension::Surface {
            return None;
        }

        match self.geom() {
            Geom::Polygon(v) => Some(v.area()),
            geom => Some(Parts::of(geom).polygons.unsigned_area()),
        }
    }

    fn curve_positions(&self) -> Option<Vec<&Coordinate>> {
        match self.geom() {
            Geom::LineString(v) => Some(v.positions().iter().collect()),
            Geom::MultiLineString(v) => Some(v.positions().collect()),
            _ => None,
        }
    }

    /// First position of a non-empty curve.
    pub fn start_point(&self) -> Option<Geography> {
        let positions = self.curve_positions()?;
        let first = positions.first()?;
        Some(self.point_value(**first))
    }

    /// Last position of a non-empty curve.
    pub fn end_point(&self) -> Option<Geography> {
        let positions = self.curve_positions()?;
        let last = positions.last()?;
        Some(self.point_value(**last))
    }

    /// Whether a curve is closed. A multi line string is closed if it has members and all of them are closed.
    pub fn is_closed(&self) -> Option<bool> {
        match self.geom() {
            Geom::LineString(v) => Some(v.is_closed()),
            Geom::MultiLineString(v) => Some(
                !v.parts().is_empty() && v.parts().iter().all(|line| line.is_closed()),
            ),
            _ => None,
        }
    }

    /// Number of positions of a line string.
    pub fn point_count(&self) -> Option<usize> {
        match self.geom() {
            Geom::LineString(v) => Some(v.positions().len()),
            _ => None,
        }
    }

    /// Position of a line string at the given zero-based index as a point value.
    pub fn point_at(&self, index: usize) -> Result<Option<Geography>, GeographyError> {
        let Geom::LineString(line) = self.geom() else {
            return Ok(None);
        };

        match line.positions().get(index) {
            Some(position) => Ok(Some(self.point_value(*position))),
            None => Err(GeographyError::IndexOutOfRange {
                index,
                count: line.positions().len(),
            }),
        }
    }

    fn point_value(&self, coordinate: Coordinate) -> Geography {
        Self::from_valid(Geom::Point(Point::new(coordinate)), self.coordinate_system_id())
    }
}
