//! Spatial predicates and analysis operations.
//!
//! All pairwise operations require both operands to be in the same coordinate system and fail with
//! [`GeographyError::CoordinateSystemMismatch`] otherwise. Computations are planar in longitude/latitude space and
//! use the robust predicates of the `geo` crate, so touching boundaries are reported exactly.
//!
//! Results of boolean operations are simplified to the narrowest shape kind that can hold them. An empty result is
//! an empty shape with the dimension of the operation result:
//!
//! | operation               | dimension of an empty result |
//! |-------------------------|------------------------------|
//! | `intersection`          | lower of the operands        |
//! | `union`, `sym. diff.`   | higher of the operands       |
//! | `difference`            | of the first operand         |

use geo::{Intersects, Relate};

use crate::error::GeographyError;
use crate::geometry::Geography;
use crate::geometry_type::Dimension;

mod buffer;
mod convert;
mod distance;
mod overlay;
mod snap;

pub(crate) use convert::Parts;
use overlay::Operation;

impl Geography {
    /// Whether both values denote the same set of points.
    ///
    /// Ring start points, ring orientation and the order of members are ignored. Two empty values are equal.
    pub fn spatial_equals(&self, other: &Geography) -> Result<bool, GeographyError> {
        self.same_system(other)?;

        let a = Parts::of(self.geom());
        let b = Parts::of(other.geom());
        let equals = match (a.is_empty(), b.is_empty()) {
            (true, true) => true,
            (false, false) => a.to_geo().relate(&b.to_geo()).is_equal_topo(),
            _ => false,
        };

        Ok(equals)
    }

    /// Whether the values have no common points. An empty value is disjoint with everything.
    pub fn disjoint(&self, other: &Geography) -> Result<bool, GeographyError> {
        self.same_system(other)?;

        let a = Parts::of(self.geom());
        let b = Parts::of(other.geom());
        if a.is_empty() || b.is_empty() {
            return Ok(true);
        }

        Ok(!a.to_geo().intersects(&b.to_geo()))
    }

    /// Whether the values have at least one common point.
    pub fn intersects(&self, other: &Geography) -> Result<bool, GeographyError> {
        self.disjoint(other).map(|disjoint| !disjoint)
    }

    /// Shortest distance between the values in degrees, `None` if either value is empty.
    pub fn distance(&self, other: &Geography) -> Result<Option<f64>, GeographyError> {
        self.same_system(other)?;
        Ok(distance::distance(
            &Parts::of(self.geom()),
            &Parts::of(other.geom()),
        ))
    }

    /// Surface covering all points within `distance` (in degrees) of the value.
    ///
    /// A negative distance shrinks surfaces and fails with [`GeographyError::InvalidArgument`] for points and
    /// curves. If the erosion removes the whole surface, the result is an empty polygon.
    pub fn buffer(&self, distance: Option<f64>) -> Result<Geography, GeographyError> {
        let distance = crate::check::not_null(distance, "distance")?;
        let polygons = buffer::buffer(&Parts::of(self.geom()), self.dimension(), distance)?;
        let parts = Parts {
            points: vec![],
            lines: vec![],
            polygons,
        };

        Ok(Self::from_valid(
            parts.into_geom(Dimension::Surface),
            self.coordinate_system_id(),
        ))
    }

    /// Points common to both values.
    pub fn intersection(&self, other: &Geography) -> Result<Geography, GeographyError> {
        let empty_dimension = self.dimension().min(other.dimension());
        self.overlay(other, Operation::Intersection, empty_dimension)
    }

    /// Points of either value.
    pub fn union(&self, other: &Geography) -> Result<Geography, GeographyError> {
        let empty_dimension = self.dimension().max(other.dimension());
        self.overlay(other, Operation::Union, empty_dimension)
    }

    /// Points of this value that are not in `other`.
    pub fn difference(&self, other: &Geography) -> Result<Geography, GeographyError> {
        self.overlay(other, Operation::Difference, self.dimension())
    }

    /// Points that belong to exactly one of the values.
    pub fn symmetric_difference(&self, other: &Geography) -> Result<Geography, GeographyError> {
        let empty_dimension = self.dimension().max(other.dimension());
        self.overlay(other, Operation::SymmetricDifference, empty_dimension)
    }

    fn overlay(
        &self,
        other: &Geography,
        operation: Operation,
        empty_dimension: Dimension,
    ) -> Result<Geography, GeographyError> {
        self.same_system(other)?;

        let a = Parts::of(self.geom());
        let b = Parts::of(other.geom());
        let result = overlay::overlay(&a, &b, operation);

        let geom = result.into_geom(empty_dimension);
        log::debug!("{operation:?} produced {}", geom.kind());
        Ok(Self::from_valid(geom, self.coordinate_system_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::CoordinateSystemId;
    use crate::geometry_type::ShapeKind;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn geo(text: &str) -> Geography {
        Geography::from_text(text).unwrap()
    }

    fn assert_spatially_equal(actual: &Geography, expected: &str) {
        assert!(
            actual.spatial_equals(&geo(expected)).unwrap(),
            "{} is not equal to {expected}",
            actual.as_text()
        );
    }

    #[test]
    fn equality_ignores_ring_start_and_orientation() {
        let a = geo("POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))");
        let b = geo("POLYGON ((2 2, 2 0, 0 0, 0 2, 2 2))");
        assert!(a.spatial_equals(&b).unwrap());
        assert!(b.spatial_equals(&a).unwrap());
        assert!(a.spatial_equals(&a).unwrap());
    }

    #[test]
    fn equality_ignores_member_order() {
        let a = geo("MULTIPOINT ((1 1), (2 2))");
        let b = geo("GEOMETRYCOLLECTION (POINT (2 2), POINT (1 1), POINT (1 1))");
        assert!(a.spatial_equals(&b).unwrap());
    }

    #[test]
    fn touching_shapes_intersect_but_are_not_equal() {
        let a = geo("POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))");
        let b = geo("POLYGON ((1 0, 2 0, 2 1, 1 1, 1 0))");
        assert!(a.intersects(&b).unwrap());
        assert!(!a.disjoint(&b).unwrap());
        assert!(!a.spatial_equals(&b).unwrap());
    }

    #[test]
    fn empty_operands() {
        let empty = geo("POINT EMPTY");
        let point = geo("POINT (1 1)");
        assert!(empty.disjoint(&point).unwrap());
        assert!(!empty.intersects(&point).unwrap());
        assert!(empty.spatial_equals(&geo("LINESTRING EMPTY")).unwrap());
        assert!(!empty.spatial_equals(&point).unwrap());
        assert_eq!(empty.distance(&point).unwrap(), None);
    }

    #[test]
    fn coordinate_systems_must_match() {
        let a = geo("POINT (1 1)");
        let b = a.clone().with_coordinate_system_id(CoordinateSystemId::new(4269));
        assert_matches!(
            a.intersects(&b),
            Err(GeographyError::CoordinateSystemMismatch { .. })
        );
        assert_matches!(
            a.union(&b),
            Err(GeographyError::CoordinateSystemMismatch { .. })
        );
        assert_matches!(
            a.distance(&b),
            Err(GeographyError::CoordinateSystemMismatch { .. })
        );
    }

    #[test]
    fn distance_between_values() {
        let a = geo("POINT (0 0)");
        let b = geo("LINESTRING (3 -1, 3 1)");
        assert_abs_diff_eq!(a.distance(&b).unwrap().unwrap(), 3.0);
        assert_eq!(b.distance(&b).unwrap(), Some(0.0));
    }

    #[test]
    fn polygon_overlay() {
        let a = geo("POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))");
        let b = geo("POLYGON ((1 1, 3 1, 3 3, 1 3, 1 1))");

        assert_spatially_equal(
            &a.intersection(&b).unwrap(),
            "POLYGON ((1 1, 2 1, 2 2, 1 2, 1 1))",
        );
        assert_spatially_equal(
            &a.union(&b).unwrap(),
            "POLYGON ((0 0, 2 0, 2 1, 3 1, 3 3, 1 3, 1 2, 0 2, 0 0))",
        );
        assert_spatially_equal(
            &a.difference(&b).unwrap(),
            "POLYGON ((0 0, 2 0, 2 1, 1 1, 1 2, 0 2, 0 0))",
        );
        assert_spatially_equal(
            &a.symmetric_difference(&b).unwrap(),
            "MULTIPOLYGON (((0 0, 2 0, 2 1, 1 1, 1 2, 0 2, 0 0)), ((2 1, 3 1, 3 3, 1 3, 1 2, 2 2, 2 1)))",
        );
    }

    #[test]
    fn overlay_of_decimal_coordinates_is_exact() {
        let whole = geo("POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0))");
        let left = geo("POLYGON ((0 0, 3.3 0, 3.3 10, 0 10, 0 0))");
        let right = geo("POLYGON ((3.3 0, 10 0, 10 10, 3.3 10, 3.3 0))");

        assert!(left.union(&right).unwrap().spatial_equals(&whole).unwrap());

        let common = whole.intersection(&left).unwrap();
        assert_eq!(common.kind(), ShapeKind::Polygon);
        assert!(common.spatial_equals(&left).unwrap());

        let rest = whole.difference(&left).unwrap();
        assert_eq!(rest.kind(), ShapeKind::Polygon);
        assert!(rest.spatial_equals(&right).unwrap());
        assert!(whole.symmetric_difference(&left).unwrap().spatial_equals(&right).unwrap());
    }

    #[test]
    fn touching_squares_share_an_edge() {
        let west = geo("POLYGON ((-122.3 47.6, -122.2 47.6, -122.2 47.7, -122.3 47.7, -122.3 47.6))");
        let east = geo("POLYGON ((-122.2 47.6, -122.1 47.6, -122.1 47.7, -122.2 47.7, -122.2 47.6))");

        let edge = west.intersection(&east).unwrap();
        assert_eq!(edge.kind(), ShapeKind::LineString);
        assert_spatially_equal(&edge, "LINESTRING (-122.2 47.6, -122.2 47.7)");

        assert_spatially_equal(
            &west.union(&east).unwrap(),
            "POLYGON ((-122.3 47.6, -122.1 47.6, -122.1 47.7, -122.3 47.7, -122.3 47.6))",
        );
        assert!(west.difference(&east).unwrap().spatial_equals(&west).unwrap());
    }

    #[test]
    fn line_and_polygon_overlay() {
        let square = geo("POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))");
        let line = geo("LINESTRING (-1 1, 3 1)");

        assert_spatially_equal(&line.intersection(&square).unwrap(), "LINESTRING (0 1, 2 1)");
        assert_spatially_equal(
            &line.difference(&square).unwrap(),
            "MULTILINESTRING ((-1 1, 0 1), (2 1, 3 1))",
        );

        let union = line.union(&square).unwrap();
        assert_eq!(union.kind(), ShapeKind::GeometryCollection);
        assert_spatially_equal(
            &union,
            "GEOMETRYCOLLECTION (POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0)), LINESTRING (-1 1, 0 1), LINESTRING (2 1, 3 1))",
        );
    }

    #[test]
    fn crossing_lines_intersect_in_a_point() {
        let a = geo("LINESTRING (0 0, 2 2)");
        let b = geo("LINESTRING (0 2, 2 0)");
        assert_eq!(a.intersection(&b).unwrap().as_text(), "POINT (1 1)");
    }

    #[test]
    fn overlapping_lines() {
        let a = geo("LINESTRING (0 0, 2 0)");
        let b = geo("LINESTRING (1 0, 3 0)");
        assert_spatially_equal(&a.intersection(&b).unwrap(), "LINESTRING (1 0, 2 0)");
        assert_spatially_equal(&a.union(&b).unwrap(), "LINESTRING (0 0, 3 0)");
        assert_spatially_equal(&a.difference(&b).unwrap(), "LINESTRING (0 0, 1 0)");
        assert_spatially_equal(
            &a.symmetric_difference(&b).unwrap(),
            "MULTILINESTRING ((0 0, 1 0), (2 0, 3 0))",
        );
    }

    #[test]
    fn points_overlay() {
        let a = geo("MULTIPOINT ((0 0), (1 1))");
        let b = geo("LINESTRING (1 0, 1 2)");
        assert_eq!(a.intersection(&b).unwrap().as_text(), "POINT (1 1)");
        assert_eq!(a.difference(&b).unwrap().as_text(), "POINT (0 0)");
    }

    #[test]
    fn empty_results_keep_the_dimension() {
        let a = geo("POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))");
        let b = geo("POLYGON ((5 5, 6 5, 6 6, 5 6, 5 5))");
        let line = geo("LINESTRING (10 10, 11 11)");

        assert_eq!(a.intersection(&b).unwrap().as_text(), "POLYGON EMPTY");
        assert_eq!(a.intersection(&line).unwrap().as_text(), "LINESTRING EMPTY");
        assert_eq!(a.difference(&a).unwrap().as_text(), "POLYGON EMPTY");
        assert_eq!(
            geo("POINT EMPTY").union(&geo("POINT EMPTY")).unwrap().as_text(),
            "POINT EMPTY"
        );
        assert_eq!(
            geo("GEOMETRYCOLLECTION EMPTY")
                .intersection(&geo("POINT EMPTY"))
                .unwrap()
                .as_text(),
            "GEOMETRYCOLLECTION EMPTY"
        );
        assert_eq!(
            line.symmetric_difference(&line).unwrap().as_text(),
            "LINESTRING EMPTY"
        );
    }

    #[test]
    fn buffer_requires_distance() {
        let point = geo("POINT (0 0)");
        assert_matches!(
            point.buffer(None),
            Err(GeographyError::ArgumentNull { name: "distance" })
        );
        assert_matches!(
            point.buffer(Some(-1.0)),
            Err(GeographyError::InvalidArgument { .. })
        );
        assert_eq!(point.buffer(Some(1.0)).unwrap().kind(), ShapeKind::Polygon);
        assert_eq!(
            geo("POINT EMPTY").buffer(Some(1.0)).unwrap().as_text(),
            "POLYGON EMPTY"
        );
    }

    #[test]
    fn polygon_erosion_shrinks() {
        let square = geo("POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))");
        let eroded = square.buffer(Some(-1.0)).unwrap();
        assert_eq!(eroded.kind(), ShapeKind::Polygon);
        assert_abs_diff_eq!(eroded.area().unwrap(), 4.0, epsilon = 1e-9);

        assert_eq!(
            square.buffer(Some(-5.0)).unwrap().as_text(),
            "POLYGON EMPTY"
        );
    }

    #[test]
    fn results_keep_the_coordinate_system() {
        let srid = CoordinateSystemId::new(4269);
        let a = geo("POINT (1 1)").with_coordinate_system_id(srid);
        assert_eq!(a.union(&a).unwrap().coordinate_system_id(), srid);
        assert_eq!(a.buffer(Some(1.0)).unwrap().coordinate_system_id(), srid);
    }
}
