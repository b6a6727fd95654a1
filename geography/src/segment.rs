//! Straight line segments.

use num_traits::{Float, One, Zero};

use crate::cartesian::CartesianPoint2d;

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<P: CartesianPoint2d> Segment<'_, P> {
    /// Length of the segment.
    pub fn length(&self) -> P::Num {
        self.0.distance(self.1)
    }

    /// Shortest euclidean distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value is the squared length
    ///   of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned value is the smaller one
    ///   of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq<Point: CartesianPoint2d<Num = P::Num>>(
        &self,
        point: &Point,
    ) -> P::Num {
        if self.0.equal(self.1) {
            return self.0.distance_sq(point);
        }

        let ds = self.1.sub(self.0);
        let dp = point.sub(self.0);
        let ds_len = ds.length_sq();

        let r = (dp.dx * ds.dx + dp.dy * ds.dy) / ds_len;
        if r <= P::Num::zero() {
            self.0.distance_sq(point)
        } else if r >= P::Num::one() {
            self.1.distance_sq(point)
        } else {
            let s = (dp.dy * ds.dx - dp.dx * ds.dy) / ds_len;
            (s * s) * ds_len
        }
    }

    /// Shortest distance (squared) between two segments that have no common point.
    ///
    /// For non-intersecting segments the closest pair of points always includes an endpoint of one of
    /// them, so checking the four endpoints is enough. Callers must rule out intersection first.
    pub fn distance_to_disjoint_segment_sq<Point: CartesianPoint2d<Num = P::Num>>(
        &self,
        other: &Segment<'_, Point>,
    ) -> P::Num {
        [
            self.distance_to_point_sq(other.0),
            self.distance_to_point_sq(other.1),
            other.distance_to_point_sq(self.0),
            other.distance_to_point_sq(self.1),
        ]
        .into_iter()
        .fold(P::Num::infinity(), P::Num::min)
    }
}
