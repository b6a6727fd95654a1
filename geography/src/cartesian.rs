//! Planar view of coordinates used by measures (length, area, distance).

use num_traits::Float;

/// Point with two planar coordinates.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Float;

    /// X coordinate (longitude).
    fn x(&self) -> Self::Num;
    /// Y coordinate (latitude).
    fn y(&self) -> Self::Num;

    /// Whether both coordinates are exactly equal.
    fn equal(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }

    /// Vector from `other` to `self`.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vec2d<Self::Num> {
        Vec2d {
            dx: self.x() - other.x(),
            dy: self.y() - other.y(),
        }
    }

    /// Squared euclidean distance between the points.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        self.sub(other).length_sq()
    }

    /// Euclidean distance between the points.
    fn distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        self.distance_sq(other).sqrt()
    }
}

impl<T: geo_types::CoordFloat> CartesianPoint2d for geo_types::Coord<T> {
    type Num = T;

    fn x(&self) -> T {
        self.x
    }

    fn y(&self) -> T {
        self.y
    }
}

/// Difference between two points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2d<Num> {
    /// X component.
    pub dx: Num,
    /// Y component.
    pub dy: Num,
}

impl<Num: Float> Vec2d<Num> {
    /// Squared length of the vector.
    pub fn length_sq(&self) -> Num {
        self.dx * self.dx + self.dy * self.dy
    }
}
