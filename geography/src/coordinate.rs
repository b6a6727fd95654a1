//! Coordinate tuples.

use serde::{Deserialize, Serialize};

use crate::cartesian::CartesianPoint2d;

/// Position on the reference surface: longitude, latitude and optional elevation and measure.
///
/// A `NaN` elevation or measure is not a value: constructors store it as absent, so two
/// coordinates compare equal iff all their present ordinates are equal.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
    z: Option<f64>,
    m: Option<f64>,
}

impl Coordinate {
    /// Creates a two-dimensional coordinate.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            z: None,
            m: None,
        }
    }

    /// Creates a coordinate from all ordinates. `NaN` or missing elevation/measure are stored as absent.
    pub fn from_ordinates(lon: f64, lat: f64, z: Option<f64>, m: Option<f64>) -> Self {
        Self {
            lon,
            lat,
            z: z.filter(|v| !v.is_nan()),
            m: m.filter(|v| !v.is_nan()),
        }
    }

    /// Checks ordinates read from an interchange format: longitude and latitude must be finite, elevation and
    /// measure must be finite or `NaN`.
    pub(crate) fn check_ordinates(
        lon: f64,
        lat: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<(), &'static str> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err("longitude and latitude must be finite");
        }

        if z.into_iter().chain(m).any(f64::is_infinite) {
            return Err("elevation and measure must be finite");
        }

        Ok(())
    }

    /// Whether all present ordinates are finite.
    pub fn is_finite(&self) -> bool {
        [Some(self.lon), Some(self.lat), self.z, self.m]
            .into_iter()
            .flatten()
            .all(f64::is_finite)
    }

    /// Returns a copy of the coordinate with the given elevation.
    pub fn with_elevation(self, z: f64) -> Self {
        Self::from_ordinates(self.lon, self.lat, Some(z), self.m)
    }

    /// Returns a copy of the coordinate with the given measure.
    pub fn with_measure(self, m: f64) -> Self {
        Self::from_ordinates(self.lon, self.lat, self.z, Some(m))
    }

    /// Longitude (x ordinate).
    pub fn longitude(&self) -> f64 {
        self.lon
    }

    /// Latitude (y ordinate).
    pub fn latitude(&self) -> f64 {
        self.lat
    }

    /// Elevation (z ordinate), if present.
    pub fn elevation(&self) -> Option<f64> {
        self.z
    }

    /// Measure (m ordinate), if present.
    pub fn measure(&self) -> Option<f64> {
        self.m
    }

    /// Drops elevation and measure.
    pub fn xy(&self) -> Self {
        Self::new(self.lon, self.lat)
    }

    /// Ordinates present in this coordinate.
    pub fn layout(&self) -> Layout {
        Layout {
            has_z: self.z.is_some(),
            has_m: self.m.is_some(),
        }
    }

    /// Ordinates of the coordinate in the given layout. Missing ordinates are filled with `NaN`.
    pub(crate) fn ordinates(&self, layout: Layout) -> impl Iterator<Item = f64> {
        let z = layout.has_z.then(|| self.z.unwrap_or(f64::NAN));
        let m = layout.has_m.then(|| self.m.unwrap_or(f64::NAN));
        [Some(self.lon), Some(self.lat), z, m].into_iter().flatten()
    }
}

impl CartesianPoint2d for Coordinate {
    type Num = f64;

    fn x(&self) -> f64 {
        self.lon
    }

    fn y(&self) -> f64 {
        self.lat
    }
}

/// Set of optional ordinates carried by coordinates of a geometry.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
    /// Elevation is present.
    pub has_z: bool,
    /// Measure is present.
    pub has_m: bool,
}

impl Layout {
    /// Longitude and latitude only.
    pub const XY: Layout = Layout {
        has_z: false,
        has_m: false,
    };
    /// With elevation.
    pub const XYZ: Layout = Layout {
        has_z: true,
        has_m: false,
    };
    /// With measure.
    pub const XYM: Layout = Layout {
        has_z: false,
        has_m: true,
    };
    /// With elevation and measure.
    pub const XYZM: Layout = Layout {
        has_z: true,
        has_m: true,
    };

    /// Number of ordinates per coordinate.
    pub fn ordinate_count(self) -> usize {
        2 + usize::from(self.has_z) + usize::from(self.has_m)
    }

    /// Layout that can hold coordinates of both `self` and `other`.
    pub fn merge(self, other: Layout) -> Layout {
        Layout {
            has_z: self.has_z || other.has_z,
            has_m: self.has_m || other.has_m,
        }
    }

    /// Layout of the given coordinates.
    pub fn of<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Layout {
        coords
            .into_iter()
            .fold(Layout::XY, |acc, c| acc.merge(c.layout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_ordinates_are_absent() {
        let c = Coordinate::from_ordinates(1.0, 2.0, Some(f64::NAN), Some(3.0));
        assert_eq!(c.elevation(), None);
        assert_eq!(c.measure(), Some(3.0));
        assert_eq!(c.layout(), Layout::XYM);
        assert_eq!(c, Coordinate::new(1.0, 2.0).with_measure(3.0));
    }

    #[test]
    fn ordinates_fill_missing_values() {
        let c = Coordinate::new(1.0, 2.0).with_elevation(5.0);
        assert_eq!(c.ordinates(Layout::XYZ).collect::<Vec<_>>(), vec![1.0, 2.0, 5.0]);

        let ordinates = c.ordinates(Layout::XYZM).collect::<Vec<_>>();
        assert_eq!(ordinates.len(), 4);
        assert!(ordinates[3].is_nan());
    }

    #[test]
    fn infinite_ordinates() {
        assert!(Coordinate::check_ordinates(1.0, 2.0, Some(f64::NAN), None).is_ok());
        assert!(Coordinate::check_ordinates(1.0, 2.0, Some(f64::INFINITY), None).is_err());
        assert!(Coordinate::check_ordinates(1.0, 2.0, None, Some(f64::NEG_INFINITY)).is_err());
        assert!(Coordinate::check_ordinates(f64::NAN, 2.0, None, None).is_err());

        assert!(Coordinate::new(1.0, 2.0).with_measure(3.0).is_finite());
        assert!(!Coordinate::new(1.0, 2.0).with_elevation(f64::INFINITY).is_finite());
    }

    #[test]
    fn layout_merge() {
        let coords = [
            Coordinate::new(0.0, 0.0).with_elevation(1.0),
            Coordinate::new(0.0, 0.0).with_measure(1.0),
        ];
        assert_eq!(Layout::of(&coords), Layout::XYZM);
        assert_eq!(Layout::XYZM.ordinate_count(), 4);
        assert_eq!(Layout::of(std::iter::empty()), Layout::XY);
    }
}
