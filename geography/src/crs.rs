//! Coordinate system identifiers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::GeographyError;

/// Identifier of the reference system (SRID) a [`Geography`](crate::Geography) value is defined in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateSystemId(i32);

impl CoordinateSystemId {
    /// WGS 84, the default round-earth system.
    pub const WGS84: CoordinateSystemId = CoordinateSystemId(4326);

    /// Creates a new identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Numeric value of the identifier.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Fails with [`GeographyError::CoordinateSystemMismatch`] unless `other` is the same system.
    pub fn ensure_same(self, other: Self) -> Result<(), GeographyError> {
        if self == other {
            Ok(())
        } else {
            Err(GeographyError::CoordinateSystemMismatch {
                expected: self,
                found: other,
            })
        }
    }
}

impl Default for CoordinateSystemId {
    fn default() -> Self {
        Self::WGS84
    }
}

impl From<i32> for CoordinateSystemId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<CoordinateSystemId> for i32 {
    fn from(value: CoordinateSystemId) -> Self {
        value.0
    }
}

impl Display for CoordinateSystemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
