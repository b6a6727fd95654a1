//! Geometry values on a round-earth reference surface.
//!
//! A [`Geography`] is an immutable shape ([`Geom`]) together with the identifier of the coordinate system its
//! positions are given in. Values are read from and written to three interchange formats:
//!
//! * well-known text, see [`wkt`]
//! * well-known binary, see [`wkb`]
//! * geography markup language, see [`gml`]
//!
//! Pairs of values can be compared with spatial predicates (`spatial_equals`, `intersects`, `disjoint`) and
//! combined with boolean operations (`intersection`, `union`, `difference`, `symmetric_difference`). See the
//! [`ops`] module for the rules of these operations.
//!
//! ```
//! use geography::Geography;
//!
//! let point = Geography::from_text("POINT (-122.35 47.62)")?;
//! assert_eq!(point.longitude(), Some(-122.35));
//!
//! let area = Geography::from_text("POLYGON ((-123 47, -122 47, -122 48, -123 48, -123 47))")?;
//! assert!(area.intersects(&point)?);
//! assert_eq!(point.as_text(), "POINT (-122.35 47.62)");
//! # Ok::<(), geography::GeographyError>(())
//! ```

mod accessors;
pub mod cartesian;
pub mod check;
pub mod config;
pub mod contour;
pub mod coordinate;
pub mod crs;
pub mod error;
pub mod geometry;
pub mod geometry_type;
pub mod gml;
pub mod multi_line_string;
pub mod multi_point;
pub mod multi_polygon;
pub mod ops;
pub mod point;
pub mod polygon;
pub mod segment;
pub mod well_known;
pub mod wkb;
pub mod wkt;

pub use check::not_null;
pub use config::{ByteOrder, CodecOptions, ThirdOrdinate};
pub use contour::{Contour, LineString, LinearRing};
pub use coordinate::{Coordinate, Layout};
pub use crs::CoordinateSystemId;
pub use error::{GeographyError, ParseError, WireFormat};
pub use geometry::{Geography, Geom, MAX_DEPTH};
pub use geometry_type::{Dimension, ShapeKind};
pub use multi_line_string::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;
pub use well_known::WellKnownValue;

/// Coordinate system id of values created without an explicit one (WGS 84).
pub const DEFAULT_COORDINATE_SYSTEM_ID: CoordinateSystemId = CoordinateSystemId::WGS84;
