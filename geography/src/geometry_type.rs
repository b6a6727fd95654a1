//! Shape kinds and topological dimension.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Kind of the root shape of a [`Geom`](crate::Geom).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Single position.
    Point,
    /// Sequence of positions connected by straight segments.
    LineString,
    /// Area bounded by an exterior ring with optional holes.
    Polygon,
    /// Set of points.
    MultiPoint,
    /// Set of line strings.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Heterogeneous set of geometries.
    GeometryCollection,
}

impl ShapeKind {
    /// All kinds in the order of their binary type codes.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Point,
        ShapeKind::LineString,
        ShapeKind::Polygon,
        ShapeKind::MultiPoint,
        ShapeKind::MultiLineString,
        ShapeKind::MultiPolygon,
        ShapeKind::GeometryCollection,
    ];

    /// OGC spatial type name.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::LineString => "LineString",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::MultiPoint => "MultiPoint",
            ShapeKind::MultiLineString => "MultiLineString",
            ShapeKind::MultiPolygon => "MultiPolygon",
            ShapeKind::GeometryCollection => "GeometryCollection",
        }
    }

    /// Keyword used by the text format.
    pub fn wkt_keyword(self) -> &'static str {
        match self {
            ShapeKind::Point => "POINT",
            ShapeKind::LineString => "LINESTRING",
            ShapeKind::Polygon => "POLYGON",
            ShapeKind::MultiPoint => "MULTIPOINT",
            ShapeKind::MultiLineString => "MULTILINESTRING",
            ShapeKind::MultiPolygon => "MULTIPOLYGON",
            ShapeKind::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Looks up a kind by its text keyword, ignoring case.
    pub fn from_wkt_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wkt_keyword().eq_ignore_ascii_case(keyword))
    }

    /// Element name used by the markup format.
    pub fn gml_element(self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::LineString => "LineString",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::MultiPoint => "MultiPoint",
            ShapeKind::MultiLineString => "MultiCurve",
            ShapeKind::MultiPolygon => "MultiSurface",
            ShapeKind::GeometryCollection => "MultiGeometry",
        }
    }

    /// Looks up a kind by its markup element name (without namespace prefix).
    pub fn from_gml_element(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.gml_element() == name)
    }

    /// Binary type code (1..=7).
    pub fn wkb_code(self) -> u32 {
        match self {
            ShapeKind::Point => 1,
            ShapeKind::LineString => 2,
            ShapeKind::Polygon => 3,
            ShapeKind::MultiPoint => 4,
            ShapeKind::MultiLineString => 5,
            ShapeKind::MultiPolygon => 6,
            ShapeKind::GeometryCollection => 7,
        }
    }

    /// Looks up a kind by its binary type code.
    pub fn from_wkb_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wkb_code() == code)
    }

    /// Whether the kind is a collection (Multi* or GeometryCollection).
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            ShapeKind::MultiPoint
                | ShapeKind::MultiLineString
                | ShapeKind::MultiPolygon
                | ShapeKind::GeometryCollection
        )
    }

    /// Empty shape of this kind has this dimension. `None` for geometry collections, whose dimension depends
    /// on the members.
    pub fn intrinsic_dimension(self) -> Option<Dimension> {
        match self {
            ShapeKind::Point | ShapeKind::MultiPoint => Some(Dimension::Point),
            ShapeKind::LineString | ShapeKind::MultiLineString => Some(Dimension::Curve),
            ShapeKind::Polygon | ShapeKind::MultiPolygon => Some(Dimension::Surface),
            ShapeKind::GeometryCollection => None,
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Topological dimension of a geometry.
///
/// Variants are ordered, so the dimension of a collection is the `max` of its members'. An empty geometry
/// collection has [`Dimension::Undefined`], which is distinct from the dimension of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Dimension of an empty geometry collection.
    Undefined,
    /// Points (0).
    Point,
    /// Curves (1).
    Curve,
    /// Surfaces (2).
    Surface,
}

impl Dimension {
    /// Numeric value: `-1` for undefined, otherwise 0, 1 or 2.
    pub fn value(self) -> i8 {
        match self {
            Dimension::Undefined => -1,
            Dimension::Point => 0,
            Dimension::Curve => 1,
            Dimension::Surface => 2,
        }
    }
}
