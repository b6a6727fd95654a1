//! The geometry value model: [`Geom`] tagged variant and the [`Geography`] value.

use serde::{Deserialize, Serialize};

use crate::contour::{Contour, LineString, LinearRing};
use crate::coordinate::{Coordinate, Layout};
use crate::crs::CoordinateSystemId;
use crate::error::GeographyError;
use crate::geometry_type::{Dimension, ShapeKind};
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::point::Point;
use crate::polygon::Polygon;

/// Maximum nesting depth of geometry collections a [`Geography`] can have.
///
/// A plain shape has depth 1, a collection of plain shapes has depth 2 and so on. Every recursive traversal in the
/// crate relies on this bound.
pub const MAX_DEPTH: usize = 64;

/// Shape of a geometry value.
///
/// `dimension`, `is_empty`, `layout`, `for_each_position` and `depth` walk the shape without recursion. The text,
/// binary and markup writers and [`Geom::to_xy`] recurse into nested collections, so they are meant for shapes
/// whose depth has been checked, such as the ones held by a [`Geography`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom {
    /// Point.
    Point(Point),
    /// Line string.
    LineString(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Set of line strings.
    MultiLineString(MultiLineString),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Heterogeneous set of shapes, possibly nested.
    GeometryCollection(Vec<Geom>),
}

impl Geom {
    /// Empty shape of the given kind.
    pub fn empty(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Point => Geom::Point(Point::empty()),
            ShapeKind::LineString => Geom::LineString(LineString::empty()),
            ShapeKind::Polygon => Geom::Polygon(Polygon::empty()),
            ShapeKind::MultiPoint => Geom::MultiPoint(MultiPoint::default()),
            ShapeKind::MultiLineString => Geom::MultiLineString(MultiLineString::default()),
            ShapeKind::MultiPolygon => Geom::MultiPolygon(MultiPolygon::default()),
            ShapeKind::GeometryCollection => Geom::GeometryCollection(vec![]),
        }
    }

    /// Kind of the shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geom::Point(_) => ShapeKind::Point,
            Geom::LineString(_) => ShapeKind::LineString,
            Geom::Polygon(_) => ShapeKind::Polygon,
            Geom::MultiPoint(_) => ShapeKind::MultiPoint,
            Geom::MultiLineString(_) => ShapeKind::MultiLineString,
            Geom::MultiPolygon(_) => ShapeKind::MultiPolygon,
            Geom::GeometryCollection(_) => ShapeKind::GeometryCollection,
        }
    }

    /// Topological dimension. For geometry collections this is the highest dimension of the members.
    pub fn dimension(&self) -> Dimension {
        let mut dimension = Dimension::Undefined;
        let mut stack = vec![self];
        while let Some(geom) = stack.pop() {
            match geom {
                Geom::GeometryCollection(members) => stack.extend(members),
                other => {
                    if let Some(intrinsic) = other.kind().intrinsic_dimension() {
                        dimension = dimension.max(intrinsic);
                    }
                }
            }
        }

        dimension
    }

    /// Whether the shape contains no positions.
    pub fn is_empty(&self) -> bool {
        let mut stack = vec![self];
        while let Some(geom) = stack.pop() {
            let empty = match geom {
                Geom::Point(v) => v.is_empty(),
                Geom::LineString(v) => v.is_empty(),
                Geom::Polygon(v) => v.is_empty(),
                Geom::MultiPoint(v) => v.is_empty(),
                Geom::MultiLineString(v) => v.is_empty(),
                Geom::MultiPolygon(v) => v.is_empty(),
                Geom::GeometryCollection(members) => {
                    stack.extend(members);
                    true
                }
            };

            if !empty {
                return false;
            }
        }

        true
    }

    /// Ordinates carried by the positions of the shape.
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::XY;
        let mut stack = vec![self];
        while let Some(geom) = stack.pop() {
            let own = match geom {
                Geom::Point(v) => Layout::of(v.coordinate()),
                Geom::LineString(v) => v.layout(),
                Geom::Polygon(v) => v.layout(),
                Geom::MultiPoint(v) => v.layout(),
                Geom::MultiLineString(v) => v.layout(),
                Geom::MultiPolygon(v) => v.layout(),
                Geom::GeometryCollection(members) => {
                    stack.extend(members);
                    Layout::XY
                }
            };
            layout = layout.merge(own);
        }

        layout
    }

    /// Calls `f` for every position of the shape in order.
    pub fn for_each_position(&self, f: &mut impl FnMut(&Coordinate)) {
        let mut stack = vec![self];
        while let Some(geom) = stack.pop() {
            match geom {
                Geom::Point(v) => v.coordinate().into_iter().for_each(&mut *f),
                Geom::LineString(v) => v.positions().iter().for_each(&mut *f),
                Geom::Polygon(v) => v.positions().for_each(&mut *f),
                Geom::MultiPoint(v) => v.positions().for_each(&mut *f),
                Geom::MultiLineString(v) => v.positions().for_each(&mut *f),
                Geom::MultiPolygon(v) => v.positions().for_each(&mut *f),
                Geom::GeometryCollection(members) => stack.extend(members.iter().rev()),
            }
        }
    }

    /// Nesting depth of the shape. Computed without recursion, so it is safe to call on shapes of any depth.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((geom, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Geom::GeometryCollection(members) = geom {
                stack.extend(members.iter().map(|m| (m, depth + 1)));
            }
        }

        max_depth
    }

    /// Projection of the shape to longitude and latitude.
    ///
    /// Recurses into nested collections. Shapes held by a [`Geography`] are at most [`MAX_DEPTH`] levels deep.
    pub fn to_xy(&self) -> Geom {
        fn ring_xy(points: &[Coordinate]) -> Vec<Coordinate> {
            points.iter().map(Coordinate::xy).collect()
        }

        fn polygon_xy(polygon: &Polygon) -> Polygon {
            Polygon::from_rings(
                polygon
                    .rings()
                    .iter()
                    .map(|ring| LinearRing::from_valid(ring_xy(ring)))
                    .collect(),
            )
        }

        match self {
            Geom::Point(v) => Geom::Point(v.coordinate().map(Coordinate::xy).into()),
            Geom::LineString(v) => Geom::LineString(LineString::from_valid(ring_xy(v))),
            Geom::Polygon(v) => Geom::Polygon(polygon_xy(v)),
            Geom::MultiPoint(v) => Geom::MultiPoint(
                v.parts()
                    .iter()
                    .map(|p| Point::from(p.coordinate().map(Coordinate::xy)))
                    .collect::<Vec<_>>()
                    .into(),
            ),
            Geom::MultiLineString(v) => Geom::MultiLineString(
                v.parts()
                    .iter()
                    .map(|l| LineString::from_valid(ring_xy(l)))
                    .collect::<Vec<_>>()
                    .into(),
            ),
            Geom::MultiPolygon(v) => Geom::MultiPolygon(
                v.parts().iter().map(polygon_xy).collect::<Vec<_>>().into(),
            ),
            Geom::GeometryCollection(members) => {
                Geom::GeometryCollection(members.iter().map(Geom::to_xy).collect())
            }
        }
    }
}

impl From<Point> for Geom {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geom {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPoint> for Geom {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geom {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geom {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

/// Immutable geometry value on a round-earth reference surface.
///
/// A value is a [`Geom`] shape together with the identifier of the coordinate system its positions are
/// defined in. Values are never modified: methods that "change" a value return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Geography {
    geom: Geom,
    srid: CoordinateSystemId,
}

impl Geography {
    /// Default coordinate system id (WGS 84).
    pub const DEFAULT_COORDINATE_SYSTEM_ID: CoordinateSystemId = CoordinateSystemId::WGS84;

    /// Creates a new value.
    ///
    /// Fails with [`GeographyError::InvalidArgument`] if collections are nested deeper than [`MAX_DEPTH`] or
    /// if any ordinate is not finite.
    pub fn new(geom: Geom, srid: CoordinateSystemId) -> Result<Self, GeographyError> {
        let depth = geom.depth();
        if depth > MAX_DEPTH {
            return Err(GeographyError::invalid_argument(
                "geom",
                format!("collection nesting depth {depth} exceeds {MAX_DEPTH}"),
            ));
        }

        let mut all_finite = true;
        geom.for_each_position(&mut |c| all_finite &= c.is_finite());
        if !all_finite {
            return Err(GeographyError::invalid_argument("geom", "ordinates must be finite"));
        }

        Ok(Self { geom, srid })
    }

    /// Creates a point value in the default coordinate system.
    pub fn point(coordinate: Coordinate) -> Result<Self, GeographyError> {
        Self::new(Geom::Point(Point::new(coordinate)), Self::DEFAULT_COORDINATE_SYSTEM_ID)
    }

    /// Empty value of the given kind.
    pub fn empty(kind: ShapeKind, srid: CoordinateSystemId) -> Self {
        Self {
            geom: Geom::empty(kind),
            srid,
        }
    }

    /// Creates a geometry collection out of `members`.
    ///
    /// All members must be defined in the `srid` coordinate system.
    pub fn collection(
        srid: CoordinateSystemId,
        members: Vec<Geography>,
    ) -> Result<Self, GeographyError> {
        let mut geoms = Vec::with_capacity(members.len());
        for member in members {
            srid.ensure_same(member.srid)?;
            geoms.push(member.geom);
        }

        Self::new(Geom::GeometryCollection(geoms), srid)
    }

    pub(crate) fn from_valid(geom: Geom, srid: CoordinateSystemId) -> Self {
        Self { geom, srid }
    }

    /// Shape of the value.
    pub fn geom(&self) -> &Geom {
        &self.geom
    }

    /// Consumes the value returning its shape.
    pub fn into_geom(self) -> Geom {
        self.geom
    }

    /// Identifier of the coordinate system of the value.
    pub fn coordinate_system_id(&self) -> CoordinateSystemId {
        self.srid
    }

    /// Same shape in a different coordinate system. Positions are not transformed.
    pub fn with_coordinate_system_id(self, srid: CoordinateSystemId) -> Self {
        Self { srid, ..self }
    }

    /// Kind of the root shape.
    pub fn kind(&self) -> ShapeKind {
        self.geom.kind()
    }

    /// OGC spatial type name of the root shape, e.g. `"Polygon"`.
    pub fn spatial_type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Topological dimension. See [`Geom::dimension`].
    pub fn dimension(&self) -> Dimension {
        self.geom.dimension()
    }

    /// Whether the value contains no positions.
    pub fn is_empty(&self) -> bool {
        self.geom.is_empty()
    }

    /// Ordinates carried by the positions of the value.
    pub fn layout(&self) -> Layout {
        self.geom.layout()
    }

    /// Projection of the value to longitude and latitude.
    pub fn to_xy(&self) -> Geography {
        Self::from_valid(self.geom.to_xy(), self.srid)
    }

    pub(crate) fn same_system(&self, other: &Geography) -> Result<(), GeographyError> {
        self.srid.ensure_same(other.srid)
    }

    pub(crate) fn expect_kind(
        self,
        kind: ShapeKind,
        operation: &'static str,
    ) -> Result<Self, GeographyError> {
        if self.kind() == kind {
            Ok(self)
        } else {
            Err(GeographyError::UnsupportedShape {
                operation,
                kind: self.kind(),
            })
        }
    }
}

/// Generates parsing constructors that only accept one shape kind.
macro_rules! kind_restricted {
    ($parse:ident($input:ty), $format:literal, $($name:ident => $kind:ident),+ $(,)?) => {
        impl $crate::geometry::Geography {
            $(
                #[doc = concat!("Parses ", $format, " input that must contain a `", stringify!($kind), "`.")]
                ///
                /// A well-formed input of another kind fails with
                /// [`GeographyError::UnsupportedShape`](crate::GeographyError::UnsupportedShape).
                pub fn $name(
                    input: $input,
                    srid: $crate::crs::CoordinateSystemId,
                ) -> Result<Self, $crate::error::GeographyError> {
                    Self::$parse(input, srid)?
                        .expect_kind($crate::geometry_type::ShapeKind::$kind, stringify!($name))
                }
            )+
        }
    };
}

pub(crate) use kind_restricted;
