//! Conversion between [`Geom`] and `geo-types` geometries.
//!
//! Operations work on [`Parts`]: a shape broken down into its points, curves and surfaces, projected to
//! longitude and latitude. Parts are normalized so that no point lies on a curve or surface of the same shape, no
//! curve runs inside a surface and surfaces don't overlap.

use geo::{unary_union, Intersects};
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString as GeoLineString, MultiLineString as GeoMultiLineString,
    MultiPoint as GeoMultiPoint, MultiPolygon as GeoMultiPolygon, Point as GeoPoint, Polygon as GeoPolygon,
};

use crate::contour::{Contour, LineString, LinearRing};
use crate::coordinate::Coordinate;
use crate::geometry::Geom;
use crate::geometry_type::{Dimension, ShapeKind};
use crate::point::Point;
use crate::polygon::Polygon;

use super::overlay::{boundaries, exterior_lines, merge_lines};
use super::snap::Snap;

/// Shape broken down by dimension.
#[derive(Debug, Clone)]
pub(crate) struct Parts {
    pub points: Vec<Coord>,
    pub lines: Vec<GeoLineString>,
    pub polygons: GeoMultiPolygon,
}

impl Parts {
    /// Breaks a shape down into normalized parts.
    pub fn of(geom: &Geom) -> Self {
        let mut points = vec![];
        let mut lines = vec![];
        let mut polygons = vec![];

        let mut stack = vec![geom];
        while let Some(geom) = stack.pop() {
            match geom {
                Geom::Point(point) => points.extend(point.coordinate().map(to_coord)),
                Geom::LineString(line) => lines.extend(to_geo_line(line.positions())),
                Geom::Polygon(polygon) => polygons.extend(to_geo_polygon(polygon)),
                Geom::MultiPoint(v) => points.extend(v.positions().map(to_coord)),
                Geom::MultiLineString(v) => lines.extend(
                    v.parts()
                        .iter()
                        .filter_map(|line| to_geo_line(line.positions())),
                ),
                Geom::MultiPolygon(v) => {
                    polygons.extend(v.parts().iter().filter_map(to_geo_polygon))
                }
                Geom::GeometryCollection(members) => stack.extend(members.iter().rev()),
            }
        }

        let polygons = merge_polygons(polygons);
        let lines = exterior_lines(&merge_lines(lines), &polygons);
        let points = unique_points(
            points
                .into_iter()
                .filter(|p| !covered_by(*p, &lines, &polygons)),
        );

        Self {
            points,
            lines,
            polygons,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.polygons.0.is_empty()
    }

    /// Whether the point belongs to the point set of the parts.
    pub fn covers(&self, point: Coord) -> bool {
        self.points.contains(&point) || covered_by(point, &self.lines, &self.polygons)
    }

    /// Single `geo` geometry with the same point set.
    pub fn to_geo(&self) -> Geometry {
        let mut members = vec![];
        match self.points.as_slice() {
            [] => {}
            [point] => members.push(Geometry::Point(GeoPoint(*point))),
            points => members.push(Geometry::MultiPoint(GeoMultiPoint::new(
                points.iter().copied().map(GeoPoint).collect(),
            ))),
        }

        match self.lines.as_slice() {
            [] => {}
            [line] => members.push(Geometry::LineString(line.clone())),
            lines => members.push(Geometry::MultiLineString(GeoMultiLineString::new(
                lines.to_vec(),
            ))),
        }

        match self.polygons.0.as_slice() {
            [] => {}
            [polygon] => members.push(Geometry::Polygon(polygon.clone())),
            _ => members.push(Geometry::MultiPolygon(self.polygons.clone())),
        }

        if members.len() == 1 {
            members.remove(0)
        } else {
            Geometry::GeometryCollection(GeometryCollection(members))
        }
    }

    /// Converts the parts into the narrowest shape that can hold them. Parts without any positions become an
    /// empty shape of the given dimension.
    pub fn into_geom(self, empty_dimension: Dimension) -> Geom {
        let mut members = vec![];

        let mut points: Vec<Point> = self
            .points
            .into_iter()
            .map(|c| Point::new(Coordinate::new(c.x, c.y)))
            .collect();
        match points.len() {
            0 => {}
            1 => members.push(Geom::Point(points.remove(0))),
            _ => members.push(Geom::MultiPoint(points.into())),
        }

        let mut lines: Vec<LineString> = self.lines.iter().filter_map(from_geo_line).collect();
        match lines.len() {
            0 => {}
            1 => members.push(Geom::LineString(lines.remove(0))),
            _ => members.push(Geom::MultiLineString(lines.into())),
        }

        let mut polygons: Vec<Polygon> = self.polygons.iter().filter_map(from_geo_polygon).collect();
        match polygons.len() {
            0 => {}
            1 => members.push(Geom::Polygon(polygons.remove(0))),
            _ => members.push(Geom::MultiPolygon(polygons.into())),
        }

        match members.len() {
            0 => Geom::empty(empty_kind(empty_dimension)),
            1 => members.remove(0),
            _ => Geom::GeometryCollection(members),
        }
    }
}

/// Unions the polygons if some of them have common points. Disjoint polygons are kept as they are.
fn merge_polygons(polygons: Vec<GeoPolygon>) -> GeoMultiPolygon {
    let touching = polygons
        .iter()
        .enumerate()
        .any(|(index, polygon)| polygons[index + 1..].iter().any(|other| polygon.intersects(other)));

    let polygons = GeoMultiPolygon::new(polygons);
    if !touching {
        return polygons;
    }

    Snap::new(boundaries(&polygons)).polygons(unary_union(&polygons.0))
}

/// Kind of an empty result of the given dimension.
pub(crate) fn empty_kind(dimension: Dimension) -> ShapeKind {
    match dimension {
        Dimension::Undefined => ShapeKind::GeometryCollection,
        Dimension::Point => ShapeKind::Point,
        Dimension::Curve => ShapeKind::LineString,
        Dimension::Surface => ShapeKind::Polygon,
    }
}

pub(crate) fn covered_by(point: Coord, lines: &[GeoLineString], polygons: &GeoMultiPolygon) -> bool {
    let point = GeoPoint(point);
    polygons.intersects(&point) || lines.iter().any(|line| line.intersects(&point))
}

pub(crate) fn unique_points(points: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
    let mut unique: Vec<Coord> = vec![];
    for point in points {
        if !unique.contains(&point) {
            unique.push(point);
        }
    }

    unique
}

fn to_coord(coordinate: &Coordinate) -> Coord {
    Coord {
        x: coordinate.longitude(),
        y: coordinate.latitude(),
    }
}

fn to_geo_line(positions: &[Coordinate]) -> Option<GeoLineString> {
    if positions.is_empty() {
        None
    } else {
        Some(GeoLineString::new(positions.iter().map(to_coord).collect()))
    }
}

fn to_geo_polygon(polygon: &Polygon) -> Option<GeoPolygon> {
    let exterior = to_geo_line(polygon.exterior()?.positions())?;
    let interiors = polygon
        .interiors()
        .filter_map(|ring| to_geo_line(ring.positions()))
        .collect();

    Some(GeoPolygon::new(exterior, interiors))
}

fn from_geo_coords(line: &GeoLineString) -> Vec<Coordinate> {
    line.coords().map(|c| Coordinate::new(c.x, c.y)).collect()
}

fn from_geo_line(line: &GeoLineString) -> Option<LineString> {
    let positions = from_geo_coords(line);
    if positions.len() < 2 {
        return None;
    }

    LineString::new(positions).ok()
}

fn from_geo_ring(line: &GeoLineString) -> Option<LinearRing> {
    LinearRing::new(from_geo_coords(line)).ok()
}

fn from_geo_polygon(polygon: &GeoPolygon) -> Option<Polygon> {
    let exterior = from_geo_ring(polygon.exterior())?;
    let mut rings = vec![exterior];
    rings.extend(polygon.interiors().iter().filter_map(from_geo_ring));
    Some(Polygon::from_rings(rings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecOptions;

    fn parts(text: &str) -> Parts {
        Parts::of(&crate::wkt::parse(text, &CodecOptions::default()).unwrap())
    }

    #[test]
    fn decomposition() {
        let parts = parts(
            "GEOMETRYCOLLECTION (POINT (1 2), MULTILINESTRING ((0 0, 1 1), EMPTY), POLYGON EMPTY, GEOMETRYCOLLECTION (POINT (3 4)))",
        );
        assert_eq!(parts.points.len(), 2);
        assert_eq!(parts.lines.len(), 1);
        assert!(parts.polygons.0.is_empty());
        assert!(!parts.is_empty());

        assert!(self::parts("GEOMETRYCOLLECTION (POINT EMPTY, LINESTRING EMPTY)").is_empty());
    }

    #[test]
    fn normalization() {
        let parts = parts(
            "GEOMETRYCOLLECTION (POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0)), POINT (1 1), POINT (5 5), POINT (5 5), LINESTRING (1 1, 1 1.5))",
        );
        assert_eq!(parts.points, vec![Coord { x: 5.0, y: 5.0 }]);
        assert!(parts.lines.is_empty());
        assert_eq!(parts.polygons.0.len(), 1);
    }

    #[test]
    fn overlapping_polygons_are_merged() {
        let parts = parts(
            "MULTIPOLYGON (((0 0, 2 0, 2 2, 0 2, 0 0)), ((1 1, 3 1, 3 3, 1 3, 1 1)))",
        );
        assert_eq!(parts.polygons.0.len(), 1);
    }

    #[test]
    fn single_polygon_keeps_its_positions() {
        let parts = parts("POLYGON ((0 0, 3.3 0, 3.3 10, 0 10, 0 0))");
        let expected: Vec<Coord> = [(0.0, 0.0), (3.3, 0.0), (3.3, 10.0), (0.0, 10.0), (0.0, 0.0)]
            .into_iter()
            .map(Coord::from)
            .collect();
        assert_eq!(parts.polygons.0[0].exterior().0, expected);
    }

    #[test]
    fn merged_polygons_keep_input_positions() {
        let parts = parts(
            "MULTIPOLYGON (((0 0, 3.3 0, 3.3 10, 0 10, 0 0)), ((3.3 0, 10 0, 10 10, 3.3 10, 3.3 0)))",
        );
        assert_eq!(parts.polygons.0.len(), 1);
        for c in parts.polygons.0[0].exterior().coords() {
            assert!([0.0, 3.3, 10.0].contains(&c.x), "{c:?}");
            assert!([0.0, 10.0].contains(&c.y), "{c:?}");
        }
    }

    #[test]
    fn narrowest_kind() {
        assert_eq!(parts("MULTIPOINT ((1 2))").into_geom(Dimension::Point).kind(), ShapeKind::Point);
        assert_eq!(
            parts("GEOMETRYCOLLECTION (LINESTRING (0 0, 1 1), LINESTRING (5 5, 6 6))")
                .into_geom(Dimension::Curve)
                .kind(),
            ShapeKind::MultiLineString
        );
        assert_eq!(
            parts("GEOMETRYCOLLECTION (POINT (9 9), LINESTRING (0 0, 1 1))")
                .into_geom(Dimension::Curve)
                .kind(),
            ShapeKind::GeometryCollection
        );
        assert_eq!(
            parts("POINT EMPTY").into_geom(Dimension::Surface),
            Geom::empty(ShapeKind::Polygon)
        );
    }
}
