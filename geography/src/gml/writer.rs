use crate::contour::Contour;
use crate::coordinate::{Coordinate, Layout};
use crate::crs::CoordinateSystemId;
use crate::geometry::Geom;
use crate::point::Point;
use crate::polygon::Polygon;

use super::{srs_name, GML_NAMESPACE};

/// Encodes a shape as geography markup.
///
/// The root element carries the namespace, the `srsName` of `srid` and, for shapes with elevation or measure,
/// the `srsDimension`. Shapes with a measure are always written with 4 ordinates so the reader can tell
/// measure from elevation.
pub fn write(geom: &Geom, srid: CoordinateSystemId) -> String {
    let layout = geom.layout();
    let layout = if layout.has_m { Layout::XYZM } else { layout };

    let mut writer = Writer {
        out: String::new(),
        layout,
    };

    let mut attributes = format!(r#" xmlns="{GML_NAMESPACE}" srsName="{}""#, srs_name(srid));
    if layout.ordinate_count() > 2 {
        attributes.push_str(&format!(r#" srsDimension="{}""#, layout.ordinate_count()));
    }

    writer.geometry(geom, &attributes);
    writer.out
}

struct Writer {
    out: String,
    layout: Layout,
}

impl Writer {
    fn open(&mut self, name: &str, attributes: &str) {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push_str(attributes);
        self.out.push('>');
    }

    fn close(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn empty(&mut self, name: &str, attributes: &str) {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push_str(attributes);
        self.out.push_str("/>");
    }

    fn ordinates<'a>(&mut self, name: &str, coordinates: impl IntoIterator<Item = &'a Coordinate>) {
        self.open(name, "");
        let mut first = true;
        for coordinate in coordinates {
            for value in coordinate.ordinates(self.layout) {
                if !first {
                    self.out.push(' ');
                }
                first = false;
                self.out.push_str(&value.to_string());
            }
        }
        self.close(name);
    }

    fn point(&mut self, point: &Point, attributes: &str) {
        match point.coordinate() {
            Some(coordinate) => {
                self.open("Point", attributes);
                self.ordinates("pos", [coordinate]);
                self.close("Point");
            }
            None => self.empty("Point", attributes),
        }
    }

    fn line_string(&mut self, positions: &[Coordinate], attributes: &str) {
        if positions.is_empty() {
            self.empty("LineString", attributes);
        } else {
            self.open("LineString", attributes);
            self.ordinates("posList", positions);
            self.close("LineString");
        }
    }

    fn polygon(&mut self, polygon: &Polygon, attributes: &str) {
        if polygon.is_empty() {
            self.empty("Polygon", attributes);
            return;
        }

        self.open("Polygon", attributes);
        for (index, ring) in polygon.rings().iter().enumerate() {
            let boundary = if index == 0 { "exterior" } else { "interior" };
            self.open(boundary, "");
            self.open("LinearRing", "");
            self.ordinates("posList", ring.positions());
            self.close("LinearRing");
            self.close(boundary);
        }
        self.close("Polygon");
    }

    fn members<T>(
        &mut self,
        name: &str,
        attributes: &str,
        member: &str,
        parts: &[T],
        mut write_part: impl FnMut(&mut Self, &T),
    ) {
        if parts.is_empty() {
            self.empty(name, attributes);
            return;
        }

        self.open(name, attributes);
        for part in parts {
            self.open(member, "");
            write_part(self, part);
            self.close(member);
        }
        self.close(name);
    }

    fn geometry(&mut self, geom: &Geom, attributes: &str) {
        match geom {
            Geom::Point(point) => self.point(point, attributes),
            Geom::LineString(line) => self.line_string(line.positions(), attributes),
            Geom::Polygon(polygon) => self.polygon(polygon, attributes),
            Geom::MultiPoint(points) => {
                self.members("MultiPoint", attributes, "pointMember", points.parts(), |w, p| {
                    w.point(p, "")
                })
            }
            Geom::MultiLineString(lines) => {
                self.members("MultiCurve", attributes, "curveMember", lines.parts(), |w, l| {
                    w.line_string(l.positions(), "")
                })
            }
            Geom::MultiPolygon(polygons) => self.members(
                "MultiSurface",
                attributes,
                "surfaceMember",
                polygons.parts(),
                |w, p| w.polygon(p, ""),
            ),
            Geom::GeometryCollection(members) => self.members(
                "MultiGeometry",
                attributes,
                "geometryMember",
                members,
                |w, m| w.geometry(m, ""),
            ),
        }
    }
}
