use bytes::BufMut;

use crate::config::ByteOrder;
use crate::contour::Contour;
use crate::coordinate::{Coordinate, Layout};
use crate::geometry::Geom;
use crate::geometry_type::ShapeKind;
use crate::point::Point;
use crate::polygon::Polygon;

use super::{FLAG_M, FLAG_Z};

/// Encodes a shape as well-known binary.
///
/// All positions are written with the ordinates present anywhere in the shape, missing ones are written as `NaN`.
/// An empty point is encoded with `NaN` longitude and latitude.
pub fn write(geom: &Geom, byte_order: ByteOrder) -> Vec<u8> {
    let mut writer = Writer {
        out: Vec::new(),
        byte_order,
        layout: geom.layout(),
    };
    writer.geometry(geom);
    writer.out
}

struct Writer {
    out: Vec<u8>,
    byte_order: ByteOrder,
    layout: Layout,
}

impl Writer {
    fn u32(&mut self, value: u32) {
        match self.byte_order {
            ByteOrder::BigEndian => self.out.put_u32(value),
            ByteOrder::LittleEndian => self.out.put_u32_le(value),
        }
    }

    fn f64(&mut self, value: f64) {
        match self.byte_order {
            ByteOrder::BigEndian => self.out.put_f64(value),
            ByteOrder::LittleEndian => self.out.put_f64_le(value),
        }
    }

    fn count(&mut self, count: usize) {
        self.u32(count as u32);
    }

    fn header(&mut self, kind: ShapeKind) {
        self.out.put_u8(match self.byte_order {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        });

        let mut code = kind.wkb_code();
        if self.layout.has_z {
            code |= FLAG_Z;
        }
        if self.layout.has_m {
            code |= FLAG_M;
        }
        self.u32(code);
    }

    fn coordinate(&mut self, coordinate: &Coordinate) {
        for value in coordinate.ordinates(self.layout) {
            self.f64(value);
        }
    }

    fn positions(&mut self, positions: &[Coordinate]) {
        self.count(positions.len());
        for coordinate in positions {
            self.coordinate(coordinate);
        }
    }

    fn point(&mut self, point: &Point) {
        self.header(ShapeKind::Point);
        match point.coordinate() {
            Some(coordinate) => self.coordinate(coordinate),
            None => {
                for _ in 0..self.layout.ordinate_count() {
                    self.f64(f64::NAN);
                }
            }
        }
    }

    fn polygon(&mut self, polygon: &Polygon) {
        self.header(ShapeKind::Polygon);
        self.count(polygon.rings().len());
        for ring in polygon.rings() {
            self.positions(ring.positions());
        }
    }

    fn geometry(&mut self, geom: &Geom) {
        match geom {
            Geom::Point(point) => self.point(point),
            Geom::LineString(line) => {
                self.header(ShapeKind::LineString);
                self.positions(line.positions());
            }
            Geom::Polygon(polygon) => self.polygon(polygon),
            Geom::MultiPoint(points) => {
                self.header(ShapeKind::MultiPoint);
                self.count(points.parts().len());
                for point in points.parts() {
                    self.point(point);
                }
            }
            Geom::MultiLineString(lines) => {
                self.header(ShapeKind::MultiLineString);
                self.count(lines.parts().len());
                for line in lines.parts() {
                    self.header(ShapeKind::LineString);
                    self.positions(line.positions());
                }
            }
            Geom::MultiPolygon(polygons) => {
                self.header(ShapeKind::MultiPolygon);
                self.count(polygons.parts().len());
                for polygon in polygons.parts() {
                    self.polygon(polygon);
                }
            }
            Geom::GeometryCollection(members) => {
                self.header(ShapeKind::GeometryCollection);
                self.count(members.len());
                for member in members {
                    self.geometry(member);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecOptions;
    use crate::crs::CoordinateSystemId;
    use crate::wkb::parse;

    fn geom(text: &str) -> Geom {
        crate::wkt::parse(text, &CodecOptions::default()).unwrap()
    }

    #[test]
    fn point_layout() {
        let bytes = write(&geom("POINT (1 2)"), ByteOrder::LittleEndian);
        assert_eq!(bytes.len(), 21);
        assert_eq!(&bytes[..5], &[1, 1, 0, 0, 0]);
        assert_eq!(&bytes[5..13], &1.0f64.to_le_bytes());

        let bytes = write(&geom("POINT (1 2)"), ByteOrder::BigEndian);
        assert_eq!(&bytes[..5], &[0, 0, 0, 0, 1]);
        assert_eq!(&bytes[13..], &2.0f64.to_be_bytes());
    }

    #[test]
    fn flags() {
        let bytes = write(&geom("POINT ZM (1 2 3 4)"), ByteOrder::LittleEndian);
        assert_eq!(&bytes[1..5], &0xC000_0001u32.to_le_bytes());
        assert_eq!(bytes.len(), 37);
    }

    #[test]
    fn empty_shapes() {
        let bytes = write(&geom("LINESTRING EMPTY"), ByteOrder::LittleEndian);
        assert_eq!(bytes, vec![1, 2, 0, 0, 0, 0, 0, 0, 0]);

        let bytes = write(&geom("POINT EMPTY"), ByteOrder::LittleEndian);
        assert!(f64::from_le_bytes(bytes[5..13].try_into().unwrap()).is_nan());
    }

    #[test]
    fn full_fidelity_round_trip() {
        for text in [
            "POINT EMPTY",
            "POINT Z (1 2 3)",
            "LINESTRING M (0 0 1, 1 1 NaN)",
            "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 1 2, 2 2, 2 1, 1 1))",
            "MULTIPOINT ((1 2), EMPTY)",
            "MULTILINESTRING ((0 0, 1 1), EMPTY)",
            "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), EMPTY)",
            "GEOMETRYCOLLECTION (POINT (1 2 3), LINESTRING EMPTY, GEOMETRYCOLLECTION EMPTY)",
        ] {
            let expected = geom(text);
            for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
                let bytes = write(&expected, order);
                let actual =
                    parse(&bytes, CoordinateSystemId::WGS84, &CodecOptions::default()).unwrap();
                assert_eq!(actual, expected, "{text}");
            }
        }
    }
}
