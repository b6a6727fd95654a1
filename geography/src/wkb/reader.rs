use bytes::Buf;

use crate::config::CodecOptions;
use crate::contour::{LineString, LinearRing};
use crate::coordinate::{Coordinate, Layout};
use crate::crs::CoordinateSystemId;
use crate::error::{GeographyError, ParseError, WireFormat};
use crate::geometry::Geom;
use crate::geometry_type::ShapeKind;
use crate::point::Point;
use crate::polygon::Polygon;

use super::{FLAG_M, FLAG_SRID, FLAG_Z, KIND_MASK};

const HEADER_SIZE: usize = 5;
const COUNT_SIZE: usize = 4;
const ORDINATE_SIZE: usize = 8;

/// Parses well-known binary into a shape.
///
/// Both the extended flags (`0x80000000` elevation, `0x40000000` measure, `0x20000000` embedded SRID) and the ISO
/// type codes (`1000` elevation, `2000` measure, `3000` both) are accepted. An embedded SRID must be equal to
/// `srid`.
pub fn parse(
    bytes: &[u8],
    srid: CoordinateSystemId,
    options: &CodecOptions,
) -> Result<Geom, GeographyError> {
    let mut reader = Reader {
        buf: bytes,
        len: bytes.len(),
        srid,
        max_depth: options.max_depth(),
    };

    let geom = reader.geometry(1)?;
    if reader.buf.has_remaining() {
        return Err(reader
            .error(format!("{} trailing bytes after geometry", reader.buf.remaining()))
            .into());
    }

    Ok(geom)
}

#[derive(Debug, Copy, Clone)]
struct Header {
    big_endian: bool,
    kind: ShapeKind,
    layout: Layout,
}

struct Reader<'a> {
    buf: &'a [u8],
    len: usize,
    srid: CoordinateSystemId,
    max_depth: usize,
}

impl Reader<'_> {
    fn offset(&self) -> usize {
        self.len - self.buf.remaining()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(WireFormat::Binary, self.offset(), message)
    }

    fn need(&self, size: usize, what: &str) -> Result<(), ParseError> {
        if self.buf.remaining() < size {
            Err(self.error(format!("unexpected end of input while reading {what}")))
        } else {
            Ok(())
        }
    }

    fn u32(&mut self, big_endian: bool) -> u32 {
        if big_endian {
            self.buf.get_u32()
        } else {
            self.buf.get_u32_le()
        }
    }

    fn f64(&mut self, big_endian: bool) -> f64 {
        if big_endian {
            self.buf.get_f64()
        } else {
            self.buf.get_f64_le()
        }
    }

    fn header(&mut self) -> Result<Header, GeographyError> {
        self.need(HEADER_SIZE, "geometry header")?;
        let big_endian = match self.buf.get_u8() {
            0 => true,
            1 => false,
            other => {
                return Err(ParseError::new(
                    WireFormat::Binary,
                    self.offset() - 1,
                    format!("invalid byte order flag {other}"),
                )
                .into())
            }
        };

        let type_offset = self.offset();
        let code = self.u32(big_endian);
        let base = code & KIND_MASK;
        let kind = ShapeKind::from_wkb_code(base % 1000).ok_or_else(|| {
            ParseError::new(
                WireFormat::Binary,
                type_offset,
                format!("unknown geometry type code {code:#x}"),
            )
        })?;

        let (iso_z, iso_m) = match base / 1000 {
            0 => (false, false),
            1 => (true, false),
            2 => (false, true),
            3 => (true, true),
            _ => {
                return Err(ParseError::new(
                    WireFormat::Binary,
                    type_offset,
                    format!("unknown geometry type code {code:#x}"),
                )
                .into())
            }
        };

        let layout = Layout {
            has_z: iso_z || code & FLAG_Z != 0,
            has_m: iso_m || code & FLAG_M != 0,
        };

        if code & FLAG_SRID != 0 {
            self.need(COUNT_SIZE, "SRID")?;
            let embedded = self.u32(big_endian) as i32;
            self.srid.ensure_same(CoordinateSystemId::new(embedded))?;
        }

        Ok(Header {
            big_endian,
            kind,
            layout,
        })
    }

    /// Reads an element count and checks that `count` items of at least `item_size` bytes fit into the rest of
    /// the input.
    fn count(&mut self, header: &Header, item_size: usize, what: &str) -> Result<usize, ParseError> {
        self.need(COUNT_SIZE, what)?;
        let count_offset = self.offset();
        let count = self.u32(header.big_endian) as usize;
        if count.saturating_mul(item_size) > self.buf.remaining() {
            return Err(ParseError::new(
                WireFormat::Binary,
                count_offset,
                format!(
                    "declared {count} {what} do not fit into remaining {} bytes",
                    self.buf.remaining()
                ),
            ));
        }

        Ok(count)
    }

    fn geometry(&mut self, depth: usize) -> Result<Geom, GeographyError> {
        let start = self.offset();
        let header = self.header()?;
        if depth > self.max_depth {
            log::warn!("Rejecting WKB input nested deeper than {}", self.max_depth);
            return Err(ParseError::new(
                WireFormat::Binary,
                start,
                format!("geometry nesting exceeds {} levels", self.max_depth),
            )
            .into());
        }

        self.body(&header, depth)
    }

    /// Reads a member of a multi-geometry, which must be of the `expected` kind.
    fn member(&mut self, expected: ShapeKind, depth: usize) -> Result<Geom, GeographyError> {
        let start = self.offset();
        let header = self.header()?;
        if header.kind != expected {
            return Err(ParseError::new(
                WireFormat::Binary,
                start,
                format!("expected {expected} member, found {}", header.kind),
            )
            .into());
        }

        self.body(&header, depth)
    }

    fn body(&mut self, header: &Header, depth: usize) -> Result<Geom, GeographyError> {
        let geom = match header.kind {
            ShapeKind::Point => Geom::Point(self.point(header)?),
            ShapeKind::LineString => Geom::LineString(self.line_string(header)?),
            ShapeKind::Polygon => Geom::Polygon(self.polygon(header)?),
            ShapeKind::MultiPoint => {
                let count = self.count(header, HEADER_SIZE, "points")?;
                let mut parts = Vec::with_capacity(count);
                for _ in 0..count {
                    if let Geom::Point(point) = self.member(ShapeKind::Point, depth)? {
                        parts.push(point);
                    }
                }
                Geom::MultiPoint(parts.into())
            }
            ShapeKind::MultiLineString => {
                let count = self.count(header, HEADER_SIZE, "line strings")?;
                let mut parts = Vec::with_capacity(count);
                for _ in 0..count {
                    if let Geom::LineString(line) = self.member(ShapeKind::LineString, depth)? {
                        parts.push(line);
                    }
                }
                Geom::MultiLineString(parts.into())
            }
            ShapeKind::MultiPolygon => {
                let count = self.count(header, HEADER_SIZE, "polygons")?;
                let mut parts = Vec::with_capacity(count);
                for _ in 0..count {
                    if let Geom::Polygon(polygon) = self.member(ShapeKind::Polygon, depth)? {
                        parts.push(polygon);
                    }
                }
                Geom::MultiPolygon(parts.into())
            }
            ShapeKind::GeometryCollection => {
                let count = self.count(header, HEADER_SIZE, "geometries")?;
                let mut members = Vec::with_capacity(count);
                for _ in 0..count {
                    members.push(self.geometry(depth + 1)?);
                }
                Geom::GeometryCollection(members)
            }
        };

        Ok(geom)
    }

    /// Reads one position. `None` is returned if both longitude and latitude are `NaN`.
    fn coordinate(&mut self, header: &Header) -> Result<Option<Coordinate>, ParseError> {
        let start = self.offset();
        self.need(ORDINATE_SIZE * header.layout.ordinate_count(), "coordinate")?;

        let lon = self.f64(header.big_endian);
        let lat = self.f64(header.big_endian);
        let z = header.layout.has_z.then(|| self.f64(header.big_endian));
        let m = header.layout.has_m.then(|| self.f64(header.big_endian));

        if lon.is_nan() && lat.is_nan() {
            return Ok(None);
        }

        Coordinate::check_ordinates(lon, lat, z, m)
            .map_err(|reason| ParseError::new(WireFormat::Binary, start, reason))?;

        Ok(Some(Coordinate::from_ordinates(lon, lat, z, m)))
    }

    fn point(&mut self, header: &Header) -> Result<Point, ParseError> {
        Ok(self.coordinate(header)?.into())
    }

    fn positions(&mut self, header: &Header) -> Result<Vec<Coordinate>, ParseError> {
        let item_size = ORDINATE_SIZE * header.layout.ordinate_count();
        let count = self.count(header, item_size, "positions")?;
        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            let start = self.offset();
            match self.coordinate(header)? {
                Some(coordinate) => positions.push(coordinate),
                None => {
                    return Err(ParseError::new(
                        WireFormat::Binary,
                        start,
                        "empty position inside a curve",
                    ))
                }
            }
        }

        Ok(positions)
    }

    fn line_string(&mut self, header: &Header) -> Result<LineString, ParseError> {
        let start = self.offset();
        let positions = self.positions(header)?;
        LineString::validate(&positions)
            .map_err(|reason| ParseError::new(WireFormat::Binary, start, reason))?;
        Ok(LineString::from_valid(positions))
    }

    fn polygon(&mut self, header: &Header) -> Result<Polygon, ParseError> {
        let start = self.offset();
        let count = self.count(header, COUNT_SIZE, "rings")?;
        let mut rings = Vec::with_capacity(count);
        for _ in 0..count {
            let ring_start = self.offset();
            let positions = self.positions(header)?;
            LinearRing::validate(&positions)
                .map_err(|reason| ParseError::new(WireFormat::Binary, ring_start, reason))?;
            rings.push(LinearRing::from_valid(positions));
        }

        Polygon::validate(&rings).map_err(|reason| ParseError::new(WireFormat::Binary, start, reason))?;
        Ok(Polygon::from_rings(rings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use bytes::BufMut;

    fn read(bytes: &[u8]) -> Result<Geom, GeographyError> {
        parse(bytes, CoordinateSystemId::WGS84, &CodecOptions::default())
    }

    fn point_le(code: u32, ordinates: &[f64]) -> Vec<u8> {
        let mut buf = vec![];
        buf.put_u8(1);
        buf.put_u32_le(code);
        for v in ordinates {
            buf.put_f64_le(*v);
        }
        buf
    }

    #[test]
    fn point_both_endians() {
        let little = point_le(1, &[-122.35, 47.62]);

        let mut big = vec![];
        big.put_u8(0);
        big.put_u32(1);
        big.put_f64(-122.35);
        big.put_f64(47.62);

        let expected = Geom::Point(Point::new(Coordinate::new(-122.35, 47.62)));
        assert_eq!(read(&little).unwrap(), expected);
        assert_eq!(read(&big).unwrap(), expected);
    }

    #[test]
    fn dimension_conventions() {
        let expected = Geom::Point(Point::new(Coordinate::new(1.0, 2.0).with_elevation(3.0)));
        assert_eq!(read(&point_le(1001, &[1.0, 2.0, 3.0])).unwrap(), expected);
        assert_eq!(read(&point_le(0x8000_0001, &[1.0, 2.0, 3.0])).unwrap(), expected);

        let expected = Geom::Point(Point::new(Coordinate::new(1.0, 2.0).with_measure(3.0)));
        assert_eq!(read(&point_le(2001, &[1.0, 2.0, 3.0])).unwrap(), expected);
        assert_eq!(read(&point_le(0x4000_0001, &[1.0, 2.0, 3.0])).unwrap(), expected);

        let Geom::Point(point) = read(&point_le(3001, &[1.0, 2.0, f64::NAN, 4.0])).unwrap() else {
            panic!("not a point");
        };
        assert_eq!(point.coordinate().unwrap().layout(), Layout::XYM);
    }

    #[test]
    fn nan_point_is_empty() {
        assert_eq!(
            read(&point_le(1, &[f64::NAN, f64::NAN])).unwrap(),
            Geom::empty(ShapeKind::Point)
        );
        assert_matches!(
            read(&point_le(1, &[f64::NAN, 1.0])),
            Err(GeographyError::Parse(ParseError { offset: 5, .. }))
        );
    }

    #[test]
    fn embedded_srid() {
        let mut buf = vec![];
        buf.put_u8(1);
        buf.put_u32_le(0x2000_0001);
        buf.put_u32_le(4269);
        buf.put_f64_le(1.0);
        buf.put_f64_le(2.0);

        assert_matches!(
            read(&buf),
            Err(GeographyError::CoordinateSystemMismatch { found, .. }) if found.value() == 4269
        );
        assert!(parse(&buf, CoordinateSystemId::new(4269), &CodecOptions::default()).is_ok());
    }

    #[test]
    fn truncated_input() {
        let mut buf = vec![];
        buf.put_u8(1);
        buf.put_u32_le(2);
        buf.put_u32_le(1_000_000);
        buf.put_f64_le(0.0);
        buf.put_f64_le(0.0);

        assert_matches!(
            read(&buf),
            Err(GeographyError::Parse(ParseError {
                format: WireFormat::Binary,
                offset: 5,
                ..
            }))
        );

        let point = point_le(1, &[1.0, 2.0]);
        for len in 0..point.len() {
            assert_matches!(read(&point[..len]), Err(GeographyError::Parse(_)));
        }
    }

    #[test]
    fn invalid_header() {
        assert_matches!(
            read(&[2, 1, 0, 0, 0]),
            Err(GeographyError::Parse(ParseError { offset: 0, .. }))
        );
        assert_matches!(
            read(&[1, 8, 0, 0, 0]),
            Err(GeographyError::Parse(ParseError { offset: 1, .. }))
        );
        assert_matches!(
            read(&[1, 0xa1, 0x0f, 0, 0]),
            Err(GeographyError::Parse(ParseError { offset: 1, .. }))
        );
    }

    #[test]
    fn wrong_member_kind() {
        let mut buf = vec![];
        buf.put_u8(1);
        buf.put_u32_le(4);
        buf.put_u32_le(1);
        buf.put_slice(&point_le(2, &[]));
        buf.put_u32_le(0);

        assert_matches!(
            read(&buf),
            Err(GeographyError::Parse(ParseError { offset: 9, .. }))
        );
    }

    #[test]
    fn depth_guard() {
        let depth = 40;
        let mut buf = vec![];
        for _ in 0..depth {
            buf.put_u8(1);
            buf.put_u32_le(7);
            buf.put_u32_le(1);
        }
        buf.put_slice(&point_le(1, &[1.0, 2.0]));

        assert_matches!(read(&buf), Err(GeographyError::Parse(_)));
        assert!(parse(
            &buf,
            CoordinateSystemId::WGS84,
            &CodecOptions::default().with_max_depth(depth + 1)
        )
        .is_ok());
    }

    #[test]
    fn trailing_bytes() {
        let mut buf = point_le(1, &[1.0, 2.0]);
        buf.push(0);
        assert_matches!(
            read(&buf),
            Err(GeographyError::Parse(ParseError { offset: 21, .. }))
        );
    }

    #[test]
    fn unclosed_ring() {
        let mut buf = vec![];
        buf.put_u8(1);
        buf.put_u32_le(3);
        buf.put_u32_le(1);
        buf.put_u32_le(4);
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            buf.put_f64_le(x);
            buf.put_f64_le(y);
        }

        assert_matches!(
            read(&buf),
            Err(GeographyError::Parse(ParseError { offset: 9, .. }))
        );
    }

    #[test]
    fn infinite_elevation() {
        assert_matches!(
            read(&point_le(1001, &[1.0, 2.0, f64::INFINITY])),
            Err(GeographyError::Parse(ParseError { offset: 5, .. }))
        );
        assert_matches!(
            read(&point_le(2001, &[1.0, 2.0, f64::NEG_INFINITY])),
            Err(GeographyError::Parse(ParseError { offset: 5, .. }))
        );
    }

    #[test]
    fn self_crossing_ring() {
        let mut buf = vec![];
        buf.put_u8(1);
        buf.put_u32_le(3);
        buf.put_u32_le(1);
        buf.put_u32_le(5);
        for (x, y) in [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (4.0, 4.0), (0.0, 0.0)] {
            buf.put_f64_le(x);
            buf.put_f64_le(y);
        }

        assert_matches!(
            read(&buf),
            Err(GeographyError::Parse(ParseError { offset: 5, .. }))
        );
    }
}
