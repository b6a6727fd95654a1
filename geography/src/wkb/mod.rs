//! Well-known binary (WKB) codec.
//!
//! Every shape starts with a byte order flag (`0` big endian, `1` little endian) and a 4-byte type code,
//! followed by the payload: ordinates of a point, a position count and positions of a line string, a ring
//! count and rings of a polygon, or a member count and fully encoded members of a collection. Ordinates are
//! 8-byte floats.

use crate::config::{ByteOrder, CodecOptions};
use crate::crs::CoordinateSystemId;
use crate::error::GeographyError;
use crate::geometry::{kind_restricted, Geography};

mod reader;
mod writer;

pub use reader::parse;
pub use writer::write;

const FLAG_Z: u32 = 0x8000_0000;
const FLAG_M: u32 = 0x4000_0000;
const FLAG_SRID: u32 = 0x2000_0000;
const KIND_MASK: u32 = 0x0FFF_FFFF;

impl Geography {
    /// Parses well-known binary in the default coordinate system.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GeographyError> {
        Self::from_binary_with_srid(bytes, Self::DEFAULT_COORDINATE_SYSTEM_ID)
    }

    /// Parses well-known binary in the given coordinate system.
    pub fn from_binary_with_srid(
        bytes: &[u8],
        srid: CoordinateSystemId,
    ) -> Result<Self, GeographyError> {
        Self::from_binary_with_options(bytes, srid, &CodecOptions::default())
    }

    /// Parses well-known binary in the given coordinate system using custom codec options.
    pub fn from_binary_with_options(
        bytes: &[u8],
        srid: CoordinateSystemId,
        options: &CodecOptions,
    ) -> Result<Self, GeographyError> {
        log::debug!("Parsing WKB of {} bytes with SRID {srid}", bytes.len());
        let geom = parse(bytes, srid, options)?;
        Ok(Self::from_valid(geom, srid))
    }

    /// Well-known binary in little endian byte order.
    pub fn as_binary(&self) -> Vec<u8> {
        self.as_binary_with_options(&CodecOptions::default())
    }

    /// Well-known binary in the byte order set by `options`.
    pub fn as_binary_with_options(&self, options: &CodecOptions) -> Vec<u8> {
        write(self.geom(), options.byte_order())
    }

    /// Well-known binary in the given byte order.
    pub fn as_binary_with_order(&self, byte_order: ByteOrder) -> Vec<u8> {
        write(self.geom(), byte_order)
    }
}

kind_restricted!(
    from_binary_with_srid(&[u8]),
    "well-known binary",
    point_from_binary => Point,
    line_from_binary => LineString,
    polygon_from_binary => Polygon,
    multi_point_from_binary => MultiPoint,
    multi_line_from_binary => MultiLineString,
    multi_polygon_from_binary => MultiPolygon,
    collection_from_binary => GeometryCollection,
);
