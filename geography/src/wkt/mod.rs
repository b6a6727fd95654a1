//! Well-known text (WKT) codec.
//!
//! Grammar: `<TYPE>[ Z| M| ZM] (<coordinates>)` or `<TYPE> EMPTY`. Keywords are case-insensitive, ordinates are
//! separated by whitespace and coordinates by commas. A coordinate without an explicit marker can have 2, 3 or 4
//! ordinates; the meaning of the third one is set by [`CodecOptions::three_ordinates`]. All coordinates of one
//! geometry must have the same number of ordinates.
//!
//! [`parse_extended`] also accepts the `SRID=<id>;` prefix produced by the [`Display`](std::fmt::Display)
//! implementation of [`Geography`].

use std::fmt::{Display, Formatter};

use crate::config::CodecOptions;
use crate::crs::CoordinateSystemId;
use crate::error::{GeographyError, ParseError, WireFormat};
use crate::geometry::{kind_restricted, Geography};

mod reader;
mod writer;

pub use reader::parse;
pub use writer::Wkt;

const SRID_PREFIX: &str = "SRID=";

/// Parses text with an optional `SRID=<id>;` prefix. Without the prefix the value gets
/// [`Geography::DEFAULT_COORDINATE_SYSTEM_ID`].
pub fn parse_extended(text: &str, options: &CodecOptions) -> Result<Geography, GeographyError> {
    let prefix_len = SRID_PREFIX.len();
    let has_prefix = text
        .get(..prefix_len)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SRID_PREFIX));
    if !has_prefix {
        return Geography::from_text_with_options(
            text,
            Geography::DEFAULT_COORDINATE_SYSTEM_ID,
            options,
        );
    }

    let rest = &text[prefix_len..];
    let Some(separator) = rest.find(';') else {
        return Err(ParseError::new(WireFormat::Text, text.len(), "expected `;` after SRID").into());
    };

    let id = rest[..separator].trim().parse::<i32>().map_err(|_| {
        ParseError::new(WireFormat::Text, prefix_len, "SRID must be an integer")
    })?;

    let body_offset = prefix_len + separator + 1;
    Geography::from_text_with_options(&text[body_offset..], id.into(), options).map_err(|err| {
        match err {
            GeographyError::Parse(ParseError {
                format,
                offset,
                message,
            }) => ParseError::new(format, offset + body_offset, message).into(),
            other => other,
        }
    })
}

impl Geography {
    /// Parses well-known text in the default coordinate system.
    pub fn from_text(text: &str) -> Result<Self, GeographyError> {
        Self::from_text_with_srid(text, Self::DEFAULT_COORDINATE_SYSTEM_ID)
    }

    /// Parses well-known text in the given coordinate system.
    pub fn from_text_with_srid(text: &str, srid: CoordinateSystemId) -> Result<Self, GeographyError> {
        Self::from_text_with_options(text, srid, &CodecOptions::default())
    }

    /// Parses well-known text in the given coordinate system using custom codec options.
    pub fn from_text_with_options(
        text: &str,
        srid: CoordinateSystemId,
        options: &CodecOptions,
    ) -> Result<Self, GeographyError> {
        log::debug!("Parsing WKT of {} bytes with SRID {srid}", text.len());
        let geom = parse(text, options)?;
        Ok(Self::from_valid(geom, srid))
    }

    /// Well-known text with longitude and latitude only.
    pub fn as_text(&self) -> String {
        Wkt::xy(self.geom()).to_string()
    }

    /// Well-known text including elevation and measure, if the value has them.
    ///
    /// Missing ordinates of individual positions are written as `NaN`.
    pub fn as_text_full(&self) -> String {
        Wkt::full(self.geom()).to_string()
    }
}

kind_restricted!(
    from_text_with_srid(&str),
    "well-known text",
    point_from_text => Point,
    line_from_text => LineString,
    polygon_from_text => Polygon,
    multi_point_from_text => MultiPoint,
    multi_line_from_text => MultiLineString,
    multi_polygon_from_text => MultiPolygon,
    collection_from_text => GeometryCollection,
);

impl Display for Geography {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SRID={};{}", self.coordinate_system_id(), Wkt::xy(self.geom()))
    }
}
