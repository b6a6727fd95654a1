//! Geography markup language (GML) codec.
//!
//! Shapes map to the elements `Point`, `LineString`, `Polygon`, `MultiPoint`, `MultiCurve`, `MultiSurface` and
//! `MultiGeometry`. Positions are listed in `pos` and `posList` elements as whitespace separated ordinates in
//! longitude, latitude order.

use crate::config::CodecOptions;
use crate::crs::CoordinateSystemId;
use crate::error::GeographyError;
use crate::geometry::{kind_restricted, Geography};

mod reader;
mod writer;

pub use reader::parse;
pub use writer::write;

/// Namespace of the written elements.
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml";

/// `srsName` URI of a coordinate system.
pub fn srs_name(srid: CoordinateSystemId) -> String {
    format!("http://www.opengis.net/def/crs/EPSG/0/{srid}")
}

impl Geography {
    /// Parses markup in the default coordinate system.
    pub fn from_gml(markup: &str) -> Result<Self, GeographyError> {
        Self::from_gml_with_srid(markup, Self::DEFAULT_COORDINATE_SYSTEM_ID)
    }

    /// Parses markup in the given coordinate system.
    pub fn from_gml_with_srid(
        markup: &str,
        srid: CoordinateSystemId,
    ) -> Result<Self, GeographyError> {
        Self::from_gml_with_options(markup, srid, &CodecOptions::default())
    }

    /// Parses markup in the given coordinate system using custom codec options.
    pub fn from_gml_with_options(
        markup: &str,
        srid: CoordinateSystemId,
        options: &CodecOptions,
    ) -> Result<Self, GeographyError> {
        log::debug!("Parsing GML of {} bytes with SRID {srid}", markup.len());
        let geom = parse(markup, srid, options)?;
        Ok(Self::from_valid(geom, srid))
    }

    /// Geography markup of the value.
    pub fn as_gml(&self) -> String {
        write(self.geom(), self.coordinate_system_id())
    }
}

kind_restricted!(
    from_gml_with_srid(&str),
    "geography markup",
    point_from_gml => Point,
    line_from_gml => LineString,
    polygon_from_gml => Polygon,
    multi_point_from_gml => MultiPoint,
    multi_line_from_gml => MultiLineString,
    multi_polygon_from_gml => MultiPolygon,
    collection_from_gml => GeometryCollection,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_type::ShapeKind;
    use assert_matches::assert_matches;

    #[test]
    fn srs_name_is_checked() {
        let srid = CoordinateSystemId::new(4269);
        let value = Geography::from_text_with_srid("POINT (1 2)", srid).unwrap();
        let markup = value.as_gml();

        assert_eq!(Geography::from_gml_with_srid(&markup, srid).unwrap(), value);
        assert_matches!(
            Geography::from_gml(&markup),
            Err(GeographyError::CoordinateSystemMismatch { .. })
        );
    }

    #[test]
    fn kind_restricted_constructors() {
        let srid = Geography::DEFAULT_COORDINATE_SYSTEM_ID;
        let markup = "<MultiSurface/>";
        assert!(Geography::multi_polygon_from_gml(markup, srid).is_ok());
        assert_matches!(
            Geography::collection_from_gml(markup, srid),
            Err(GeographyError::UnsupportedShape {
                kind: ShapeKind::MultiPolygon,
                ..
            })
        );
    }
}
