use geo::Buffer;
use geo_types::MultiPolygon;

use crate::error::GeographyError;
use crate::geometry_type::Dimension;

use super::convert::Parts;

/// Surface covering all points within `distance` of the parts.
///
/// Negative distance erodes surfaces. Shapes without interior cannot be eroded.
pub(crate) fn buffer(
    parts: &Parts,
    dimension: Dimension,
    distance: f64,
) -> Result<MultiPolygon, GeographyError> {
    if !distance.is_finite() {
        return Err(GeographyError::invalid_argument(
            "distance",
            format!("buffer distance must be finite, got {distance}"),
        ));
    }

    if distance < 0.0 && dimension < Dimension::Surface {
        return Err(GeographyError::invalid_argument(
            "distance",
            format!("negative buffer distance {distance} requires a surface, got {dimension:?} shape"),
        ));
    }

    if parts.is_empty() {
        return Ok(MultiPolygon::new(vec![]));
    }

    log::trace!("Buffering shape of dimension {dimension:?} by {distance}");
    Ok(parts.to_geo().buffer(distance))
}
