//! Carrier used by persistence layers to store a value without parsing it.

use serde::{Deserialize, Serialize};

use crate::check::not_null;
use crate::crs::CoordinateSystemId;
use crate::error::GeographyError;
use crate::geometry::Geography;

/// Serialized form of a [`Geography`]: the coordinate system id and exactly one of well-known text or
/// well-known binary.
///
/// The payload is opaque until the carrier is converted back with [`Geography::try_from`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellKnownValue {
    /// Coordinate system of the value.
    pub coordinate_system_id: CoordinateSystemId,
    /// Well-known text payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_known_text: Option<String>,
    /// Well-known binary payload.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_bytes")]
    pub well_known_binary: Option<Vec<u8>>,
}

impl WellKnownValue {
    /// Carrier holding well-known text.
    pub fn from_text(coordinate_system_id: CoordinateSystemId, text: impl Into<String>) -> Self {
        Self {
            coordinate_system_id,
            well_known_text: Some(text.into()),
            well_known_binary: None,
        }
    }

    /// Carrier holding well-known binary.
    pub fn from_binary(coordinate_system_id: CoordinateSystemId, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            coordinate_system_id,
            well_known_text: None,
            well_known_binary: Some(bytes.into()),
        }
    }
}

impl Geography {
    /// Carrier with the full-fidelity binary form of the value.
    pub fn well_known_value(&self) -> WellKnownValue {
        WellKnownValue::from_binary(self.coordinate_system_id(), self.as_binary())
    }
}

impl TryFrom<&WellKnownValue> for Geography {
    type Error = GeographyError;

    fn try_from(value: &WellKnownValue) -> Result<Self, Self::Error> {
        let srid = value.coordinate_system_id;
        match (&value.well_known_text, &value.well_known_binary) {
            (Some(_), Some(_)) => Err(GeographyError::invalid_argument(
                "value",
                "carrier must hold either text or binary, not both",
            )),
            (Some(text), None) => Self::from_text_with_srid(text, srid),
            (None, binary) => {
                let binary = not_null(binary.as_deref(), "value")?;
                Self::from_binary_with_srid(binary, srid)
            }
        }
    }
}

impl TryFrom<WellKnownValue> for Geography {
    type Error = GeographyError;

    fn try_from(value: WellKnownValue) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn binary_round_trip() {
        let value = Geography::from_text("LINESTRING Z (0 0 1, 1 1 2)").unwrap();
        let carrier = value.well_known_value();
        assert!(carrier.well_known_text.is_none());
        assert_eq!(Geography::try_from(&carrier).unwrap(), value);
    }

    #[test]
    fn text_payload() {
        let srid = CoordinateSystemId::new(4269);
        let carrier = WellKnownValue::from_text(srid, "POINT (1 2)");
        let value = Geography::try_from(carrier).unwrap();
        assert_eq!(value.coordinate_system_id(), srid);
        assert_eq!(value.as_text(), "POINT (1 2)");
    }

    #[test]
    fn exactly_one_payload() {
        let mut carrier = WellKnownValue::from_text(CoordinateSystemId::WGS84, "POINT (1 2)");
        carrier.well_known_binary = Some(vec![1]);
        assert_matches!(
            Geography::try_from(&carrier),
            Err(GeographyError::InvalidArgument { name: "value", .. })
        );

        carrier.well_known_text = None;
        carrier.well_known_binary = None;
        assert_matches!(
            Geography::try_from(&carrier),
            Err(GeographyError::ArgumentNull { name: "value" })
        );
    }

    #[test]
    fn serialization() {
        let carrier = WellKnownValue::from_binary(CoordinateSystemId::WGS84, vec![1, 2, 3]);
        let json = serde_json::to_string(&carrier).unwrap();
        assert_eq!(json, r#"{"coordinate_system_id":4326,"well_known_binary":[1,2,3]}"#);

        let parsed: WellKnownValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, carrier);

        let parsed: WellKnownValue =
            serde_json::from_str(r#"{"coordinate_system_id":4326,"well_known_text":"POINT EMPTY"}"#)
                .unwrap();
        assert_eq!(parsed.well_known_binary, None);
    }
}
