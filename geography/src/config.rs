//! Runtime options of the codecs.

use serde::{Deserialize, Serialize};

use crate::geometry::MAX_DEPTH;

const DEFAULT_MAX_DEPTH: usize = 32;

/// How a coordinate with three ordinates and no explicit `Z`/`M` marker is interpreted.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThirdOrdinate {
    /// The third ordinate is elevation.
    #[default]
    Elevation,
    /// The third ordinate is measure.
    Measure,
}

/// Byte order of binary output.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Most significant byte first (binary flag `0`).
    BigEndian,
    /// Least significant byte first (binary flag `1`).
    #[default]
    LittleEndian,
}

/// Options used by the text, binary and markup codecs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    max_depth: usize,
    three_ordinates: ThirdOrdinate,
    byte_order: ByteOrder,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            three_ordinates: ThirdOrdinate::default(),
            byte_order: ByteOrder::default(),
        }
    }
}

impl CodecOptions {
    /// Maximum nesting depth of geometry collections accepted by the readers.
    ///
    /// A plain shape has depth 1. The value never exceeds [`MAX_DEPTH`].
    pub fn max_depth(&self) -> usize {
        self.max_depth.clamp(1, MAX_DEPTH)
    }

    /// Sets maximum nesting depth accepted by the readers. Values above [`MAX_DEPTH`] are clamped.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets maximum nesting depth accepted by the readers. Values above [`MAX_DEPTH`] are clamped.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Interpretation of unmarked three-ordinate coordinates.
    pub fn three_ordinates(&self) -> ThirdOrdinate {
        self.three_ordinates
    }

    /// Sets interpretation of unmarked three-ordinate coordinates.
    pub fn with_three_ordinates(mut self, value: ThirdOrdinate) -> Self {
        self.three_ordinates = value;
        self
    }

    /// Sets interpretation of unmarked three-ordinate coordinates.
    pub fn set_three_ordinates(&mut self, value: ThirdOrdinate) {
        self.three_ordinates = value;
    }

    /// Byte order used by the binary writer. The reader always honours the order flag of the input.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Sets byte order used by the binary writer.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Sets byte order used by the binary writer.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_depth_is_clamped() {
        assert_eq!(CodecOptions::default().max_depth(), 32);
        assert_eq!(CodecOptions::default().with_max_depth(1000).max_depth(), MAX_DEPTH);
        assert_eq!(CodecOptions::default().with_max_depth(0).max_depth(), 1);
    }

    #[test]
    fn deserialize_partial() {
        let options: CodecOptions = serde_json::from_str(r#"{"three_ordinates": "Measure"}"#).unwrap();
        assert_eq!(options.three_ordinates(), ThirdOrdinate::Measure);
        assert_eq!(options.byte_order(), ByteOrder::LittleEndian);
        assert_eq!(options.max_depth(), 32);
    }
}
