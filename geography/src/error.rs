//! Error types used by the crate.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::crs::CoordinateSystemId;
use crate::geometry_type::ShapeKind;

/// Interchange format a [`ParseError`] originates from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// Well-known text.
    Text,
    /// Well-known binary.
    Binary,
    /// Geography markup language.
    Markup,
}

impl Display for WireFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WireFormat::Text => write!(f, "WKT"),
            WireFormat::Binary => write!(f, "WKB"),
            WireFormat::Markup => write!(f, "GML"),
        }
    }
}

/// Malformed input to one of the codecs.
///
/// `offset` is the byte offset into the input where the problem was detected. For markup input the
/// offset points to the end of the XML event that was being processed, so it is approximate.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {format} at offset {offset}: {message}")]
pub struct ParseError {
    /// Format of the input.
    pub format: WireFormat,
    /// Approximate byte offset of the problem.
    pub offset: usize,
    /// Description of the problem.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(format: WireFormat, offset: usize, message: impl Into<String>) -> Self {
        Self {
            format,
            offset,
            message: message.into(),
        }
    }
}

/// Geography error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeographyError {
    /// A required argument was not given.
    #[error("argument `{name}` is required")]
    ArgumentNull {
        /// Name of the missing argument.
        name: &'static str,
    },
    /// Argument is well-formed, but cannot be used for the requested operation.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// Malformed text, binary or markup input.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Operands use different coordinate systems.
    #[error("coordinate system mismatch: expected {expected}, found {found}")]
    CoordinateSystemMismatch {
        /// Coordinate system of the receiver.
        expected: CoordinateSystemId,
        /// Coordinate system of the other operand.
        found: CoordinateSystemId,
    },
    /// Index based accessor was called with an index outside of `[0, count)`.
    #[error("index {index} is out of range for {count} elements")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available elements.
        count: usize,
    },
    /// Operation cannot be applied to the given shape kind.
    #[error("{operation} is not supported for {kind}")]
    UnsupportedShape {
        /// Operation name.
        operation: &'static str,
        /// Kind of the shape the operation was requested for.
        kind: ShapeKind,
    },
}

impl GeographyError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
