//! Error type shared by the path store and the geometry builders.

use std::fmt;

use crate::types::DataKind;

/// Failure modes for path data.
///
/// Only a corrupted segment stream or an unsupported coordinate encoding is
/// an error. Degenerate geometry (zero-length segments, unsolvable arcs,
/// contours too small to fill) is recovered from locally and never surfaces
/// here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    /// Segment byte whose kind bits fall outside the known range.
    UnknownOpcode(u8),
    /// The coordinate buffer ran out before an opcode's fixed arity was met.
    CoordinateUnderrun { opcode: u8, needed: usize, available: usize },
    /// Paths only support 32-bit float coordinates.
    UnsupportedDataKind(DataKind),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::UnknownOpcode(opcode) => {
                write!(f, "unknown segment opcode {:#04x}", opcode)
            }
            PathError::CoordinateUnderrun { opcode, needed, available } => write!(
                f,
                "segment opcode {:#04x} needs {} coordinates, only {} available",
                opcode, needed, available
            ),
            PathError::UnsupportedDataKind(kind) => {
                write!(f, "unsupported path data kind {:?}", kind)
            }
        }
    }
}

impl std::error::Error for PathError {}
