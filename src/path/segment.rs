//! Segment opcode encoding.
//!
//! One byte per segment: kind in the upper seven bits, the relative flag in
//! bit 0. Coordinate arity is fixed per kind, so a segment stream plus a
//! coordinate buffer fully describe a path without any framing.

use crate::error::PathError;

/// The thirteen segment kinds.
///
/// Arc kinds encode the large/small and CW/CCW flags in the opcode itself;
/// all four consume the same five coordinates `(rh, rv, rot, x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SegmentKind {
    ClosePath = 0,
    MoveTo = 1,
    LineTo = 2,
    HLineTo = 3,
    VLineTo = 4,
    QuadTo = 5,
    CubicTo = 6,
    SmoothQuadTo = 7,
    SmoothCubicTo = 8,
    SmallCcwArcTo = 9,
    SmallCwArcTo = 10,
    LargeCcwArcTo = 11,
    LargeCwArcTo = 12,
}

impl SegmentKind {
    /// Number of coordinate values the segment consumes.
    pub fn coord_count(self) -> usize {
        match self {
            SegmentKind::ClosePath => 0,
            SegmentKind::HLineTo | SegmentKind::VLineTo => 1,
            SegmentKind::MoveTo | SegmentKind::LineTo | SegmentKind::SmoothQuadTo => 2,
            SegmentKind::QuadTo | SegmentKind::SmoothCubicTo => 4,
            SegmentKind::CubicTo => 6,
            SegmentKind::SmallCcwArcTo
            | SegmentKind::SmallCwArcTo
            | SegmentKind::LargeCcwArcTo
            | SegmentKind::LargeCwArcTo => 5,
        }
    }

    pub fn is_arc(self) -> bool {
        matches!(
            self,
            SegmentKind::SmallCcwArcTo
                | SegmentKind::SmallCwArcTo
                | SegmentKind::LargeCcwArcTo
                | SegmentKind::LargeCwArcTo
        )
    }
}

/// A decoded segment byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub relative: bool,
}

impl Segment {
    pub fn abs(kind: SegmentKind) -> Segment {
        Segment { kind, relative: false }
    }

    pub fn rel(kind: SegmentKind) -> Segment {
        Segment { kind, relative: true }
    }

    pub fn decode(opcode: u8) -> Result<Segment, PathError> {
        let kind = match opcode >> 1 {
            0 => SegmentKind::ClosePath,
            1 => SegmentKind::MoveTo,
            2 => SegmentKind::LineTo,
            3 => SegmentKind::HLineTo,
            4 => SegmentKind::VLineTo,
            5 => SegmentKind::QuadTo,
            6 => SegmentKind::CubicTo,
            7 => SegmentKind::SmoothQuadTo,
            8 => SegmentKind::SmoothCubicTo,
            9 => SegmentKind::SmallCcwArcTo,
            10 => SegmentKind::SmallCwArcTo,
            11 => SegmentKind::LargeCcwArcTo,
            12 => SegmentKind::LargeCwArcTo,
            _ => return Err(PathError::UnknownOpcode(opcode)),
        };
        Ok(Segment { kind, relative: opcode & 1 != 0 })
    }

    pub fn encode(self) -> u8 {
        ((self.kind as u8) << 1) | self.relative as u8
    }
}
