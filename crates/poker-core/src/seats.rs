//! Fixed seating geometry.
//!
//! Seat anchors are percentages of the table's bounding box, walking
//! clockwise from the bottom centre.

use thiserror::Error;

use crate::protocol::{SEAT_COUNT, SeatIndex};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("seat index {0} is out of range (0-7)")]
    IndexOutOfRange(usize),
}

/// Where a seat is painted, as CSS offsets from the table's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatAnchor {
    pub top: &'static str,
    pub left: &'static str,
}

impl SeatAnchor {
    /// Inline `style` value centring an element on the anchor. The table
    /// element must be positioned (`position: relative`).
    pub fn style(&self) -> String {
        format!(
            "position: absolute; top: {}; left: {}; transform: translate(-50%, -50%);",
            self.top, self.left
        )
    }
}

const ANCHORS: [SeatAnchor; SEAT_COUNT] = [
    SeatAnchor { top: "85%", left: "50%" },
    SeatAnchor { top: "75%", left: "15%" },
    SeatAnchor { top: "50%", left: "5%" },
    SeatAnchor { top: "25%", left: "15%" },
    SeatAnchor { top: "15%", left: "50%" },
    SeatAnchor { top: "25%", left: "85%" },
    SeatAnchor { top: "50%", left: "95%" },
    SeatAnchor { top: "75%", left: "85%" },
];

/// The middle of the felt, reserved for the action centre.
pub const ACTION_CENTER: SeatAnchor = SeatAnchor { top: "50%", left: "50%" };

/// Anchor for a raw seat number.
pub fn anchor_for(index: usize) -> Result<SeatAnchor, GeometryError> {
    ANCHORS
        .get(index)
        .copied()
        .ok_or(GeometryError::IndexOutOfRange(index))
}

/// Anchor for an already validated seat.
pub fn anchor_for_seat(seat: SeatIndex) -> SeatAnchor {
    ANCHORS[seat.get()]
}
