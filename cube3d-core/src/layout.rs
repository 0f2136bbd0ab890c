//! Fixed configuration of the 3x3x3 grid
//!
//! Positions are numbered front layer first (z = 1), each layer top row first
//! (y = 1), each row left to right (x = -1 .. 1). These tables never change at
//! runtime.
use nalgebra::Vector3;

use crate::transform::RotationAxis;

/// Number of sub-cubes, and of grid positions
pub const NUM_SUB_CUBES: usize = 27;

/// Uniform scale applied to every sub-cube so that gaps show between them
pub const SUB_CUBE_SCALE: f32 = 0.49;

/// Grid coordinate of every position
pub const POSITION_COORDS: [[f32; 3]; NUM_SUB_CUBES] = [
    // front layer
    [-1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [-1.0, -1.0, 1.0],
    [0.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    // middle layer
    [-1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, -1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    // back layer
    [-1.0, 1.0, -1.0],
    [0.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 0.0, -1.0],
    [1.0, 0.0, -1.0],
    [-1.0, -1.0, -1.0],
    [0.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
];

/// Grid coordinate of a position
///
/// Panics if `position` is not in `0..27`.
pub fn position_coords(position: usize) -> Vector3<f32> {
    let [x, y, z] = POSITION_COORDS[position];
    Vector3::new(x, y, z)
}

/// One of the nine layers that can be turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Slice {
    #[strum(serialize = "front")]
    FrontZ,
    #[strum(serialize = "middle (roll)")]
    MidZ,
    #[strum(serialize = "back")]
    BackZ,
    #[strum(serialize = "top")]
    TopY,
    #[strum(serialize = "middle (pitch)")]
    MidY,
    #[strum(serialize = "bottom")]
    BottomY,
    #[strum(serialize = "left")]
    LeftX,
    #[strum(serialize = "middle (yaw)")]
    MidX,
    #[strum(serialize = "right")]
    RightX,
}

impl Slice {
    pub fn axis(self) -> RotationAxis {
        match self {
            Slice::FrontZ | Slice::MidZ | Slice::BackZ => RotationAxis::Roll,
            Slice::TopY | Slice::MidY | Slice::BottomY => RotationAxis::Pitch,
            Slice::LeftX | Slice::MidX | Slice::RightX => RotationAxis::Yaw,
        }
    }

    /// Positions in this slice, as a 3x3 grid in reading order.
    ///
    /// The orders are chosen so that one cell permutation describes a quarter
    /// turn of every slice (see [`RotationDirection::destination_cell`]).
    pub fn positions(self) -> &'static [usize; 9] {
        match self {
            Slice::FrontZ => &[0, 1, 2, 3, 4, 5, 6, 7, 8],
            Slice::MidZ => &[9, 10, 11, 12, 13, 14, 15, 16, 17],
            Slice::BackZ => &[18, 19, 20, 21, 22, 23, 24, 25, 26],
            Slice::TopY => &[18, 19, 20, 9, 10, 11, 0, 1, 2],
            Slice::MidY => &[21, 22, 23, 12, 13, 14, 3, 4, 5],
            Slice::BottomY => &[24, 25, 26, 15, 16, 17, 6, 7, 8],
            Slice::LeftX => &[6, 3, 0, 15, 12, 9, 24, 21, 18],
            Slice::MidX => &[7, 4, 1, 16, 13, 10, 25, 22, 19],
            Slice::RightX => &[8, 5, 2, 17, 14, 11, 26, 23, 20],
        }
    }

    pub fn contains(self, position: usize) -> bool {
        self.positions().contains(&position)
    }
}

/// Sense of a quarter turn
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum RotationDirection {
    #[default]
    #[strum(serialize = "clockwise")]
    Clockwise,
    #[strum(serialize = "counter-clockwise")]
    CounterClockwise,
}

impl RotationDirection {
    /// Multiplier for angles around the slice axis
    pub fn sign(self) -> f32 {
        match self {
            RotationDirection::Clockwise => -1.0,
            RotationDirection::CounterClockwise => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    /// Cell of the 3x3 slice grid that the occupant of `cell` moves to.
    ///
    /// Clockwise sends `(r, c)` to `(c, 2 - r)`; counter-clockwise is the
    /// inverse, `(r, c)` to `(2 - c, r)`.
    pub fn destination_cell(self, cell: usize) -> usize {
        assert!(cell < 9, "slice cell {cell} out of range");
        let (r, c) = (cell / 3, cell % 3);
        let (r, c) = match self {
            RotationDirection::Clockwise => (c, 2 - r),
            RotationDirection::CounterClockwise => (2 - c, r),
        };
        r * 3 + c
    }
}
