use serde::{Deserialize, Serialize};

/// Single coordinate axis used for card rows, columns, and positions.
pub type Coord = u8;

/// Count type used for winning-cell counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional grid coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Position on the rendering surface, in surface pixels.
pub type SurfacePoint = (f64, f64);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}
