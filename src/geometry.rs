// src/geometry.rs

//! Small geometry value types shared by surfaces, the compositor, and the
//! display adapter: cell-space coordinates/rectangles and pixel-space
//! rectangles.
//!
//! Cell space uses `i32` so callers can address positions just off the
//! grid (negative or past the edge) without casting; grid surfaces clamp
//! such writes silently.

use serde::{Deserialize, Serialize};

/// Coordinates of a single character cell on a grid (0-based, cell units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoords {
    pub x: i32,
    pub y: i32,
}

impl CellCoords {
    pub const fn new(x: i32, y: i32) -> Self {
        CellCoords { x, y }
    }
}

/// A rectangular area of cells on a grid, width/height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        CellRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// A rectangle in pixel space, used for texture source/destination
/// regions and surface render placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Scales a cell rectangle up to pixels given the cell size.
    pub fn from_cells(rect: CellRect, cell_width: u32, cell_height: u32) -> Self {
        PixelRect {
            x: rect.x * cell_width as i32,
            y: rect.y * cell_height as i32,
            width: rect.width * cell_width,
            height: rect.height * cell_height,
        }
    }
}

/// Bounds check shared by the grid surfaces: true when `(x, y)` lies
/// within a `width × height` grid.
pub(crate) fn in_bounds(x: i32, y: i32, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}
