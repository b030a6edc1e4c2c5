//! Layout data types for tiling
//!
//! These types carry the geometry between the layout planner and the
//! page composer. All coordinates are in points with the origin at the
//! bottom-left corner of the output page.

use crate::types::{GridShape, PageFormat};

/// Intrinsic size of the source page in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePageSize {
    pub width: f64,
    pub height: f64,
}

impl SourcePageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Everything the planner needs besides the source size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Output page size
    pub format: PageFormat,
    /// Tile arrangement
    pub grid: GridShape,
    /// Uniform margin on all four sides of the page
    pub margin_pt: f64,
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

/// Final position and rendered size of one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub scaled_width: f64,
    pub scaled_height: f64,
}

impl Placement {
    /// The tile as a rectangle on the output page
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.scaled_width, self.scaled_height)
    }
}

/// Ordered tile placements for one output page.
///
/// Placements are stored row-major: top row first, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Grid the placements were computed for
    pub grid: GridShape,
    /// Uniform scale factor applied to the source page
    pub scale: f64,
    pub placements: Vec<Placement>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    /// Placement for a grid position, if it lies within the grid
    pub fn at(&self, pos: GridPosition) -> Option<&Placement> {
        if pos.row >= self.grid.rows || pos.col >= self.grid.columns {
            return None;
        }
        self.placements.get(pos.row * self.grid.columns + pos.col)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}
