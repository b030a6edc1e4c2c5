//! Grid layout calculation
//!
//! This module splits the working area of the output page (the page minus
//! its margins) into equally sized cells, one per tile.

use crate::types::{GridShape, PageFormat, Result, TileError};

use super::{GridPosition, Rect};

/// Cell geometry for one output page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    pub grid: GridShape,
    /// Page area inside the margins
    pub working_area: Rect,
    /// Width of each cell in points
    pub cell_width: f64,
    /// Height of each cell in points
    pub cell_height: f64,
}

// =============================================================================
// Grid Creation
// =============================================================================

/// Create the cell grid for a page.
///
/// Fails with `InvalidLayout` when the margin is negative or not finite,
/// or when it leaves no positive working area.
pub fn create_cell_grid(format: &PageFormat, grid: GridShape, margin_pt: f64) -> Result<CellGrid> {
    if !margin_pt.is_finite() || margin_pt < 0.0 {
        return Err(TileError::InvalidLayout(format!(
            "margin must be a non-negative number of points (got {})",
            margin_pt
        )));
    }
    if grid.columns == 0 || grid.rows == 0 {
        return Err(TileError::InvalidLayout(format!(
            "grid must have at least one column and one row (got {}x{})",
            grid.columns, grid.rows
        )));
    }

    let working_width = format.width - 2.0 * margin_pt;
    let working_height = format.height - 2.0 * margin_pt;

    // Written as negated comparisons so NaN dimensions are rejected too
    if !(working_width > 0.0) || !(working_height > 0.0) {
        return Err(TileError::InvalidLayout(format!(
            "a {}pt margin leaves no room on a {}x{}pt page",
            margin_pt, format.width, format.height
        )));
    }

    Ok(CellGrid {
        grid,
        working_area: Rect::new(margin_pt, margin_pt, working_width, working_height),
        cell_width: working_width / grid.columns as f64,
        cell_height: working_height / grid.rows as f64,
    })
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Calculate the bounds of the cell at the given grid position.
///
/// Row 0 is the top row, while PDF y coordinates grow upwards, so the
/// cell's bottom edge is measured down from the top of the working area.
pub fn cell_bounds(cells: &CellGrid, pos: GridPosition) -> Rect {
    let area = &cells.working_area;
    let cell_x = area.x + pos.col as f64 * cells.cell_width;
    let cell_y = area.top() - (pos.row + 1) as f64 * cells.cell_height;

    Rect::new(cell_x, cell_y, cells.cell_width, cells.cell_height)
}

/// Grid positions in placement order: top row first, left to right
pub fn grid_positions(grid: GridShape) -> impl Iterator<Item = GridPosition> {
    (0..grid.rows).flat_map(move |row| (0..grid.columns).map(move |col| GridPosition::new(row, col)))
}

// =============================================================================
// Tests
// =============================================================================
