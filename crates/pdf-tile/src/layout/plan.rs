//! Tile placement planning
//!
//! Given the source page size and the layout options, compute where each
//! copy of the source page goes on the output page. Every tile is scaled
//! by the same factor, chosen so the tile fits its cell (minus the inner
//! padding) without cropping or distortion, and is centered in its cell.

use crate::constants::INNER_PADDING_PT;
use crate::types::{Result, TileError};

use super::{
    LayoutOptions, Placement, Plan, Rect, SourcePageSize, cell_bounds, create_cell_grid,
    grid_positions,
};

/// Compute the placement of every tile on the output page.
///
/// The result holds exactly `columns × rows` placements in row-major
/// order (top row first). The function is pure: identical inputs always
/// produce identical plans.
pub fn plan(source: SourcePageSize, options: &LayoutOptions) -> Result<Plan> {
    if !(source.width > 0.0) || !(source.height > 0.0) {
        return Err(TileError::InvalidLayout(format!(
            "source page must have a positive size (got {}x{}pt)",
            source.width, source.height
        )));
    }

    let cells = create_cell_grid(&options.format, options.grid, options.margin_pt)?;

    let available_width = cells.cell_width - INNER_PADDING_PT;
    let available_height = cells.cell_height - INNER_PADDING_PT;
    if available_width <= 0.0 || available_height <= 0.0 {
        return Err(TileError::InvalidLayout(format!(
            "{}x{} cells of {:.2}x{:.2}pt are too small for a tile",
            options.grid.columns, options.grid.rows, cells.cell_width, cells.cell_height
        )));
    }

    let scale = fit_scale(source, available_width, available_height);
    let scaled_width = source.width * scale;
    let scaled_height = source.height * scale;

    let placements = grid_positions(options.grid)
        .map(|pos| center_in_cell(&cell_bounds(&cells, pos), scaled_width, scaled_height))
        .collect();

    Ok(Plan {
        grid: options.grid,
        scale,
        placements,
    })
}

/// Uniform scale that fits the source inside the available area (letterbox fit)
fn fit_scale(source: SourcePageSize, available_width: f64, available_height: f64) -> f64 {
    let scale_w = available_width / source.width;
    let scale_h = available_height / source.height;
    scale_w.min(scale_h)
}

fn center_in_cell(cell: &Rect, scaled_width: f64, scaled_height: f64) -> Placement {
    Placement {
        x: cell.x + (cell.width - scaled_width) / 2.0,
        y: cell.y + (cell.height - scaled_height) / 2.0,
        scaled_width,
        scaled_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GridShape, PageFormat};

    fn options(columns: usize, rows: usize, margin_pt: f64) -> LayoutOptions {
        LayoutOptions {
            format: PageFormat::new(612.0, 792.0),
            grid: GridShape::new(columns, rows).unwrap(),
            margin_pt,
        }
    }

    #[test]
    fn test_fit_scale() {
        // Width-limited
        let scale = fit_scale(SourcePageSize::new(800.0, 600.0), 400.0, 400.0);
        assert!((scale - 0.5).abs() < 1e-9);

        // Height-limited
        let scale = fit_scale(SourcePageSize::new(400.0, 800.0), 400.0, 400.0);
        assert!((scale - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_check_on_letter_eight_up() {
        let plan = plan(SourcePageSize::new(200.0, 100.0), &options(2, 4, 18.0)).unwrap();

        assert_eq!(plan.len(), 8);
        assert!((plan.scale - 1.39).abs() < 1e-9);

        let first = plan.placements[0];
        assert!((first.scaled_width - 278.0).abs() < 1e-9);
        assert!((first.scaled_height - 139.0).abs() < 1e-9);
        assert!((first.x - 23.0).abs() < 1e-9);
        assert!((first.y - 610.0).abs() < 1e-9);

        // Second tile in the top row is one cell to the right
        let second = plan.placements[1];
        assert!((second.x - 311.0).abs() < 1e-9);
        assert!((second.y - first.y).abs() < 1e-9);

        // First tile of the next row is one cell lower
        let third = plan.placements[2];
        assert!((third.x - first.x).abs() < 1e-9);
        assert!((third.y - 421.0).abs() < 1e-9);
    }

    #[test]
    fn test_centered_in_cell() {
        let placement = center_in_cell(&Rect::new(10.0, 20.0, 100.0, 50.0), 80.0, 30.0);
        assert_eq!(placement.x, 20.0);
        assert_eq!(placement.y, 30.0);
    }

    #[test]
    fn test_padding_leaves_no_room() {
        // 80 rows leave cells shorter than the inner padding
        let result = plan(SourcePageSize::new(100.0, 100.0), &options(1, 80, 18.0));
        assert!(matches!(result, Err(TileError::InvalidLayout(_))));
    }

    #[test]
    fn test_degenerate_source_rejected() {
        let result = plan(SourcePageSize::new(0.0, 100.0), &options(1, 1, 18.0));
        assert!(matches!(result, Err(TileError::InvalidLayout(_))));
    }
}
