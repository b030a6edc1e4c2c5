use crate::constants::DEFAULT_MARGIN_PT;
use crate::layout::{LayoutOptions, create_cell_grid};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tiling configuration supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileOptions {
    /// Output page format and orientation
    pub layout: PageLayout,
    /// Tile arrangement on the output page
    pub grid: GridShape,
    /// Uniform page margin in points
    pub margin_pt: f64,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            layout: PageLayout::LetterPortrait,
            grid: CopiesPerPage::Eight.grid_shape(),
            margin_pt: DEFAULT_MARGIN_PT,
        }
    }
}

impl TileOptions {
    /// Options for one of the catalog copies-per-page selections
    pub fn with_copies(layout: PageLayout, copies: CopiesPerPage) -> Self {
        Self {
            layout,
            grid: copies.grid_shape(),
            ..Default::default()
        }
    }

    /// Number of tiles on the output page
    pub fn tile_count(&self) -> usize {
        self.grid.tile_count()
    }

    /// Resolve the page format and build the planner input
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            format: self.layout.format(),
            grid: self.grid,
            margin_pt: self.margin_pt,
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| TileError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TileError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options.
    ///
    /// Checks the margin and grid against the page format; whether the
    /// cells are large enough for a tile is decided by the planner.
    pub fn validate(&self) -> Result<()> {
        create_cell_grid(&self.layout.format(), self.grid, self.margin_pt).map(|_| ())
    }
}
