//! Shared constants for PDF tiling
//!
//! This module centralizes magic numbers and constants used by the
//! layout planner and the page composer.

// =============================================================================
// Page Formats
// =============================================================================

/// US Letter in points (8.5" × 11")
pub const LETTER_DIMENSIONS_PT: (f64, f64) = (612.0, 792.0);

/// A4 in points (210mm × 297mm)
pub const A4_DIMENSIONS_PT: (f64, f64) = (595.28, 841.89);

/// Fallback source page size when a page carries no MediaBox
pub const DEFAULT_PAGE_DIMENSIONS: (f64, f64) = LETTER_DIMENSIONS_PT;

// =============================================================================
// Layout
// =============================================================================

/// Space subtracted from each cell dimension before fitting a tile,
/// leaving a gap between neighbouring tiles (points)
pub const INNER_PADDING_PT: f64 = 10.0;

/// Default page margin (points, a quarter inch)
pub const DEFAULT_MARGIN_PT: f64 = 18.0;

// =============================================================================
// Output Document
// =============================================================================

/// PDF version written to composed documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";

/// Prefix of the resource names given to embedded pages on an output page
pub const TILE_XOBJECT_PREFIX: &str = "Tile";

/// Upper bound on `Parent` links followed when resolving inherited page attributes
pub const MAX_PAGE_TREE_DEPTH: usize = 64;
