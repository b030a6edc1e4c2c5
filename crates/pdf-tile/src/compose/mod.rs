//! Page composition - tiling one source page onto an output page
//!
//! This module orchestrates the tiling process:
//! 1. Parse the source document and read the first page's size
//! 2. Plan the tile placements for the requested format and grid
//! 3. Embed the source page once and draw it at every placement
//! 4. Serialize the output document

mod io;

pub use io::{load_source, save_output, tiled_output_path};

use crate::layout::plan;
use crate::options::TileOptions;
use crate::render::{OutputDocument, SourceDocument};
use crate::types::*;

/// Compose a tiled PDF from the bytes of a source PDF.
///
/// Only the first source page is used. The input buffer is not retained.
pub fn compose(source_bytes: &[u8], options: &TileOptions) -> Result<Vec<u8>> {
    let source = SourceDocument::parse(source_bytes)?;
    compose_document(&source, options)
}

/// Compose a tiled PDF from an already parsed source document
pub fn compose_document(source: &SourceDocument, options: &TileOptions) -> Result<Vec<u8>> {
    let page_count = source.page_count();
    if page_count == 0 {
        return Err(TileError::EmptySource);
    }
    if page_count > 1 {
        log::debug!("Source has {} pages, tiling only the first", page_count);
    }

    options.validate()?;

    let source_size = source.page_size(0)?;
    let layout = options.layout_options();
    let tile_plan = plan(source_size, &layout)?;
    log::debug!(
        "Planned {}x{} tiles of {:.2}x{:.2}pt (scale {:.4}) on a {}x{}pt page",
        layout.grid.columns,
        layout.grid.rows,
        source_size.width * tile_plan.scale,
        source_size.height * tile_plan.scale,
        tile_plan.scale,
        layout.format.width,
        layout.format.height
    );

    let mut output = OutputDocument::new();
    let page = output.add_page(layout.format.width, layout.format.height);

    // One XObject, drawn once per placement
    let embedded = output.embed_page(source, 0)?;
    for placement in &tile_plan {
        output.draw(page, &embedded, &placement.rect())?;
    }

    let bytes = output.serialize()?;
    log::info!(
        "Composed {} tiles onto one {:?} page ({} bytes)",
        tile_plan.len(),
        options.layout,
        bytes.len()
    );
    Ok(bytes)
}

/// Compose on the blocking thread pool
pub async fn compose_async(source_bytes: Vec<u8>, options: TileOptions) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || compose(&source_bytes, &options)).await?
}
