pub mod compose;
pub mod constants;
pub mod layout;
mod options;
pub mod render;
mod types;

pub use compose::{
    compose, compose_async, compose_document, load_source, save_output, tiled_output_path,
};
pub use layout::{LayoutOptions, Placement, Plan, SourcePageSize, plan};
pub use options::*;
pub use render::{EmbeddedPage, OutputDocument, PageHandle, SourceDocument};
pub use types::*;
