//! PDF document model for tiling
//!
//! This module handles all PDF-specific operations:
//! - Parsing the source document and reading page sizes
//! - Creating XObjects from source pages
//! - Building output pages and drawing XObjects onto them
//! - Serializing the finished document

mod page;
mod source;
mod xobject;

pub use page::{OutputDocument, PageHandle};
pub use source::SourceDocument;
pub use xobject::{EmbeddedPage, copy_object_deep, create_page_xobject};
