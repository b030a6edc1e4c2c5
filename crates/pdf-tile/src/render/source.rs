//! Source document access
//!
//! Parses the source PDF and reads page geometry, resolving attributes
//! that pages inherit from their ancestors in the page tree.

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, MAX_PAGE_TREE_DEPTH};
use crate::layout::{Rect, SourcePageSize};
use crate::types::{Result, TileError};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// A parsed source PDF
#[derive(Debug, Clone)]
pub struct SourceDocument {
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Parse a PDF from memory.
    ///
    /// Fails with `MalformedSource` when the bytes are not a readable PDF.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes).map_err(|e| TileError::MalformedSource(e.to_string()))?;
        Ok(Self::from_document(doc))
    }

    /// Wrap an already loaded document
    pub fn from_document(doc: Document) -> Self {
        let page_ids = doc.get_pages().values().copied().collect();
        Self { doc, page_ids }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Intrinsic size of a page in points, taken from its MediaBox
    pub fn page_size(&self, index: usize) -> Result<SourcePageSize> {
        let media_box = self.media_box(index)?;
        if !(media_box.width > 0.0) || !(media_box.height > 0.0) {
            return Err(TileError::MalformedSource(format!(
                "page {} has an empty MediaBox ({}x{}pt)",
                index + 1,
                media_box.width,
                media_box.height
            )));
        }
        Ok(SourcePageSize::new(media_box.width, media_box.height))
    }

    pub(crate) fn document(&self) -> &Document {
        &self.doc
    }

    pub(crate) fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids.get(index).copied().ok_or_else(|| {
            TileError::MalformedSource(format!(
                "page {} requested but the document has {} pages",
                index + 1,
                self.page_ids.len()
            ))
        })
    }

    /// The page's MediaBox, normalized so width and height are not negative.
    ///
    /// Pages without a MediaBox fall back to US Letter.
    pub(crate) fn media_box(&self, index: usize) -> Result<Rect> {
        let page_id = self.page_id(index)?;
        let fallback = Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1);

        let Some(value) = inherited_attribute(&self.doc, page_id, b"MediaBox") else {
            log::debug!("Page {} has no MediaBox, assuming US Letter", index + 1);
            return Ok(fallback);
        };

        let numbers: Option<Vec<f64>> = match resolve(&self.doc, value) {
            Object::Array(items) if items.len() == 4 => items
                .iter()
                .map(|item| extract_number(resolve(&self.doc, item)))
                .collect(),
            _ => None,
        };

        match numbers.as_deref() {
            Some(&[x0, y0, x1, y1]) => Ok(Rect::new(
                x0.min(x1),
                y0.min(y1),
                (x1 - x0).abs(),
                (y1 - y0).abs(),
            )),
            _ => Err(TileError::MalformedSource(format!(
                "page {} has an unreadable MediaBox",
                index + 1
            ))),
        }
    }
}

/// Look up a page attribute, walking up the page tree for inheritable keys
/// such as `MediaBox` and `Resources`.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node: &Dictionary = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

const NULL_OBJECT: &Object = &Object::Null;

/// Follow an indirect reference; dangling references resolve to null
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(NULL_OBJECT),
        _ => obj,
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}
