//! Output document assembly
//!
//! `OutputDocument` collects output pages, embeds source pages as Form
//! XObjects and records draw operations. Page dictionaries, the page tree
//! and the catalog are written when the document is serialized.

use crate::constants::{OUTPUT_PDF_VERSION, TILE_XOBJECT_PREFIX};
use crate::layout::Rect;
use crate::types::{Result, TileError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::source::SourceDocument;
use super::xobject::{EmbeddedPage, create_page_xobject};

/// Handle to a page of an `OutputDocument`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle(usize);

impl PageHandle {
    /// Zero-based page index
    pub fn index(self) -> usize {
        self.0
    }
}

/// A page under construction
#[derive(Debug)]
struct OutputPage {
    width_pt: f64,
    height_pt: f64,
    content_ops: Vec<String>,
    /// Resource name for each XObject drawn on this page
    xobject_names: BTreeMap<ObjectId, String>,
}

/// A PDF being built in memory
#[derive(Debug)]
pub struct OutputDocument {
    doc: Document,
    pages_tree_id: ObjectId,
    pages: Vec<OutputPage>,
    /// Source objects already copied into this document
    object_cache: HashMap<ObjectId, ObjectId>,
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputDocument {
    /// Create an empty document
    pub fn new() -> Self {
        let mut doc = Document::with_version(OUTPUT_PDF_VERSION);
        let pages_tree_id = doc.new_object_id();
        Self {
            doc,
            pages_tree_id,
            pages: Vec::new(),
            object_cache: HashMap::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a blank page of the given size in points
    pub fn add_page(&mut self, width_pt: f64, height_pt: f64) -> PageHandle {
        self.pages.push(OutputPage {
            width_pt,
            height_pt,
            content_ops: Vec::new(),
            xobject_names: BTreeMap::new(),
        });
        PageHandle(self.pages.len() - 1)
    }

    /// Embed a source page so it can be drawn on any page of this document.
    ///
    /// Resources shared between embedded pages are copied only once.
    pub fn embed_page(
        &mut self,
        source: &SourceDocument,
        index: usize,
    ) -> Result<Arc<EmbeddedPage>> {
        let embedded = create_page_xobject(&mut self.doc, source, index, &mut self.object_cache)?;
        Ok(Arc::new(embedded))
    }

    /// Draw an embedded page so its bounding box fills `rect` on `page`.
    pub fn draw(&mut self, page: PageHandle, embedded: &EmbeddedPage, rect: &Rect) -> Result<()> {
        let bbox = embedded.bbox();
        if !(bbox.width > 0.0) || !(bbox.height > 0.0) {
            return Err(TileError::CompositionFailure(
                "cannot draw a page with an empty bounding box".to_string(),
            ));
        }
        if ![rect.x, rect.y, rect.width, rect.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(TileError::CompositionFailure(format!(
                "draw target is not a finite rectangle: {:?}",
                rect
            )));
        }

        let output_page = self.pages.get_mut(page.0).ok_or_else(|| {
            TileError::CompositionFailure(format!("output page {} does not exist", page.0 + 1))
        })?;

        let next_name = format!("{}{}", TILE_XOBJECT_PREFIX, output_page.xobject_names.len());
        let name = output_page
            .xobject_names
            .entry(embedded.object_id())
            .or_insert(next_name)
            .clone();

        output_page
            .content_ops
            .push(generate_placement_command(&name, &bbox, rect));
        Ok(())
    }

    /// Build the final `lopdf` document: page dictionaries, page tree and catalog
    pub fn into_document(self) -> Document {
        let OutputDocument {
            mut doc,
            pages_tree_id,
            pages,
            ..
        } = self;

        let mut page_refs = Vec::with_capacity(pages.len());
        for page in pages {
            let page_id = write_page(&mut doc, page, pages_tree_id);
            page_refs.push(Object::Reference(page_id));
        }

        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        doc.objects
            .insert(pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_tree_id)),
        ]));
        doc.trailer.set("Root", catalog_id);

        doc
    }

    /// Serialize the document to PDF bytes
    pub fn serialize(self) -> Result<Vec<u8>> {
        let mut doc = self.into_document();
        doc.compress();

        let mut writer = Vec::new();
        doc.save_to(&mut writer)
            .map_err(|e| TileError::CompositionFailure(e.to_string()))?;
        Ok(writer)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write one page dictionary and its content stream
fn write_page(doc: &mut Document, page: OutputPage, parent_pages_id: ObjectId) -> ObjectId {
    let mut xobjects = Dictionary::new();
    for (object_id, name) in &page.xobject_names {
        xobjects.set(name.as_bytes(), Object::Reference(*object_id));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = page.content_ops.join("");
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page.width_pt as f32),
            Object::Real(page.height_pt as f32),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    doc.add_object(page_dict)
}

/// Generate the content stream command that maps `bbox` onto `rect`.
fn generate_placement_command(xobject_name: &str, bbox: &Rect, rect: &Rect) -> String {
    let scale_x = rect.width / bbox.width;
    let scale_y = rect.height / bbox.height;
    let translate_x = rect.x - bbox.x * scale_x;
    let translate_y = rect.y - bbox.y * scale_y;

    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        format_number(scale_x),
        format_number(scale_y),
        format_number(translate_x),
        format_number(translate_y),
        xobject_name
    )
}

/// Format a number for a content stream: fixed point, no trailing zeros
fn format_number(value: f64) -> String {
    let text = format!("{:.5}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "" | "-" | "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}
