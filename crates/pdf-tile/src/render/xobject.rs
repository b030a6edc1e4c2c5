//! XObject creation for tiling
//!
//! This module turns a source page into a Form XObject inside the output
//! document. The XObject is created once and then drawn at every tile
//! position with a different transformation.

use crate::layout::{Rect, SourcePageSize};
use crate::types::{Result, TileError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::source::{SourceDocument, inherited_attribute, resolve};

/// A source page embedded in an output document.
///
/// The handle is immutable once created; the composer shares one handle
/// across every draw call for a page.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedPage {
    object_id: ObjectId,
    bbox: Rect,
}

impl EmbeddedPage {
    /// Object ID of the Form XObject in the output document
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// The XObject's bounding box (the source MediaBox) in source units
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Size of the page when drawn at scale 1
    pub fn intrinsic_size(&self) -> SourcePageSize {
        SourcePageSize::new(self.bbox.width, self.bbox.height)
    }
}

#[cfg(test)]
impl EmbeddedPage {
    pub(crate) fn for_test(object_id: ObjectId, width: f64, height: f64) -> Self {
        Self {
            object_id,
            bbox: Rect::new(0.0, 0.0, width, height),
        }
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create a Form XObject from a source page.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `index` - Zero-based index of the source page
/// * `cache` - Maps source object IDs to their copies, so shared resources are copied once
pub fn create_page_xobject(
    output: &mut Document,
    source: &SourceDocument,
    index: usize,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<EmbeddedPage> {
    let doc = source.document();
    let page_id = source.page_id(index)?;
    let page_dict = doc.get_dictionary(page_id)?;
    let bbox = source.media_box(index)?;

    let content = get_page_content(doc, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("FormType", Object::Integer(1));
    xobject_dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(bbox.x as f32),
            Object::Real(bbox.y as f32),
            Object::Real(bbox.right() as f32),
            Object::Real(bbox.top() as f32),
        ]),
    );

    if let Some(resources) = inherited_attribute(doc, page_id, b"Resources") {
        xobject_dict.set("Resources", copy_object_deep(output, doc, resources, cache)?);
    }

    if let Ok(group) = page_dict.get(b"Group") {
        xobject_dict.set("Group", copy_object_deep(output, doc, group, cache)?);
    }

    // Still-encoded content keeps its decoding filters
    if let Some(encoding) = content.encoding {
        for key in [b"Filter".as_slice(), b"DecodeParms".as_slice()] {
            if let Ok(value) = encoding.get(key) {
                xobject_dict.set(key, copy_object_deep(output, doc, value, cache)?);
            }
        }
    }

    let mut stream = Stream::new(xobject_dict, content.data);
    if content.encoding.is_some() {
        stream.allows_compression = false;
    }
    let object_id = output.add_object(stream);
    log::debug!(
        "Embedded source page {} as XObject {:?} ({}x{}pt)",
        index + 1,
        object_id,
        bbox.width,
        bbox.height
    );

    Ok(EmbeddedPage { object_id, bbox })
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Content of a page, ready to become the body of a Form XObject
struct PageContent<'a> {
    data: Vec<u8>,
    /// Dictionary of a single content stream that could not be decoded.
    /// `data` is then the encoded stream and needs its filters.
    encoding: Option<&'a Dictionary>,
}

/// Get the content stream data from a page.
fn get_page_content<'a>(doc: &'a Document, page_dict: &'a Dictionary) -> Result<PageContent<'a>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => resolve(doc, c),
        // No content = blank page
        Err(_) => {
            return Ok(PageContent {
                data: Vec::new(),
                encoding: None,
            });
        }
    };

    match contents {
        Object::Stream(stream) => Ok(match decoded_content(stream) {
            Some(data) => PageContent {
                data,
                encoding: None,
            },
            None => {
                log::warn!("Could not decode the page content, embedding it still encoded");
                PageContent {
                    data: stream.content.clone(),
                    encoding: Some(&stream.dict),
                }
            }
        }),
        Object::Array(arr) => Ok(PageContent {
            data: get_concatenated_content_streams(doc, arr)?,
            encoding: None,
        }),
        _ => Ok(PageContent {
            data: Vec::new(),
            encoding: None,
        }),
    }
}

/// Concatenate multiple content streams.
///
/// Encoded parts cannot be mixed into one stream, so every part must decode.
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for (idx, obj) in refs.iter().enumerate() {
        if let Object::Stream(stream) = resolve(doc, obj) {
            let data = decoded_content(stream).ok_or_else(|| {
                TileError::CompositionFailure(format!(
                    "content stream {} of the source page cannot be decoded",
                    idx + 1
                ))
            })?;
            result.extend_from_slice(&data);
            result.push(b'\n');
        }
    }

    Ok(result)
}

/// Stream data with its filters removed, `None` when a filter is not supported
fn decoded_content(stream: &Stream) -> Option<Vec<u8>> {
    if !stream.dict.has(b"Filter") {
        return Some(stream.content.clone());
    }
    stream.decompressed_content().ok()
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Each referenced object is copied at most once. Its new ID is reserved
/// before its contents are copied, so reference cycles terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let copied = copy_object_deep(output, source, resolve(source, obj), cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_stream_is_used_as_is() {
        let stream = Stream::new(Dictionary::new(), b"0 0 1 rg".to_vec());
        assert_eq!(decoded_content(&stream), Some(b"0 0 1 rg".to_vec()));
    }

    #[test]
    fn test_unsupported_filter_is_not_decoded() {
        let dict = Dictionary::from_iter(vec![("Filter", Object::Name(b"ASCIIHexDecode".to_vec()))]);
        let stream = Stream::new(dict, b"30>".to_vec());
        assert_eq!(decoded_content(&stream), None);
    }
}
