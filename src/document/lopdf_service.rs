use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use super::DocumentService;
use crate::config::CompressionLevel;
use crate::error::{PdfPagesError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic Parent chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// A page copied into a destination document, not yet in its page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle(ObjectId);

impl PageHandle {
    /// Object id of the copied page dictionary.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

/// [`DocumentService`] backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfService {
    compression: CompressionLevel,
}

impl LopdfService {
    /// Create a service with standard compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service that applies `compression` when serializing.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self { compression }
    }
}

impl DocumentService for LopdfService {
    type Document = Document;
    type Page = PageHandle;

    fn load(&self, bytes: &[u8]) -> Result<Document> {
        let doc =
            Document::load_mem(bytes).map_err(|err| PdfPagesError::invalid_pdf(err.to_string()))?;

        if doc.trailer.get(b"Encrypt").is_ok() {
            return Err(PdfPagesError::invalid_pdf("document is encrypted"));
        }

        Ok(doc)
    }

    fn page_count(&self, document: &Document) -> usize {
        document.get_pages().len()
    }

    fn create_empty(&self) -> Document {
        let mut doc = Document::with_version("1.7");

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc
    }

    fn copy_pages(
        &self,
        dest: &mut Document,
        source: &Document,
        indices: &[usize],
    ) -> Result<Vec<PageHandle>> {
        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        let mut copier = ObjectCopier::new(source);
        let mut handles = Vec::with_capacity(indices.len());

        for &index in indices {
            let page_id =
                *source_pages
                    .get(index)
                    .ok_or_else(|| PdfPagesError::PageOutOfRange {
                        index,
                        page_count: source_pages.len(),
                    })?;

            let mut page = source.get_dictionary(page_id)?.clone();
            for key in INHERITABLE_KEYS {
                if !page.has(key)
                    && let Some(value) = inherited_attribute(source, page_id, key)
                {
                    page.set(key, value.clone());
                }
            }
            page.remove(b"Parent");

            // Reserve the id first so references back to this page (e.g. from
            // its annotations) resolve to the copy.
            let new_id = copier.reserve(dest, page_id);
            let copied = copier.copy_dictionary(dest, &page);
            dest.objects.insert(new_id, Object::Dictionary(copied));

            handles.push(PageHandle(new_id));
        }

        tracing::debug!(
            pages = handles.len(),
            objects = copier.copied.len(),
            "copied pages"
        );

        Ok(handles)
    }

    fn append_page(&self, dest: &mut Document, page: PageHandle) -> Result<()> {
        let pages_id = dest.catalog()?.get(b"Pages")?.as_reference()?;

        dest.get_object_mut(page.0)?
            .as_dict_mut()?
            .set("Parent", pages_id);

        let pages_dict = dest.get_object_mut(pages_id)?.as_dict_mut()?;

        pages_dict
            .get_mut(b"Kids")?
            .as_array_mut()?
            .push(Object::Reference(page.0));

        let current_count = pages_dict
            .get(b"Count")
            .and_then(|count| count.as_i64())
            .unwrap_or(0);
        pages_dict.set("Count", Object::Integer(current_count + 1));

        Ok(())
    }

    fn serialize(&self, dest: &mut Document) -> Result<Vec<u8>> {
        match self.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => dest.compress(),
            CompressionLevel::Maximum => {
                dest.prune_objects();
                dest.compress();
            }
        }

        let mut bytes = Vec::new();
        dest.save_to(&mut bytes)
            .map_err(|err| PdfPagesError::SerializeFailed {
                reason: err.to_string(),
            })?;

        Ok(bytes)
    }
}

/// Look up a page attribute, walking up the page tree when the page itself
/// does not define it.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

/// Deep-copies objects from one document into another, renumbering
/// references. Each source object is copied at most once per copier.
struct ObjectCopier<'a> {
    source: &'a Document,
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source: &'a Document) -> Self {
        Self {
            source,
            copied: HashMap::new(),
        }
    }

    fn reserve(&mut self, dest: &mut Document, source_id: ObjectId) -> ObjectId {
        let new_id = dest.new_object_id();
        self.copied.insert(source_id, new_id);
        new_id
    }

    fn copy_reference(&mut self, dest: &mut Document, source_id: ObjectId) -> ObjectId {
        if let Some(&new_id) = self.copied.get(&source_id) {
            return new_id;
        }

        let new_id = self.reserve(dest, source_id);
        let copied = match self.source.get_object(source_id) {
            Ok(object) => self.copy_object(dest, object),
            Err(_) => Object::Null,
        };
        dest.objects.insert(new_id, copied);

        new_id
    }

    fn copy_object(&mut self, dest: &mut Document, object: &Object) -> Object {
        match object {
            Object::Reference(id) => Object::Reference(self.copy_reference(dest, *id)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(dest, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dest, dict)),
            Object::Stream(stream) => {
                let mut copy = stream.clone();
                copy.dict = self.copy_dictionary(dest, &stream.dict);
                Object::Stream(copy)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, dest: &mut Document, dict: &Dictionary) -> Dictionary {
        // Following Parent out of a page node would drag the whole source
        // page tree along.
        let is_page_node = dict
            .get(b"Type")
            .and_then(Object::as_name)
            .map(|name| name == b"Page" || name == b"Pages")
            .unwrap_or(false);

        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            if is_page_node && key.as_slice() == b"Parent" {
                continue;
            }
            copy.set(key.clone(), self.copy_object(dest, value));
        }
        copy
    }
}
