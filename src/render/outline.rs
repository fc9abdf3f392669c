use lopdf::{Document, Object, ObjectId};

use super::{PageRenderer, RenderDocument, Thumbnail};
use crate::document::inherited_attribute;
use crate::error::{PdfPagesError, Result};

/// Renderer that sizes thumbnails from the page MediaBox without drawing.
#[derive(Debug, Clone, Default)]
pub struct OutlineRenderer;

impl OutlineRenderer {
    /// Create a new outline renderer.
    pub fn new() -> Self {
        Self
    }
}

impl PageRenderer for OutlineRenderer {
    fn name(&self) -> &'static str {
        "outline"
    }

    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RenderDocument + 'a>> {
        let document =
            Document::load_mem(bytes).map_err(|err| PdfPagesError::invalid_pdf(err.to_string()))?;
        let pages = document.get_pages().into_values().collect();
        Ok(Box::new(OutlineDocument { document, pages }))
    }
}

struct OutlineDocument {
    document: Document,
    pages: Vec<ObjectId>,
}

impl OutlineDocument {
    fn page_size(&self, page_id: ObjectId) -> Option<(f32, f32)> {
        let media_box = inherited_attribute(&self.document, page_id, b"MediaBox")?;
        let (_, media_box) = self.document.dereference(media_box).ok()?;
        let corners = media_box.as_array().ok()?;
        if corners.len() < 4 {
            return None;
        }

        let numbers: Vec<f32> = corners
            .iter()
            .map(Object::as_float)
            .collect::<std::result::Result<_, _>>()
            .ok()?;
        let width = (numbers[2] - numbers[0]).abs();
        let height = (numbers[3] - numbers[1]).abs();

        let rotate = inherited_attribute(&self.document, page_id, b"Rotate")
            .and_then(|value| value.as_i64().ok())
            .unwrap_or(0);

        if rotate.rem_euclid(180) == 90 {
            Some((height, width))
        } else {
            Some((width, height))
        }
    }
}

impl RenderDocument for OutlineDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn render_page_thumbnail(&self, page_number: u32, scale: f32) -> Result<Thumbnail> {
        let page_id = page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .copied()
            .ok_or_else(|| PdfPagesError::RenderFailed {
                page_number,
                reason: "no such page".to_string(),
            })?;

        let (width, height) = self
            .page_size(page_id)
            .ok_or_else(|| PdfPagesError::RenderFailed {
                page_number,
                reason: "page has no usable MediaBox".to_string(),
            })?;

        Ok(Thumbnail::Outline {
            width: (width * scale).round().max(1.0) as u32,
            height: (height * scale).round().max(1.0) as u32,
        })
    }
}
