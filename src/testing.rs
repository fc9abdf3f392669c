//! In-memory PDF fixtures for unit tests.
//!
//! Every page draws its label as text, so tests can tell pages apart after
//! copying by reading the content stream back.

use lopdf::{Document, Object, Stream, dictionary};

#[derive(Debug, Clone)]
pub(crate) struct TestPage {
    label: String,
    media_box: Option<(f32, f32)>,
    inherit_size: bool,
    rotate: Option<i64>,
}

impl TestPage {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            media_box: Some((595.0, 842.0)),
            inherit_size: false,
            rotate: None,
        }
    }

    pub(crate) fn size(mut self, width: f32, height: f32) -> Self {
        self.media_box = Some((width, height));
        self
    }

    pub(crate) fn rotate(mut self, degrees: i64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Leave the MediaBox to the page tree root (612 x 792).
    pub(crate) fn inherit_size(mut self) -> Self {
        self.media_box = None;
        self.inherit_size = true;
        self
    }

    pub(crate) fn without_size(mut self) -> Self {
        self.media_box = None;
        self.inherit_size = false;
        self
    }
}

pub(crate) fn labelled(labels: &[&str]) -> Vec<TestPage> {
    labels.iter().map(|label| TestPage::new(label)).collect()
}

/// Build a document whose font resources live on the page tree root, so
/// copied pages must pick them up through inheritance.
pub(crate) fn build_pdf(pages: &[TestPage]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for page in pages {
        let content = format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", page.label);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if let Some((width, height)) = page.media_box {
            page_dict.set(
                "MediaBox",
                vec![0.into(), 0.into(), width.into(), height.into()],
            );
        }
        if let Some(degrees) = page.rotate {
            page_dict.set("Rotate", degrees);
        }

        kids.push(Object::Reference(doc.add_object(page_dict)));
    }

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => pages.len() as i64,
        "Kids" => kids,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    };
    if pages.iter().any(|page| page.inherit_size) {
        pages_dict.set(
            "MediaBox",
            vec![0.into(), 0.into(), 612.into(), 792.into()],
        );
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

pub(crate) fn build_pdf_bytes(pages: &[TestPage]) -> Vec<u8> {
    let mut doc = build_pdf(pages);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize test pdf");
    bytes
}

/// Labels drawn on each page, in page order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).expect("page content");
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').expect("label start") + 1;
            let end = text[start..].find(')').expect("label end") + start;
            text[start..end].to_string()
        })
        .collect()
}

pub(crate) fn page_labels_of(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("load pdf");
    page_labels(&doc)
}
