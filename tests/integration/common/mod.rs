//! Shared helpers for the integration tests.
//!
//! Fixtures are generated on the fly: every page draws its own label, so a
//! test can read an output back and check which source pages it holds and
//! in what order.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use pdfpages::config::{Config, OverwriteMode, RenderSettings, Task};
use pdfpages::render::RendererKind;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a PDF whose pages show `labels`, one per page.
pub fn pdf_bytes(labels: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            let content = format!("BT /F1 18 Tf 50 700 Td ({label}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => labels.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize fixture");
    bytes
}

/// Write a labelled PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, labels: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(labels)).expect("Failed to write fixture");
    path
}

/// Page labels of a PDF, in page order.
pub fn labels_of(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("Output is not a PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).expect("Page has no content");
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').expect("No label") + 1;
            let end = start + text[start..].find(')').expect("Unterminated label");
            text[start..end].to_string()
        })
        .collect()
}

/// Page labels of a file on disk.
pub fn labels_in_file(path: &Path) -> Vec<String> {
    labels_of(&std::fs::read(path).expect("Failed to read output"))
}

/// Name and labels of every PDF inside a zip archive, in archive order.
pub fn zip_contents(bytes: &[u8]) -> Vec<(String, Vec<String>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Output is not a zip");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).expect("Unreadable zip entry");
            let mut contents = Vec::new();
            file.read_to_end(&mut contents).expect("Unreadable zip entry");
            (file.name().to_string(), labels_of(&contents))
        })
        .collect()
}

/// A configuration that renders outlines and never prompts.
pub fn config_for(task: Task, output_dir: &Path) -> Config {
    let mut config = Config::new(task);
    config.output_dir = output_dir.to_path_buf();
    config.quiet = true;
    config.overwrite_mode = OverwriteMode::Force;
    config.render = RenderSettings {
        renderer: RendererKind::Outline,
        ..RenderSettings::default()
    };
    config
}

/// A fresh scratch directory.
pub fn scratch() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
