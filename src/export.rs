//! Export resolution: turning a resolved index sequence into a download.
//!
//! Two modes exist. Single-document export copies every resolved page into
//! one destination document. Per-page export builds a one-page document for
//! each resolved index and packages them into one archive.

use serde::Serialize;

use crate::archive::{ArchivePackager, NamedBuffer};
use crate::document::{DocumentService, assemble};
use crate::error::Result;

/// Download name of a merged document.
pub const MERGED_FILE_NAME: &str = "merged.pdf";

/// Download name of an organized document.
pub const ORGANIZED_FILE_NAME: &str = "organized.pdf";

/// Strip a trailing `.pdf` extension, ignoring case.
///
/// ```
/// use pdfpages::export::basename;
///
/// assert_eq!(basename("report.PDF"), "report");
/// assert_eq!(basename("notes.txt"), "notes.txt");
/// ```
pub fn basename(file_name: &str) -> &str {
    let cut = file_name.len().saturating_sub(4);
    match file_name.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &file_name[..cut],
        _ => file_name,
    }
}

/// Download name of a single-document split.
pub fn split_pdf_name(basename: &str) -> String {
    format!("{basename}_split.pdf")
}

/// Download name of a per-page split archive.
pub fn split_zip_name(basename: &str) -> String {
    format!("{basename}_split.zip")
}

/// Archive entry name for the page at zero-based `source_index`.
pub fn page_file_name(basename: &str, source_index: usize) -> String {
    format!("{basename}_page_{}.pdf", source_index + 1)
}

/// Kind of payload in a [`Download`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    /// A PDF document.
    Pdf,
    /// A zip archive of PDF documents.
    Zip,
}

impl DownloadKind {
    /// MIME type of the payload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Zip => "application/zip",
        }
    }
}

/// A named payload ready to be handed to the output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// File name the payload is saved under.
    pub file_name: String,
    /// Payload type.
    pub kind: DownloadKind,
    /// Payload bytes.
    pub bytes: Vec<u8>,
    /// Number of pages exported.
    pub page_count: usize,
}

/// Copy the pages at `indices` into one document.
pub fn export_single<D: DocumentService>(
    service: &D,
    source: &D::Document,
    indices: &[usize],
    file_name: impl Into<String>,
) -> Result<Download> {
    let bytes = assemble(service, source, indices)?;
    let file_name = file_name.into();

    tracing::debug!(file = %file_name, pages = indices.len(), "exported document");

    Ok(Download {
        file_name,
        kind: DownloadKind::Pdf,
        bytes,
        page_count: indices.len(),
    })
}

/// Build one document per index and package them into one archive.
///
/// Entries are named with [`page_file_name`] and appear in `indices` order.
pub fn export_per_page<D: DocumentService, P: ArchivePackager + ?Sized>(
    service: &D,
    packager: &P,
    source: &D::Document,
    indices: &[usize],
    basename: &str,
) -> Result<Download> {
    let entries = indices
        .iter()
        .map(|&index| {
            let bytes = assemble(service, source, &[index])?;
            Ok(NamedBuffer::new(page_file_name(basename, index), bytes))
        })
        .collect::<Result<Vec<_>>>()?;

    let bytes = packager.package(&entries)?;
    let file_name = split_zip_name(basename);

    tracing::debug!(file = %file_name, entries = entries.len(), "exported archive");

    Ok(Download {
        file_name,
        kind: DownloadKind::Zip,
        bytes,
        page_count: indices.len(),
    })
}
