//! Page thumbnail rendering.
//!
//! Rendering is only used for display: a page that fails to render is left
//! out of the working set and a warning is logged. Two renderers exist:
//!
//! - [`PdfiumRenderer`] rasterizes pages through the PDFium library, which
//!   must be available at runtime.
//! - [`OutlineRenderer`] needs nothing beyond the PDF parser and produces a
//!   blank thumbnail sized from the page's MediaBox.
//!
//! [`RendererKind::Auto`] prefers PDFium and falls back to outlines.

mod outline;
mod pdfium;

pub use outline::OutlineRenderer;
pub use pdfium::PdfiumRenderer;

use std::path::Path;
use std::str::FromStr;

use image::RgbaImage;

use crate::error::{PdfPagesError, Result};

/// A rendered page preview.
#[derive(Debug, Clone)]
pub enum Thumbnail {
    /// Rasterized page content.
    Raster(RgbaImage),
    /// Page dimensions only; no pixels were rendered.
    Outline {
        /// Width in pixels at the requested scale.
        width: u32,
        /// Height in pixels at the requested scale.
        height: u32,
    },
}

impl Thumbnail {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Self::Raster(image) => image.width(),
            Self::Outline { width, .. } => *width,
        }
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Self::Raster(image) => image.height(),
            Self::Outline { height, .. } => *height,
        }
    }

    /// Pixel data, if the page was rasterized.
    pub fn as_raster(&self) -> Option<&RgbaImage> {
        match self {
            Self::Raster(image) => Some(image),
            Self::Outline { .. } => None,
        }
    }

    /// Write the thumbnail as a PNG. Outlines have no pixels and are skipped.
    ///
    /// Returns whether a file was written.
    pub fn save_png(&self, path: &Path) -> Result<bool> {
        let Some(image) = self.as_raster() else {
            return Ok(false);
        };

        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|err| PdfPagesError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(err),
            })?;
        Ok(true)
    }
}

/// A document opened by a renderer.
pub trait RenderDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Render the page with the given one-based number at `scale`.
    fn render_page_thumbnail(&self, page_number: u32, scale: f32) -> Result<Thumbnail>;
}

/// Opens PDF bytes for thumbnail rendering.
pub trait PageRenderer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Parse `bytes` into a document that can render pages.
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RenderDocument + 'a>>;
}

/// Which renderer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererKind {
    /// PDFium when it can be bound, outlines otherwise.
    #[default]
    Auto,
    /// PDFium only; fail if the library is missing.
    Pdfium,
    /// MediaBox outlines only.
    Outline,
}

impl FromStr for RendererKind {
    type Err = PdfPagesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "pdfium" => Ok(Self::Pdfium),
            "outline" => Ok(Self::Outline),
            _ => Err(PdfPagesError::invalid_config(format!(
                "Invalid renderer: {s}. Must be one of: auto, pdfium, outline"
            ))),
        }
    }
}

/// Build the renderer selected by `kind`.
///
/// `library_dir` points at a directory holding the PDFium shared library.
pub fn create_renderer(
    kind: RendererKind,
    library_dir: Option<&Path>,
) -> Result<Box<dyn PageRenderer>> {
    match kind {
        RendererKind::Outline => Ok(Box::new(OutlineRenderer::new())),
        RendererKind::Pdfium => Ok(Box::new(PdfiumRenderer::bind(library_dir)?)),
        RendererKind::Auto => match PdfiumRenderer::bind(library_dir) {
            Ok(renderer) => Ok(Box::new(renderer)),
            Err(err) => {
                tracing::warn!(error = %err, "PDFium unavailable, using outline thumbnails");
                Ok(Box::new(OutlineRenderer::new()))
            }
        },
    }
}

/// Render every page of `bytes`, one page at a time.
///
/// Pages that fail to render are skipped. The returned pairs carry the
/// zero-based source index of each rendered page, ready for
/// [`WorkingSet::load`](crate::selection::WorkingSet::load).
///
/// # Errors
///
/// Returns an error only if the renderer cannot open the document.
pub async fn render_pages(
    renderer: &dyn PageRenderer,
    bytes: &[u8],
    scale: f32,
) -> Result<Vec<(usize, Thumbnail)>> {
    let document = renderer.open(bytes)?;
    let page_count = document.page_count();
    let mut pages = Vec::with_capacity(page_count);

    tracing::debug!(renderer = renderer.name(), page_count, scale, "rendering thumbnails");

    for index in 0..page_count {
        let page_number = (index + 1) as u32;
        match document.render_page_thumbnail(page_number, scale) {
            Ok(thumbnail) => pages.push((index, thumbnail)),
            Err(err) => tracing::warn!(page_number, error = %err, "page left out of working set"),
        }

        // One page at a time; let other tasks run between pages.
        tokio::task::yield_now().await;
    }

    Ok(pages)
}
