use std::path::Path;

use image::RgbaImage;
use pdfium_render::prelude::*;

use super::{PageRenderer, RenderDocument, Thumbnail};
use crate::error::{PdfPagesError, Result};

/// Renderer backed by the PDFium library.
pub struct PdfiumRenderer {
    pdfium: Pdfium,
}

impl PdfiumRenderer {
    /// Bind to PDFium.
    ///
    /// With `library_dir`, only that directory is tried. Otherwise the
    /// working directory is tried first, then the system library path.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::RendererUnavailable`] if no library can be
    /// loaded.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self> {
        let bindings = match library_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|err| PdfPagesError::RendererUnavailable {
            reason: err.to_string(),
        })?;

        tracing::debug!("bound PDFium library");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PageRenderer for PdfiumRenderer {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RenderDocument + 'a>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(map_pdfium_error)?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

fn map_pdfium_error(err: PdfiumError) -> PdfPagesError {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            PdfPagesError::invalid_pdf("document is encrypted and needs a password")
        }
        _ => PdfPagesError::invalid_pdf(err.to_string()),
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl RenderDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page_thumbnail(&self, page_number: u32, scale: f32) -> Result<Thumbnail> {
        let render_failed = |reason: String| PdfPagesError::RenderFailed {
            page_number,
            reason,
        };

        let index = page_number
            .checked_sub(1)
            .and_then(|index| u16::try_from(index).ok())
            .ok_or_else(|| render_failed("page number out of range".to_string()))?;

        let page = self
            .document
            .pages()
            .get(index)
            .map_err(|err| render_failed(err.to_string()))?;

        let config = PdfRenderConfig::new()
            .scale_page_by_factor(scale)
            .set_format(PdfBitmapFormat::BGRA);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|err| render_failed(err.to_string()))?;

        let width = bitmap.width().max(0) as u32;
        let height = bitmap.height().max(0) as u32;
        let pixels = bgra_to_rgba(&bitmap.as_raw_bytes(), width as usize, height as usize);

        RgbaImage::from_raw(width, height, pixels)
            .map(Thumbnail::Raster)
            .ok_or_else(|| render_failed("bitmap size mismatch".to_string()))
    }
}

/// Convert a BGRA bitmap with arbitrary row stride to tightly packed RGBA.
fn bgra_to_rgba(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    let stride = if height == 0 { 0 } else { src.len() / height };

    let mut pixels = Vec::with_capacity(width.saturating_mul(height).saturating_mul(4));
    for y in 0..height {
        let base = y.saturating_mul(stride);
        for x in 0..width {
            let idx = base.saturating_add(x.saturating_mul(4));
            let b = src.get(idx).copied().unwrap_or(255);
            let g = src.get(idx + 1).copied().unwrap_or(255);
            let r = src.get(idx + 2).copied().unwrap_or(255);
            let a = src.get(idx + 3).copied().unwrap_or(255);
            pixels.extend_from_slice(&[r, g, b, a]);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_to_rgba_swaps_channels() {
        let src = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(bgra_to_rgba(&src, 2, 1), vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn test_bgra_to_rgba_drops_row_padding() {
        // Two rows of one pixel, each padded to eight bytes.
        let src = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(bgra_to_rgba(&src, 1, 2), vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn test_bind_missing_library_dir_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfiumRenderer::bind(Some(dir.path()));
        assert!(matches!(
            result,
            Err(PdfPagesError::RendererUnavailable { .. })
        ));
    }
}
