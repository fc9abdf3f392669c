use super::session::PageSession;
use crate::archive::ArchivePackager;
use crate::config::{OutputMode, PageRange};
use crate::document::DocumentService;
use crate::error::Result;
use crate::export::{self, Download};
use crate::render::Thumbnail;
use crate::selection::Split;

/// Split workflow: pick pages of one file and export them.
pub type SplitSession<T = Thumbnail> = PageSession<Split, T>;

impl<T> PageSession<Split, T> {
    /// Include exactly the pages in `range` and exclude the rest.
    pub fn select_range(&mut self, range: &PageRange) {
        let pages: Vec<u32> = self
            .pages()
            .entries()
            .iter()
            .filter_map(|entry| u32::try_from(entry.page_number()).ok())
            .filter(|page| range.contains(*page))
            .collect();

        self.pages_mut().select_pages(&pages);
    }

    /// Export the included pages.
    ///
    /// [`OutputMode::Single`] produces `<basename>_split.pdf`;
    /// [`OutputMode::Multiple`] produces `<basename>_split.zip` holding one
    /// `<basename>_page_<n>.pdf` per page.
    ///
    /// # Errors
    ///
    /// Returns [`NoDocumentLoaded`](crate::PdfPagesError::NoDocumentLoaded)
    /// or [`NothingSelected`](crate::PdfPagesError::NothingSelected) before
    /// touching the document service; document and archive failures
    /// otherwise. The session is unchanged in every case.
    pub fn export<D, P>(&self, service: &D, packager: &P, mode: OutputMode) -> Result<Download>
    where
        D: DocumentService,
        P: ArchivePackager + ?Sized,
    {
        let (file, source, indices) = self.prepare_export(service)?;
        let basename = export::basename(&file.name);

        tracing::info!(file = %file.name, pages = indices.len(), ?mode, "splitting");

        let result = match mode {
            OutputMode::Single => {
                export::export_single(service, &source, &indices, export::split_pdf_name(basename))
            }
            OutputMode::Multiple => {
                export::export_per_page(service, packager, &source, &indices, basename)
            }
        };

        result.inspect_err(|err| tracing::error!(error = %err, "split export failed"))
    }
}
