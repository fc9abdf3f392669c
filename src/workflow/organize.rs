use super::session::PageSession;
use crate::document::DocumentService;
use crate::error::Result;
use crate::export::{self, Download, ORGANIZED_FILE_NAME};
use crate::render::Thumbnail;
use crate::selection::Organize;

/// Organize workflow: reorder and delete pages of one file.
pub type OrganizeSession<T = Thumbnail> = PageSession<Organize, T>;

impl<T> PageSession<Organize, T> {
    /// Export the remaining pages in their current order as
    /// `organized.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`NoDocumentLoaded`](crate::PdfPagesError::NoDocumentLoaded)
    /// or [`NothingSelected`](crate::PdfPagesError::NothingSelected) when
    /// there is nothing to export, and document failures otherwise. The
    /// session is unchanged in every case.
    pub fn export<D: DocumentService>(&self, service: &D) -> Result<Download> {
        let (file, source, indices) = self.prepare_export(service)?;

        tracing::info!(file = %file.name, pages = indices.len(), "organizing");

        export::export_single(service, &source, &indices, ORGANIZED_FILE_NAME)
            .inspect_err(|err| tracing::error!(error = %err, "organize export failed"))
    }
}
