//! PDF document model operations.
//!
//! The workflows only need five things from a PDF library: parse bytes,
//! create an empty document, copy pages from one document into another,
//! append a copied page, and serialize. [`DocumentService`] is that contract;
//! [`LopdfService`] implements it on top of `lopdf`.

mod lopdf_service;

pub use lopdf_service::{LopdfService, PageHandle};
pub(crate) use lopdf_service::inherited_attribute;

use crate::error::Result;

/// Document operations needed to assemble destination documents.
pub trait DocumentService {
    /// A parsed document, source or destination.
    type Document;

    /// A copied page that has not been placed in the page tree yet.
    type Page;

    /// Parse PDF bytes.
    fn load(&self, bytes: &[u8]) -> Result<Self::Document>;

    /// Number of pages in a document.
    fn page_count(&self, document: &Self::Document) -> usize;

    /// Create a document with no pages.
    fn create_empty(&self) -> Self::Document;

    /// Copy the pages at the zero-based `indices` of `source` into `dest`.
    ///
    /// Handles come back in the order of `indices`. The source is not
    /// modified.
    fn copy_pages(
        &self,
        dest: &mut Self::Document,
        source: &Self::Document,
        indices: &[usize],
    ) -> Result<Vec<Self::Page>>;

    /// Append a copied page to the end of `dest`.
    fn append_page(&self, dest: &mut Self::Document, page: Self::Page) -> Result<()>;

    /// Serialize a document to PDF bytes.
    fn serialize(&self, dest: &mut Self::Document) -> Result<Vec<u8>>;
}

/// Build a new document from the pages of `source` at `indices`, in order.
pub fn assemble<D: DocumentService>(
    service: &D,
    source: &D::Document,
    indices: &[usize],
) -> Result<Vec<u8>> {
    let mut dest = service.create_empty();
    for page in service.copy_pages(&mut dest, source, indices)? {
        service.append_page(&mut dest, page)?;
    }
    service.serialize(&mut dest)
}
