use crate::document::DocumentService;
use crate::error::{PdfPagesError, Result};
use crate::export::{Download, DownloadKind, MERGED_FILE_NAME};
use crate::io::SourceFile;

/// Fewest files a merge accepts.
pub const MIN_MERGE_FILES: usize = 2;

/// Merge workflow: an ordered list of whole files.
#[derive(Debug, Clone, Default)]
pub struct MergeFileList {
    files: Vec<SourceFile>,
}

impl MergeFileList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files, keeping their order.
    pub fn add_files<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let before = self.files.len();
        self.files.extend(files);
        tracing::debug!(added = self.files.len() - before, total = self.files.len(), "files added");
    }

    /// Remove the file at `index`.
    pub fn remove_file(&mut self, index: usize) -> Option<SourceFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    /// Files in merge order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Concatenate every page of every file, in list order, into
    /// `merged.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::TooFewFiles`] without calling the document
    /// service if fewer than two files are listed. A file that cannot be
    /// loaded fails the whole merge and is named in the error.
    pub fn export<D: DocumentService>(&self, service: &D) -> Result<Download> {
        if self.files.len() < MIN_MERGE_FILES {
            return Err(PdfPagesError::TooFewFiles {
                required: MIN_MERGE_FILES,
                found: self.files.len(),
            });
        }

        tracing::info!(files = self.files.len(), "merging");

        self.merge_into_one(service)
            .inspect_err(|err| tracing::error!(error = %err, "merge export failed"))
    }

    fn merge_into_one<D: DocumentService>(&self, service: &D) -> Result<Download> {
        let mut dest = service.create_empty();
        let mut page_count = 0;

        for file in &self.files {
            let source = service
                .load(&file.bytes)
                .map_err(|err| err.for_file(&file.name))?;

            let indices: Vec<usize> = (0..service.page_count(&source)).collect();
            tracing::debug!(file = %file.name, pages = indices.len(), "appending file");

            for page in service.copy_pages(&mut dest, &source, &indices)? {
                service.append_page(&mut dest, page)?;
            }
            page_count += indices.len();
        }

        Ok(Download {
            file_name: MERGED_FILE_NAME.to_string(),
            kind: DownloadKind::Pdf,
            bytes: service.serialize(&mut dest)?,
            page_count,
        })
    }
}
