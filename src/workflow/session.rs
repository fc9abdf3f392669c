use crate::document::DocumentService;
use crate::error::{PdfPagesError, Result};
use crate::io::SourceFile;
use crate::render::{PageRenderer, Thumbnail, render_pages};
use crate::selection::WorkingSet;

/// Ties a render result to the source file that was current when rendering
/// started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a render ticket is needed to complete the render"]
pub struct RenderTicket {
    generation: u64,
}

/// A single-source workflow session: one file and its working set.
///
/// Replacing or clearing the file invalidates every outstanding
/// [`RenderTicket`], so late render results for an old file are dropped.
#[derive(Debug)]
pub struct PageSession<M, T = Thumbnail> {
    file: Option<SourceFile>,
    pages: WorkingSet<M, T>,
    generation: u64,
}

impl<M, T> Default for PageSession<M, T> {
    fn default() -> Self {
        Self {
            file: None,
            pages: WorkingSet::new(),
            generation: 0,
        }
    }
}

impl<M, T> PageSession<M, T> {
    /// Create a session with no file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `file` the source and discard the old working set.
    ///
    /// The returned ticket must accompany the rendered pages.
    pub fn select_file(&mut self, file: SourceFile) -> RenderTicket {
        tracing::debug!(file = %file.name, size = file.bytes.len(), "source file selected");
        self.file = Some(file);
        self.pages.clear();
        self.next_ticket()
    }

    /// Drop the source file and its working set.
    pub fn clear_file(&mut self) {
        self.file = None;
        self.pages.clear();
        let _ = self.next_ticket();
    }

    fn next_ticket(&mut self) -> RenderTicket {
        self.generation += 1;
        RenderTicket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` belongs to the current source file.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.file.is_some() && ticket.generation == self.generation
    }

    /// Load rendered pages into the working set.
    ///
    /// Returns `false` and leaves the session alone if the source file has
    /// changed since `ticket` was issued.
    pub fn complete_render<I>(&mut self, ticket: RenderTicket, pages: I) -> bool
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale render"
            );
            return false;
        }

        self.pages.load(pages);
        true
    }

    /// The current source file.
    pub fn file(&self) -> Option<&SourceFile> {
        self.file.as_ref()
    }

    /// The working set.
    pub fn pages(&self) -> &WorkingSet<M, T> {
        &self.pages
    }

    /// The working set, for edits.
    pub fn pages_mut(&mut self) -> &mut WorkingSet<M, T> {
        &mut self.pages
    }

    /// Resolve the export indices and load the source document.
    ///
    /// Document failures are logged here; the session is not modified
    /// either way, so the user can retry.
    pub(crate) fn prepare_export<D: DocumentService>(
        &self,
        service: &D,
    ) -> Result<(&SourceFile, D::Document, Vec<usize>)> {
        let file = self.file.as_ref().ok_or(PdfPagesError::NoDocumentLoaded)?;
        let indices = self.pages.export_indices()?;

        let document = service.load(&file.bytes).map_err(|err| {
            let err = err.for_file(&file.name);
            tracing::error!(error = %err, "export failed");
            err
        })?;

        Ok((file, document, indices))
    }
}

impl<M> PageSession<M, Thumbnail> {
    /// Render every page of the current file and load the working set.
    ///
    /// Returns the number of pages loaded. Pages that fail to render are
    /// left out.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::NoDocumentLoaded`] without a file, or the
    /// renderer's error if the file cannot be opened at all.
    pub async fn render(&mut self, renderer: &dyn PageRenderer, scale: f32) -> Result<usize> {
        let ticket = RenderTicket {
            generation: self.generation,
        };

        let pages = {
            let file = self.file.as_ref().ok_or(PdfPagesError::NoDocumentLoaded)?;
            render_pages(renderer, &file.bytes, scale)
                .await
                .map_err(|err| err.for_file(&file.name))?
        };

        let count = pages.len();
        self.complete_render(ticket, pages);
        Ok(count)
    }
}
