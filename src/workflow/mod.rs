//! The three workflows and the glue that runs them from a [`Config`].
//!
//! - [`MergeFileList`]: concatenate whole files.
//! - [`SplitSession`]: pick pages of one file, export as one document or as
//!   a zip of one-page documents.
//! - [`OrganizeSession`]: reorder and delete pages of one file.
//!
//! [`execute`] builds the download for a configuration without writing
//! anything; the caller decides where (and whether) it lands on disk.

mod merge;
mod organize;
mod session;
mod split;

pub use merge::{MIN_MERGE_FILES, MergeFileList};
pub use organize::OrganizeSession;
pub use session::{PageSession, RenderTicket};
pub use split::SplitSession;

use std::path::Path;

use crate::archive::ZipPackager;
use crate::config::{Config, Task};
use crate::document::LopdfService;
use crate::error::Result;
use crate::export::Download;
use crate::io::{FileReader, SourceFile};
use crate::render::{PageRenderer, Thumbnail, create_renderer};

/// Everything a finished workflow produced.
#[derive(Debug)]
pub struct Outcome {
    /// The payload to write.
    pub download: Download,
    /// Name and size of every input file, in order.
    pub inputs: Vec<(String, u64)>,
    /// Rendered pages in final order, as one-based page number and image.
    pub thumbnails: Vec<(u32, Thumbnail)>,
    /// Pages in the working set before export, or pages merged.
    pub pages_loaded: usize,
}

/// Read the inputs, apply the configured edits and build the download.
///
/// # Errors
///
/// Input, render, edit and export failures are returned as they occur.
pub async fn execute(config: &Config) -> Result<Outcome> {
    let reader = FileReader::new();
    let service = LopdfService::with_compression(config.compression);

    match &config.task {
        Task::Merge { inputs } => {
            let patterns: Vec<String> = inputs
                .iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect();

            let mut list = MergeFileList::new();
            list.add_files(reader.read_patterns(&patterns).await?);

            let inputs = summarize(list.files());
            let download = list.export(&service)?;
            Ok(Outcome {
                pages_loaded: download.page_count,
                download,
                inputs,
                thumbnails: Vec::new(),
            })
        }
        Task::Split {
            input,
            pages,
            edits,
            mode,
        } => {
            let renderer = renderer_for(config)?;
            let mut session = SplitSession::new();
            let file = load_into(&mut session, &reader, renderer.as_ref(), input, config).await?;

            if let Some(range) = pages {
                session.select_range(range);
            }
            for edit in edits {
                tracing::debug!(%edit, "applying edit");
                session.pages_mut().apply(*edit)?;
            }

            let download = session.export(&service, &ZipPackager::new(), *mode)?;
            Ok(finish(&session, file, download))
        }
        Task::Organize { input, edits } => {
            let renderer = renderer_for(config)?;
            let mut session = OrganizeSession::new();
            let file = load_into(&mut session, &reader, renderer.as_ref(), input, config).await?;

            for edit in edits {
                tracing::debug!(%edit, "applying edit");
                session.pages_mut().apply(*edit)?;
            }

            let download = session.export(&service)?;
            Ok(finish(&session, file, download))
        }
    }
}

fn renderer_for(config: &Config) -> Result<Box<dyn PageRenderer>> {
    create_renderer(config.render.renderer, config.render.library_dir.as_deref())
}

async fn load_into<M>(
    session: &mut PageSession<M>,
    reader: &FileReader,
    renderer: &dyn PageRenderer,
    input: &Path,
    config: &Config,
) -> Result<(String, u64)> {
    let file = reader.read(input).await?;
    let summary = (file.name.clone(), file.size());

    let _ticket = session.select_file(file);
    let loaded = session.render(renderer, config.thumbnail_scale()).await?;

    tracing::info!(file = %summary.0, pages = loaded, renderer = renderer.name(), "pages loaded");
    Ok(summary)
}

fn finish<M>(session: &PageSession<M>, file: (String, u64), download: Download) -> Outcome {
    let pages = session.pages();
    let thumbnails = pages
        .entries()
        .iter()
        .filter(|entry| entry.is_included())
        .map(|entry| (entry.page_number() as u32, entry.thumbnail().clone()))
        .collect();

    Outcome {
        download,
        inputs: vec![file],
        thumbnails,
        pages_loaded: pages.len(),
    }
}

fn summarize(files: &[SourceFile]) -> Vec<(String, u64)> {
    files
        .iter()
        .map(|file| (file.name.clone(), file.size()))
        .collect()
}
