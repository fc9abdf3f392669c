//! pdfpages - Merge, split and reorder PDF pages.
//!
//! This library provides the three page workflows behind the `pdfpages`
//! command:
//!
//! - **Merge**: concatenate whole files in order
//! - **Split**: pick pages of one file and export them as one document, or
//!   as a zip archive with one document per page
//! - **Organize**: reorder and delete pages of one file
//!
//! Split and Organize share a page selection model, [`selection::WorkingSet`],
//! which is the only stateful part of the library. PDF parsing and
//! reconstruction go through [`document::DocumentService`], thumbnails
//! through [`render::PageRenderer`], and archives through
//! [`archive::ArchivePackager`].
//!
//! # Examples
//!
//! ## Running a configured workflow
//!
//! ```no_run
//! use pdfpages::config::{Config, Task};
//! use pdfpages::io::DownloadWriter;
//! use pdfpages::workflow;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(Task::Merge {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//! });
//!
//! let outcome = workflow::execute(&config).await?;
//! DownloadWriter::new().save(&outcome.download, Path::new(".")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using a session directly
//!
//! ```no_run
//! use pdfpages::archive::ZipPackager;
//! use pdfpages::config::OutputMode;
//! use pdfpages::document::LopdfService;
//! use pdfpages::io::FileReader;
//! use pdfpages::render::OutlineRenderer;
//! use pdfpages::workflow::SplitSession;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let file = FileReader::new().read(Path::new("report.pdf")).await?;
//!
//! let mut session = SplitSession::new();
//! let _ticket = session.select_file(file);
//! session.render(&OutlineRenderer::new(), 0.3).await?;
//! session.pages_mut().select_pages(&[1, 3]);
//!
//! let download = session.export(&LopdfService::new(), &ZipPackager::new(), OutputMode::Single)?;
//! assert_eq!(download.file_name, "report_split.pdf");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod io;
pub mod output;
pub mod render;
pub mod selection;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfPagesError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
