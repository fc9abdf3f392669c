//! Writing downloads to disk.
//!
//! This module provides safe writing of export payloads with:
//! - Atomic writes (write to temp file, then rename)
//! - Overwrite protection
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::export::{Download, DownloadKind};
//! use pdfpages::io::writer::DownloadWriter;
//! use std::path::Path;
//!
//! # async fn example(download: Download) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = DownloadWriter::new();
//! let stats = writer.save(&download, Path::new("out")).await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::task;

use crate::error::{PdfPagesError, Result};
use crate::export::Download;
use crate::render::Thumbnail;
use crate::utils::format_file_size;

/// Options for writing downloads.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Replace an existing file at the destination.
    pub overwrite: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            overwrite: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    #[serde(skip)]
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes downloads into an output directory.
#[derive(Debug, Clone, Default)]
pub struct DownloadWriter {
    options: WriteOptions,
}

impl DownloadWriter {
    /// Create a writer that refuses to overwrite existing files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer that replaces existing files.
    pub fn overwriting() -> Self {
        Self {
            options: WriteOptions {
                overwrite: true,
                ..Default::default()
            },
        }
    }

    /// Path a download would be written to inside `dir`.
    pub fn target_path(dir: &Path, download: &Download) -> PathBuf {
        dir.join(&download.file_name)
    }

    /// Write `download` into `dir` under its file name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists and overwriting is disabled
    /// - The file cannot be created or written
    pub async fn save(&self, download: &Download, dir: &Path) -> Result<WriteStatistics> {
        let path = Self::target_path(dir, download);

        if !self.options.overwrite && Self::exists(&path).await {
            return Err(PdfPagesError::output_exists(path));
        }

        let options = self.options.clone();
        let bytes = download.bytes.clone();

        let stats = task::spawn_blocking(move || write_bytes(&bytes, path, &options))
            .await
            .map_err(|e| PdfPagesError::other(format!("Write task failed: {e}")))??;

        tracing::info!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            "download written"
        );
        Ok(stats)
    }

    /// Write raster thumbnails as `<basename>_thumb_<n>.png` into `dir`.
    ///
    /// `pages` pairs each thumbnail with its one-based page number. Outline
    /// thumbnails have no pixels and are skipped. Returns the number of files
    /// written.
    pub async fn save_thumbnails(
        &self,
        dir: &Path,
        basename: &str,
        pages: Vec<(u32, Thumbnail)>,
    ) -> Result<usize> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| PdfPagesError::FailedToCreateOutput {
                path: dir.to_path_buf(),
                source,
            })?;

        let dir = dir.to_path_buf();
        let basename = basename.to_string();

        task::spawn_blocking(move || {
            let mut written = 0;
            for (page_number, thumbnail) in &pages {
                let path = dir.join(format!("{basename}_thumb_{page_number}.png"));
                if thumbnail.save_png(&path)? {
                    written += 1;
                }
            }
            Ok::<_, PdfPagesError>(written)
        })
        .await
        .map_err(|e| PdfPagesError::other(format!("Thumbnail task failed: {e}")))?
    }

    /// Check if output file exists.
    pub async fn exists(path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

fn write_bytes(bytes: &[u8], path: PathBuf, options: &WriteOptions) -> Result<WriteStatistics> {
    let start = Instant::now();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PdfPagesError::FailedToCreateOutput {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let write_path = if options.atomic {
        let mut name = path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    } else {
        path.clone()
    };

    let file =
        std::fs::File::create(&write_path).map_err(|e| PdfPagesError::FailedToCreateOutput {
            path: write_path.clone(),
            source: e,
        })?;

    let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| PdfPagesError::FailedToWrite {
            path: write_path.clone(),
            source: e,
        })?;

    if options.atomic {
        std::fs::rename(&write_path, &path).map_err(|e| PdfPagesError::FailedToWrite {
            path: path.clone(),
            source: e,
        })?;
    }

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size: bytes.len() as u64,
        output_path: path,
    })
}
