//! Input file acquisition.
//!
//! Workflows never see paths: they work on [`SourceFile`]s, a display name
//! plus the file's bytes. This module turns paths into source files.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::io::reader::FileReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = FileReader::new().read(Path::new("report.pdf")).await?;
//! println!("{} is {} bytes", source.name, source.bytes.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::error::{PdfPagesError, Result};
use crate::utils::{collect_paths_for_patterns, has_pdf_extension};

/// A named byte buffer holding one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name shown to the user and used to derive output names.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a source file from a name and its bytes.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Reads input files into memory.
#[derive(Debug, Clone, Default)]
pub struct FileReader;

impl FileReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Read one file.
    ///
    /// Files without a `.pdf` extension are accepted with a warning; the
    /// document service decides whether the bytes are a PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist, is a directory, or
    /// cannot be read.
    pub async fn read(&self, path: &Path) -> Result<SourceFile> {
        Self::check_path_exists(path).await?;

        if !has_pdf_extension(path) {
            tracing::warn!(path = %path.display(), "file does not have a .pdf extension");
        }

        let bytes =
            tokio::fs::read(path)
                .await
                .map_err(|source| PdfPagesError::FailedToReadInput {
                    path: path.to_path_buf(),
                    source,
                })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(file = %name, size = bytes.len(), "read input file");
        Ok(SourceFile::new(name, bytes))
    }

    /// Read several files in order.
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be read.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(self.read(path).await?);
        }
        Ok(files)
    }

    /// Expand glob patterns in order, then read every matched file.
    pub async fn read_patterns<T>(&self, patterns: T) -> Result<Vec<SourceFile>>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let paths = collect_paths_for_patterns(patterns)?;
        self.read_all(&paths).await
    }

    /// Check that `path` exists and is not a directory.
    pub async fn check_path_exists(path: &Path) -> Result<()> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfPagesError::file_not_found(path.to_path_buf()));
            }
            Err(source) => {
                return Err(PdfPagesError::FailedToReadInput {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if metadata.is_dir() {
            return Err(PdfPagesError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }
}
