//! Packaging of per-page outputs into a single archive.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

/// A named in-memory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBuffer {
    /// File name inside the archive.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl NamedBuffer {
    /// Create a named buffer.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Bundles named buffers into one archive.
pub trait ArchivePackager {
    /// Package `entries` in order and return the archive bytes.
    fn package(&self, entries: &[NamedBuffer]) -> Result<Vec<u8>>;
}

/// Zip archive packager using deflate compression.
#[derive(Debug, Clone, Copy)]
pub struct ZipPackager {
    method: CompressionMethod,
}

impl ZipPackager {
    /// Create a packager that deflates every entry.
    pub fn new() -> Self {
        Self {
            method: CompressionMethod::Deflated,
        }
    }

    /// Create a packager that stores entries without compression.
    pub fn stored() -> Self {
        Self {
            method: CompressionMethod::Stored,
        }
    }
}

impl Default for ZipPackager {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchivePackager for ZipPackager {
    fn package(&self, entries: &[NamedBuffer]) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(self.method);

        for entry in entries {
            writer.start_file(entry.name.as_str(), options)?;
            writer.write_all(&entry.bytes)?;
        }

        let cursor = writer.finish()?;
        tracing::debug!(entries = entries.len(), "packaged archive");
        Ok(cursor.into_inner())
    }
}
