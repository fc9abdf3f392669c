//! Error types for pdfpages.
//!
//! Errors fall into three groups that callers treat differently:
//!
//! - **User input**: too few files to merge, nothing selected, no document
//!   loaded. Reported to the user, nothing is changed.
//! - **Document failures**: the PDF library failed to parse, copy or
//!   serialize. Reported as a generic failure; the session keeps its state so
//!   the user can retry.
//! - **Everything else**: I/O, output conflicts, configuration.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfpages operations.
pub type Result<T> = std::result::Result<T, PdfPagesError>;

/// Main error type for pdfpages operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfPagesError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path is a directory.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file exists but could not be read.
    #[error("Cannot read file: {}\n  Reason: {source}", path.display())]
    FailedToReadInput {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge needs at least two files.
    #[error("Please select at least {required} PDF files to merge ({found} selected)")]
    TooFewFiles {
        /// Minimum number of files.
        required: usize,
        /// Number of files in the list.
        found: usize,
    },

    /// The working set resolved to no pages.
    #[error("Please select at least one page to extract")]
    NothingSelected,

    /// Export was requested before any document was loaded.
    #[error("No PDF document has been loaded")]
    NoDocumentLoaded,

    /// Bytes could not be parsed as a PDF.
    #[error("Invalid PDF data: {reason}")]
    InvalidPdf {
        /// Parser message.
        reason: String,
    },

    /// A named source file could not be parsed as a PDF.
    #[error("Failed to load PDF: {name}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Display name of the file.
        name: String,
        /// Parser message.
        reason: String,
    },

    /// The PDF is encrypted.
    #[error(
        "PDF is encrypted and cannot be processed: {name}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
    )]
    EncryptedPdf {
        /// Display name of the file.
        name: String,
    },

    /// A page index outside the source document was requested.
    #[error("Page index {index} is out of range (document has {page_count} page(s))")]
    PageOutOfRange {
        /// Zero-based index that was requested.
        index: usize,
        /// Pages in the source document.
        page_count: usize,
    },

    /// Copying pages into the destination document failed.
    #[error("Failed to copy pages: {reason}")]
    CopyFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Serializing the destination document failed.
    #[error("Failed to serialize PDF: {reason}")]
    SerializeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The thumbnail renderer could not be initialised.
    #[error("Page renderer unavailable: {reason}")]
    RendererUnavailable {
        /// Binding or loading failure.
        reason: String,
    },

    /// A single page failed to render.
    #[error("Failed to render page {page_number}: {reason}")]
    RenderFailed {
        /// One-based page number.
        page_number: u32,
        /// Renderer message.
        reason: String,
    },

    /// Packaging the per-page outputs into an archive failed.
    #[error("Failed to build archive: {reason}")]
    ArchiveFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// No entry with the given id exists in the working set.
    #[error("No page entry with id {id}")]
    EntryNotFound {
        /// Display form of the id.
        id: String,
    },

    /// An edit command could not be parsed.
    #[error("Invalid edit '{input}': {reason}")]
    InvalidEdit {
        /// The raw edit text.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output directory",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfPagesError {
    fn from(err: lopdf::Error) -> Self {
        Self::CopyFailed {
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for PdfPagesError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ArchiveFailed {
            reason: err.to_string(),
        }
    }
}

impl From<glob::PatternError> for PdfPagesError {
    fn from(err: glob::PatternError) -> Self {
        Self::invalid_config(format!("Invalid glob pattern: {err}"))
    }
}

impl From<glob::GlobError> for PdfPagesError {
    fn from(err: glob::GlobError) -> Self {
        Self::FailedToReadInput {
            path: err.path().to_path_buf(),
            source: err.into_error(),
        }
    }
}

impl PdfPagesError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an InvalidPdf error.
    pub fn invalid_pdf(reason: impl Into<String>) -> Self {
        Self::InvalidPdf {
            reason: reason.into(),
        }
    }

    /// Create a CopyFailed error.
    pub fn copy_failed(reason: impl Into<String>) -> Self {
        Self::CopyFailed {
            reason: reason.into(),
        }
    }

    /// Create an EntryNotFound error.
    pub fn entry_not_found(id: impl ToString) -> Self {
        Self::EntryNotFound { id: id.to_string() }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Attach the source file name to a parse failure.
    ///
    /// Document services only see bytes; the workflow that owns the file
    /// knows its name.
    pub fn for_file(self, name: &str) -> Self {
        match self {
            Self::InvalidPdf { reason } => {
                if reason.contains("encrypt") || reason.contains("password") {
                    Self::EncryptedPdf {
                        name: name.to_string(),
                    }
                } else {
                    Self::FailedToLoadPdf {
                        name: name.to_string(),
                        reason,
                    }
                }
            }
            other => other,
        }
    }

    /// Whether this is a validation failure caused by the user's selection.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::TooFewFiles { .. } | Self::NothingSelected | Self::NoDocumentLoaded
        )
    }

    /// Whether this failure came from the document library.
    pub fn is_document_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidPdf { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::PageOutOfRange { .. }
                | Self::CopyFailed { .. }
                | Self::SerializeFailed { .. }
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToReadInput { .. } => 2,
            Self::TooFewFiles { .. } => 1,
            Self::NothingSelected => 1,
            Self::NoDocumentLoaded => 1,
            Self::InvalidPdf { .. } => 3,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::PageOutOfRange { .. } => 6,
            Self::CopyFailed { .. } => 6,
            Self::SerializeFailed { .. } => 6,
            Self::RendererUnavailable { .. } => 7,
            Self::RenderFailed { .. } => 7,
            Self::ArchiveFailed { .. } => 6,
            Self::EntryNotFound { .. } => 1,
            Self::InvalidEdit { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}
