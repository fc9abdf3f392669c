//! File input and output.
//!
//! - [`reader`] turns paths and glob patterns into named byte buffers.
//! - [`writer`] writes downloads into the output directory.

pub mod reader;
pub mod writer;

pub use reader::{FileReader, SourceFile};
pub use writer::{DownloadWriter, WriteOptions, WriteStatistics};
