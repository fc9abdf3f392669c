//! Output formatting and display for pdfpages.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The overwrite confirmation prompt
//! - The end-of-run summary and its JSON form
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::output::OutputFormatter;
//! use pdfpages::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Rendering pages");
//! formatter.success("Export completed");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::export::DownloadKind;
use crate::utils::format_file_size;
use crate::workflow::Outcome;

/// Machine-readable summary of one run, printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// Workflow name: merge, split or organize.
    pub workflow: &'static str,
    /// Input file names in order.
    pub inputs: Vec<String>,
    /// Download file name.
    pub file_name: String,
    /// Payload type.
    pub kind: DownloadKind,
    /// MIME type of the payload.
    pub mime_type: &'static str,
    /// Pages exported.
    pub pages: usize,
    /// Payload size in bytes.
    pub size_bytes: u64,
    /// Where the payload was written; absent on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Thumbnails written to disk.
    pub thumbnails_written: usize,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl ExportReport {
    /// Build a report for `outcome`.
    pub fn new(config: &Config, outcome: &Outcome, output_path: Option<PathBuf>) -> Self {
        let download = &outcome.download;
        Self {
            workflow: config.task.name(),
            inputs: outcome.inputs.iter().map(|(name, _)| name.clone()).collect(),
            file_name: download.file_name.clone(),
            kind: download.kind,
            mime_type: download.kind.mime_type(),
            pages: download.page_count,
            size_bytes: download.bytes.len() as u64,
            output_path,
            thumbnails_written: 0,
            dry_run: config.dry_run,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Display the input files of a run.
pub fn display_inputs(formatter: &OutputFormatter, outcome: &Outcome) {
    formatter.info(&format!("Read {} file(s)", outcome.inputs.len()));
    for (index, (name, size)) in outcome.inputs.iter().enumerate() {
        formatter.debug(&format!("{}. {name} ({})", index + 1, format_file_size(*size)));
    }
}

/// Display the export summary.
pub fn display_summary(formatter: &OutputFormatter, report: &ExportReport) {
    let size = format_file_size(report.size_bytes);

    match &report.output_path {
        Some(path) => formatter.success(&format!(
            "Created {} ({} page(s), {size})",
            path.display(),
            report.pages
        )),
        None => {
            formatter.success("Dry run completed successfully");
            formatter.info(&format!(
                "  Output would be: {} ({} page(s), {size})",
                report.file_name, report.pages
            ));
        }
    }

    formatter.detail("Workflow", report.workflow);
    formatter.detail("Type", report.mime_type);
    if report.thumbnails_written > 0 {
        formatter.detail("Thumbnails", &report.thumbnails_written.to_string());
    }
}
