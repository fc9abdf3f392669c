//! Configuration module for pdfpages.
//!
//! This module holds the validated, normalized configuration that drives a
//! workflow run. The binary builds it from command-line arguments; it
//! handles:
//! - Validation of argument combinations
//! - Application of defaults (thumbnail scales, compression)
//! - Page range parsing

use anyhow::{Context, Result, bail};

use crate::PdfPagesError;
use crate::render::RendererKind;
use crate::selection::Edit;
use std::{path::PathBuf, str::FromStr};

/// Thumbnail scale used by the Split workflow unless overridden.
pub const DEFAULT_SPLIT_THUMBNAIL_SCALE: f32 = 0.3;

/// Thumbnail scale used by the Organize workflow unless overridden.
pub const DEFAULT_ORGANIZE_THUMBNAIL_SCALE: f32 = 0.5;

/// Largest accepted thumbnail scale.
pub const MAX_THUMBNAIL_SCALE: f32 = 4.0;

/// Compression level for output PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact structure.
    None,
    /// Compress content streams.
    #[default]
    Standard,
    /// Compress and drop unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = crate::PdfPagesError;
    /// Parse compression level from string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string doesn't match a valid compression level.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfPagesError::InvalidConfig {
                message: format!(
                    "Invalid compression level: {s}. Must be one of: none, standard, maximum"
                ),
            }),
        }
    }
}

/// How the Split workflow packages its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One PDF containing every selected page.
    #[default]
    Single,
    /// One PDF per selected page, bundled into a zip archive.
    Multiple,
}

impl FromStr for OutputMode {
    type Err = crate::PdfPagesError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" | "zip" => Ok(Self::Multiple),
            _ => Err(PdfPagesError::InvalidConfig {
                message: format!("Invalid output mode: {s}. Must be one of: single, multiple"),
            }),
        }
    }
}

/// Pages picked by `--pages`.
///
/// A comma-separated list of spans: `5`, `2-4`, `7-` (page 7 to the end)
/// or `-3` (the first three pages). Spans may overlap and come in any
/// order; the result is a set, the working set decides the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    spans: Vec<PageSpan>,
}

/// One inclusive span; `last == None` runs to the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageSpan {
    first: u32,
    last: Option<u32>,
}

impl PageSpan {
    fn contains(self, page: u32) -> bool {
        page >= self.first && self.last.is_none_or(|last| page <= last)
    }
}

fn page_number(text: &str) -> Result<u32> {
    let page: u32 = text
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a page number", text.trim()))?;
    if page == 0 {
        bail!("Page numbers start at 1");
    }
    Ok(page)
}

impl PageRange {
    /// Parse a page range string.
    ///
    /// # Errors
    ///
    /// Fails on empty input, zero or non-numeric pages, and spans whose
    /// start lies after their end.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfpages::config::PageRange;
    ///
    /// let range = PageRange::parse("1-5,10-").unwrap();
    /// assert!(range.contains(3));
    /// assert!(range.contains(42));
    /// assert!(!range.contains(7));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            bail!("Page range cannot be empty");
        }

        let spans = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                let span = match part.split_once('-') {
                    None => {
                        let page = page_number(part)?;
                        PageSpan {
                            first: page,
                            last: Some(page),
                        }
                    }
                    Some((from, to))
                        if to.contains('-') || (from.trim().is_empty() && to.trim().is_empty()) =>
                    {
                        bail!("Invalid page span '{part}'. Expected N, N-M, N- or -M")
                    }
                    Some((from, to)) => PageSpan {
                        first: match from.trim() {
                            "" => 1,
                            from => page_number(from)?,
                        },
                        last: match to.trim() {
                            "" => None,
                            to => Some(page_number(to)?),
                        },
                    },
                };

                if let PageSpan {
                    first,
                    last: Some(last),
                } = span
                    && first > last
                {
                    bail!("Invalid span {first}-{last}: the first page comes after the last");
                }
                Ok(span)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { spans })
    }

    /// Whether the one-based `page` falls in any span.
    pub fn contains(&self, page: u32) -> bool {
        self.spans.iter().any(|span| span.contains(page))
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Thumbnail rendering settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSettings {
    /// Which renderer to use.
    pub renderer: RendererKind,

    /// Directory containing the PDFium shared library.
    pub library_dir: Option<PathBuf>,

    /// Scale override; `None` uses the workflow default.
    pub thumbnail_scale: Option<f32>,

    /// Where to write rendered thumbnails, if anywhere.
    pub thumbnails_dir: Option<PathBuf>,
}

/// The workflow to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Concatenate whole files in order.
    Merge {
        /// Input files (after glob expansion, in order).
        inputs: Vec<PathBuf>,
    },
    /// Extract a selection of pages from one file.
    Split {
        /// Source file.
        input: PathBuf,
        /// Pages to keep; `None` keeps every page before edits.
        pages: Option<PageRange>,
        /// Edits applied after the page range.
        edits: Vec<Edit>,
        /// Single document or one document per page.
        mode: OutputMode,
    },
    /// Reorder and delete pages of one file.
    Organize {
        /// Source file.
        input: PathBuf,
        /// Edits applied in order.
        edits: Vec<Edit>,
    },
}

impl Task {
    /// Short workflow name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Merge { .. } => "merge",
            Self::Split { .. } => "split",
            Self::Organize { .. } => "organize",
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Workflow and its inputs.
    pub task: Task,

    /// Directory outputs are written into.
    pub output_dir: PathBuf,

    /// Dry run mode - build outputs without writing them.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a JSON report on stdout.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Thumbnail rendering settings.
    pub render: RenderSettings,
}

impl Config {
    /// Create a configuration for `task` with default settings.
    pub fn new(task: Task) -> Self {
        Self {
            task,
            output_dir: PathBuf::from("."),
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            render: RenderSettings::default(),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The thumbnail scale is not in (0, 4]
    /// - An edit does not apply to the selected workflow
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(scale) = self.render.thumbnail_scale
            && !(scale > 0.0 && scale <= MAX_THUMBNAIL_SCALE)
        {
            bail!("Thumbnail scale must be greater than 0 and at most {MAX_THUMBNAIL_SCALE}");
        }

        match &self.task {
            Task::Merge { inputs } => {
                if inputs.is_empty() {
                    bail!("No input files specified");
                }
            }
            Task::Split { edits, .. } => {
                if let Some(edit) = edits.iter().find(|edit| !edit.applies_to_split()) {
                    bail!("Edit '{edit}' is not available when splitting");
                }
            }
            Task::Organize { edits, .. } => {
                if let Some(edit) = edits.iter().find(|edit| !edit.applies_to_organize()) {
                    bail!("Edit '{edit}' is not available when organizing");
                }
            }
        }

        Ok(())
    }

    /// Thumbnail scale for the configured workflow.
    pub fn thumbnail_scale(&self) -> f32 {
        self.render
            .thumbnail_scale
            .unwrap_or(match self.task {
                Task::Organize { .. } => DEFAULT_ORGANIZE_THUMBNAIL_SCALE,
                Task::Split { .. } | Task::Merge { .. } => DEFAULT_SPLIT_THUMBNAIL_SCALE,
            })
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
