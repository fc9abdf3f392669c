//! Command-line interface: global options plus one subcommand per workflow.
//!
//! Arguments are parsed with `clap`, checked early by [`Cli::validate`] and
//! turned into a [`Config`] by [`Cli::to_config`].

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfpages::config::{
    CompressionLevel, Config, OutputMode, OverwriteMode, PageRange, RenderSettings, Task,
};
use pdfpages::render::RendererKind;
use pdfpages::selection::Edit;
use pdfpages::{PdfPagesError, Result};

/// Merge, split and reorder PDF pages.
///
/// pdfpages concatenates whole files, extracts a selection of pages into a
/// new document or a zip of one-page documents, and reorders or deletes
/// pages of a single file.
#[derive(Parser, Debug)]
#[command(name = "pdfpages")]
#[command(version)]
#[command(about = "Merge, split and reorder PDF pages", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Workflow to run
    #[command(subcommand)]
    pub command: Command,

    /// Directory the output is written into
    ///
    /// Output names are fixed per workflow: merged.pdf, organized.pdf,
    /// <name>_split.pdf or <name>_split.zip.
    #[arg(
        short,
        long,
        global = true,
        value_name = "DIR",
        default_value = ".",
        env = "PDFPAGES_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// Dry run - build the output without writing it
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show per-file and per-page details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    ///
    /// By default, pdfpages will prompt before overwriting an existing file.
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a JSON report of the export on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Compression level for output PDFs
    ///
    /// - none: No compression (preserves exact structure)
    /// - standard: Compress content streams (default)
    /// - maximum: Also drop unreferenced objects
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Page renderer used for thumbnails
    ///
    /// - auto: PDFium if it can be loaded, page outlines otherwise
    /// - pdfium: PDFium only
    /// - outline: page outlines sized from the MediaBox, no drawing
    #[arg(
        long,
        global = true,
        value_name = "RENDERER",
        default_value = "auto",
        env = "PDFPAGES_RENDERER"
    )]
    #[arg(value_parser = ["auto", "pdfium", "outline"])]
    pub renderer: String,

    /// Directory containing the PDFium shared library
    #[arg(long, global = true, value_name = "DIR", env = "PDFPAGES_PDFIUM_LIBRARY")]
    pub pdfium_library: Option<PathBuf>,

    /// Thumbnail scale factor (default 0.3 for split, 0.5 for organize)
    #[arg(
        long,
        global = true,
        value_name = "FACTOR",
        env = "PDFPAGES_THUMBNAIL_SCALE"
    )]
    pub thumbnail_scale: Option<f32>,

    /// Also write the rendered thumbnails as PNG files into DIR
    #[arg(long, global = true, value_name = "DIR")]
    pub thumbnails: Option<PathBuf>,
}

/// Available workflows.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Concatenate every page of two or more files, in order
    ///
    /// Examples:
    ///   pdfpages merge a.pdf b.pdf
    ///   pdfpages merge 'chapter*.pdf' -o book
    Merge {
        /// Input files or glob patterns, merged in the order given
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },

    /// Extract a selection of pages
    ///
    /// Examples:
    ///   pdfpages split report.pdf --pages 1-3,7
    ///   pdfpages split report.pdf --pages 2,4 --mode multiple
    ///   pdfpages split report.pdf -e toggle:2 -e move:5:1
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages to keep (e.g. "1-5,10"); all pages when omitted
        #[arg(short, long, value_name = "RANGE")]
        pages: Option<String>,

        /// Edit to apply: move:<page>:<pos>, toggle:<page>, all, none
        #[arg(short = 'e', long = "edit", value_name = "EDIT")]
        edits: Vec<String>,

        /// single: one PDF; multiple: a zip with one PDF per page
        #[arg(short, long, value_name = "MODE", default_value = "single")]
        #[arg(value_parser = ["single", "multiple"])]
        mode: String,
    },

    /// Reorder and delete pages
    ///
    /// Examples:
    ///   pdfpages organize scan.pdf -e delete:3 -e move:5:1
    Organize {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Edit to apply: move:<page>:<pos>, delete:<page>
        #[arg(short = 'e', long = "edit", value_name = "EDIT")]
        edits: Vec<String>,
    },
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level, renderer or mode is invalid
    /// - Page range format is invalid
    /// - An edit cannot be parsed
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;
        let renderer = RendererKind::from_str(&self.renderer)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let task = match &self.command {
            Command::Merge { inputs } => Task::Merge {
                inputs: inputs.iter().map(PathBuf::from).collect(),
            },
            Command::Split {
                input,
                pages,
                edits,
                mode,
            } => Task::Split {
                input: input.clone(),
                pages: pages.as_deref().map(parse_page_range).transpose()?,
                edits: parse_edits(edits)?,
                mode: OutputMode::from_str(mode)?,
            },
            Command::Organize { input, edits } => Task::Organize {
                input: input.clone(),
                edits: parse_edits(edits)?,
            },
        };

        let config = Config {
            task,
            output_dir: self.output_dir.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            overwrite_mode,
            compression,
            render: RenderSettings {
                renderer,
                library_dir: self.pdfium_library.clone(),
                thumbnail_scale: self.thumbnail_scale,
                thumbnails_dir: self.thumbnails.clone(),
            },
        };

        config.validate().map_err(|e| {
            PdfPagesError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<()> {
        if let Command::Merge { inputs } = &self.command
            && inputs.is_empty()
        {
            return Err(PdfPagesError::invalid_config("No input files specified"));
        }

        if !["none", "standard", "maximum"].contains(&self.compression.as_str()) {
            return Err(PdfPagesError::invalid_config(format!(
                "Invalid compression level: {}",
                self.compression
            )));
        }

        if let Some(scale) = self.thumbnail_scale
            && !(scale.is_finite() && scale > 0.0)
        {
            return Err(PdfPagesError::invalid_config(format!(
                "Invalid thumbnail scale: {scale}. Must be a positive number"
            )));
        }

        if let Command::Split {
            pages: Some(pages), ..
        } = &self.command
        {
            parse_page_range(pages)?;
        }

        Ok(())
    }
}

fn parse_page_range(text: &str) -> Result<PageRange> {
    PageRange::parse(text).map_err(|e| PdfPagesError::invalid_config(e.to_string()))
}

fn parse_edits(edits: &[String]) -> Result<Vec<Edit>> {
    edits.iter().map(|edit| edit.parse()).collect()
}
