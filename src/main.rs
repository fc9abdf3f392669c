//! pdfpages - Merge, split and reorder PDF pages.

mod cli;

use clap::Parser;
use std::path::Path;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use pdfpages::config::{Config, OverwriteMode};
use pdfpages::error::PdfPagesError;
use pdfpages::export::basename;
use pdfpages::io::{DownloadWriter, WriteOptions};
use pdfpages::output::{ExportReport, OutputFormatter, display_inputs, display_summary};
use pdfpages::workflow;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "pdfpages=debug"
    } else if quiet {
        "pdfpages=error"
    } else {
        "pdfpages=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfPagesError> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfpages::NAME, pdfpages::VERSION));
        formatter.blank_line();
    }

    if config.dry_run {
        formatter.info("Dry run mode - no files will be written");
    }

    formatter.info(&format!("Running {}...", config.task.name()));
    let mut outcome = workflow::execute(&config).await?;

    display_inputs(&formatter, &outcome);
    formatter.debug(&format!("{} page(s) in working set", outcome.pages_loaded));

    let mut output_path = None;
    let mut thumbnails_written = 0;

    if !config.dry_run {
        let target = DownloadWriter::target_path(&config.output_dir, &outcome.download);
        let overwrite = handle_output_overwrite(&config, &target, &formatter).await?;

        let writer = DownloadWriter::with_options(WriteOptions {
            overwrite,
            ..Default::default()
        });
        let stats = writer.save(&outcome.download, &config.output_dir).await?;
        output_path = Some(stats.output_path);

        if let Some(dir) = &config.render.thumbnails_dir
            && let Some((name, _)) = outcome.inputs.first()
        {
            let pages = std::mem::take(&mut outcome.thumbnails);
            thumbnails_written = writer.save_thumbnails(dir, basename(name), pages).await?;
            if thumbnails_written == 0 && outcome.pages_loaded > 0 {
                formatter.warning("No raster thumbnails to write; PDFium is not in use");
            }
        }
    }

    let mut report = ExportReport::new(&config, &outcome, output_path);
    report.thumbnails_written = thumbnails_written;

    if config.json {
        let json = report
            .to_json()
            .map_err(|err| PdfPagesError::other(format!("Failed to encode report: {err}")))?;
        println!("{json}");
    }

    if formatter.should_print() {
        formatter.blank_line();
        display_summary(&formatter, &report);
    }

    Ok(())
}

/// Decide whether an existing output file may be replaced.
///
/// Returns `true` when the writer should overwrite.
async fn handle_output_overwrite(
    config: &Config,
    target: &Path,
    formatter: &OutputFormatter,
) -> Result<bool, PdfPagesError> {
    if !DownloadWriter::exists(target).await {
        return Ok(false);
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(true),
        OverwriteMode::NoClobber => Err(PdfPagesError::output_exists(target.to_path_buf())),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber
            if formatter.is_quiet() {
                return Err(PdfPagesError::output_exists(target.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                target.display()
            ));

            let confirmed = formatter
                .confirm("Overwrite?")
                .map_err(|err| PdfPagesError::other(format!("Failed to read input: {err}")))?;

            if confirmed {
                Ok(true)
            } else {
                Err(PdfPagesError::Cancelled)
            }
        }
    }
}
