//! Message formatting and display.
//!
//! Human-facing messages go to stdout, or to stderr when stdout is reserved
//! for the JSON report.
//!
//! # Examples
//!
//! ```
//! use pdfpages::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Rendering 12 pages...");
//! formatter.success("Created merged.pdf");
//! ```

use crate::config::Config;
use std::io::{self, IsTerminal, Write};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Debug => "\x1b[36m",
        }
    }

    /// Whether the message is shown in quiet mode.
    fn survives_quiet(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
    to_stderr: bool,
}

impl OutputFormatter {
    /// Create a new output formatter writing to stdout.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: io::stdout().is_terminal() && std::env::var("TERM").is_ok(),
            to_stderr: false,
        }
    }

    /// Create a formatter from configuration.
    ///
    /// With `--json`, messages move to stderr.
    pub fn from_config(config: &Config) -> Self {
        let formatter = Self::new(config.quiet, config.verbose);
        if config.json {
            formatter.on_stderr()
        } else {
            formatter
        }
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Send messages to stderr instead of stdout.
    pub fn on_stderr(mut self) -> Self {
        self.to_stderr = true;
        self.colored = io::stderr().is_terminal() && std::env::var("TERM").is_ok();
        self
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Print a warning message. Always displayed.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Print an error message. Always displayed.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Print a message only in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.emit(MessageLevel::Debug, message);
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            self.write_line(&format!("\n{title}"));
        }
    }

    /// Print a `label: value` line in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            self.write_line(&format!("  {label}: {value}"));
        }
    }

    /// Print a numbered list item.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            self.write_line(&format!("  {index}. {message}"));
        }
    }

    /// Print a blank line.
    pub fn blank_line(&self) {
        if !self.quiet {
            self.write_line("");
        }
    }

    /// Ask a yes/no question and read the answer from stdin.
    ///
    /// Anything other than `y` or `yes` counts as no.
    pub fn confirm(&self, question: &str) -> io::Result<bool> {
        {
            let mut stderr = io::stderr().lock();
            write!(stderr, "{question} [y/N]: ")?;
            stderr.flush()?;
        }

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        Ok(is_yes(&response))
    }

    /// Render a message line without printing it.
    pub fn format_message(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        let color = level.color();
        if self.colored && !color.is_empty() {
            format!("{color}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        if self.quiet && !level.survives_quiet() {
            return;
        }
        self.write_line(&self.format_message(level, message));
    }

    fn write_line(&self, line: &str) {
        // A closed pipe is not worth failing the run over.
        if self.to_stderr {
            let _ = writeln!(io::stderr().lock(), "{line}");
        } else {
            let _ = writeln!(io::stdout().lock(), "{line}");
        }
    }

    /// Check if output should be shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

fn is_yes(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}
