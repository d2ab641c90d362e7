//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated
//! renderings for conformance reports and the surface listing.

use crate::cli::OutputFormat;
use crate::error::Result;
use bridgetest_core::{ConformanceReport, Surface};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a conformance report
    fn format_report(&self, report: &ConformanceReport, failures_only: bool) -> Result<String>;

    /// Format the surface listing, optionally with C symbols
    fn format_surface(&self, surface: &Surface, symbols: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, report: &ConformanceReport, failures_only: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report, failures_only)),
            _ => self.format(&report_document(report)),
        }
    }

    fn format_surface(&self, surface: &Surface, symbols: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_surface_human(surface, symbols)),
            _ => {
                let mut document = serde_json::to_value(surface)?;
                if symbols {
                    document["symbols"] = json!(surface.symbols());
                }
                self.format(&document)
            }
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting data: {} bytes", formatted.len());
        self.emit(&formatted)
    }

    /// Write a conformance report
    ///
    /// In human format the per-check lines are followed by a coloured
    /// summary; machine formats get one document.
    pub fn report(&mut self, report: &ConformanceReport, failures_only: bool) -> Result<()> {
        let formatted = self.format.format_report(report, failures_only)?;
        self.emit(&formatted)?;

        if self.format == OutputFormat::Human {
            let summary = format!(
                "{}/{} checks passed ({} backend, {} tier)",
                report.passed(),
                report.total(),
                report.backend,
                report.tier
            );
            if report.failed() == 0 {
                self.success(&format!("✓ {}", summary))?;
            } else if report.is_success() {
                self.warning(&format!("⚠ {}", summary))?;
            } else {
                self.error(&format!("✗ {}", summary))?;
            }
        }

        Ok(())
    }

    /// Write the surface listing
    pub fn surface(&mut self, surface: &Surface, symbols: bool) -> Result<()> {
        let formatted = self.format.format_surface(surface, symbols)?;
        self.emit(&formatted)
    }

    /// Check if verbose output should be shown
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        if self.format == OutputFormat::Human && formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            // Everything else ends with exactly one newline
            self.writeln(formatted.trim_end_matches('\n'))
        }
    }
}

/// Machine-readable form of a report, with the summary counts inlined
fn report_document(report: &ConformanceReport) -> serde_json::Value {
    json!({
        "backend": report.backend,
        "tier": report.tier,
        "success": report.is_success(),
        "total": report.total(),
        "passed": report.passed(),
        "failed": report.failed(),
        "checks": report.checks,
    })
}

/// Format a conformance report for human reading
fn format_report_human(report: &ConformanceReport, failures_only: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "═══ Conformance: {} ({}) ═══\n\n",
        report.backend, report.tier
    ));

    let width = report
        .checks
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    for check in &report.checks {
        if check.passed {
            if !failures_only {
                output.push_str(&format!(
                    "  ✓ {:width$}  {} = {}\n",
                    check.name,
                    check.call,
                    check.actual,
                    width = width
                ));
            }
        } else {
            output.push_str(&format!(
                "  ✗ {:width$}  {} expected {}, got {}\n",
                check.name,
                check.call,
                check.expected,
                check.actual,
                width = width
            ));
        }
    }

    output.push('\n');
    output
}

/// Format the surface for human reading
fn format_surface_human(surface: &Surface, symbols: bool) -> String {
    let mut output = String::new();

    output.push_str("Functions:\n");
    for function in surface.functions {
        output.push_str(&format!("  {}\n", function));
        if symbols {
            output.push_str(&format!("      {}\n", function.symbol()));
        }
    }

    for descriptor in surface.structs {
        output.push_str(&format!("\n{}:\n", descriptor.name));
        for field in descriptor.fields {
            let access = match (field.getter, field.setter) {
                (true, true) => "get/set",
                (true, false) => "get",
                (false, true) => "set",
                (false, false) => "-",
            };
            output.push_str(&format!("  {}: {} [{}]\n", field.field, field.kind, access));
        }
        if symbols {
            for symbol in descriptor.symbols() {
                output.push_str(&format!("      {}\n", symbol));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
