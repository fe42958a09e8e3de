//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.
//! Colors are left to the CLI.

use std::io::Write;

use crate::report::ValidationReport;

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let source = if report.source_file_name.is_empty() {
        "(none)"
    } else {
        &report.source_file_name
    };
    let format = if report.output_format.is_empty() {
        "(none)"
    } else {
        &report.output_format
    };

    writeln!(writer, "  Source file:     {source}")?;
    writeln!(writer, "  Output format:   {format}")?;
    writeln!(
        writer,
        "  Delimiter:       {} ({})",
        if report.delimiter_required {
            "required"
        } else {
            "not required"
        },
        report.delimiter_role.label()
    )?;
    writeln!(writer, "  Key:             {}", report.key_purpose.label())?;
    writeln!(writer)?;

    if report.ok {
        writeln!(writer, "\u{2713} Submission is valid")?;
        return Ok(());
    }

    for error in &report.errors {
        writeln!(writer, "{}", error.format_human_readable())?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "\u{2717} {} field(s) failed validation",
        report.errors_count()
    )?;

    Ok(())
}
