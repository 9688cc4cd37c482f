//! Run summaries.
//!
//! Supports two formats, both written to stderr so they never mix with a tag
//! table on stdout:
//! - Pretty: colored per-file counts and warnings
//! - JSON: every declaration with its key, names and position

use colored::*;
use serde::Serialize;
use std::io::{self, Write};

use crate::generate::{GenerateReport, KeyedDeclaration};

/// Summary output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    Pretty,
    Json,
}

/// JSON summary structure.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub total: u32,
    pub files: Vec<JsonFile<'a>>,
    pub diagnostics: &'a [crate::generate::Diagnostic],
}

/// Per-file section of the JSON summary.
#[derive(Serialize)]
pub struct JsonFile<'a> {
    pub path: &'a str,
    pub declarations: &'a [KeyedDeclaration],
}

pub fn to_json(report: &GenerateReport) -> anyhow::Result<String> {
    let json = JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        total: report.total,
        files: report
            .files
            .iter()
            .map(|f| JsonFile {
                path: &f.path,
                declarations: &f.declarations,
            })
            .collect(),
        diagnostics: &report.diagnostics,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Write the summary in JSON format.
pub fn write_json<W: Write>(out: &mut W, report: &GenerateReport) -> anyhow::Result<()> {
    writeln!(out, "{}", to_json(report)?)?;
    Ok(())
}

/// Write the summary in human-readable format.
pub fn write_pretty<W: Write>(out: &mut W, report: &GenerateReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        "makedoc".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;

    for file in &report.files {
        let count = file.declarations.len();
        let count_str = if count == 0 {
            count.to_string().dimmed()
        } else {
            count.to_string().green()
        };
        writeln!(out, "  {} {}", count_str, file.path)?;
    }

    if !report.diagnostics.is_empty() {
        writeln!(out)?;
        for d in &report.diagnostics {
            writeln!(
                out,
                "  {} {}:{}: {}",
                "warning:".yellow().bold(),
                d.file,
                d.line,
                d.message
            )?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {} {} commands, {} tag blocks",
        "Total:".dimmed(),
        report.total.to_string().bold(),
        report.tags.blocks().len()
    )?;
    Ok(())
}

/// Write the summary in the chosen format.
pub fn write_summary<W: Write>(
    out: &mut W,
    format: SummaryFormat,
    report: &GenerateReport,
) -> anyhow::Result<()> {
    match format {
        SummaryFormat::Pretty => write_pretty(out, report)?,
        SummaryFormat::Json => write_json(out, report)?,
    }
    Ok(())
}
