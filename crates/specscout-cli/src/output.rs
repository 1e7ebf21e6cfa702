//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use specscout_domain::{ExtractionOutcome, ProductRecord};
use specscout_scanner::{FileReport, FilterVerdict, ScanSummary};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

/// One emitted product in the results file
#[derive(Debug, Serialize)]
struct ProductJson<'a> {
    name: &'a str,
    file: &'a str,
    characteristics: Vec<BTreeMap<&'a str, &'a str>>,
}

impl<'a> From<&'a ProductRecord> for ProductJson<'a> {
    fn from(record: &'a ProductRecord) -> Self {
        Self {
            name: &record.name,
            file: &record.source_file,
            characteristics: record
                .characteristics
                .iter()
                .map(|c| BTreeMap::from([(c.label.as_str(), c.value.as_str())]))
                .collect(),
        }
    }
}

/// Render emitted records as the results JSON array.
///
/// Each characteristic becomes a single-entry `{label: value}` object, in
/// extraction order.
pub fn records_json(records: &[ProductRecord]) -> Result<String> {
    let products: Vec<ProductJson<'_>> = records.iter().map(ProductJson::from).collect();
    Ok(serde_json::to_string_pretty(&products)?)
}

/// Write the results JSON to `path`, creating parent directories.
pub fn write_results(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", json))?;
    Ok(())
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Status line for one file.
    pub fn file_line(&self, report: &FileReport) -> String {
        match (&report.outcome, report.verdict) {
            (ExtractionOutcome::Success(record), Some(FilterVerdict::Emit)) => {
                self.success(&format!("{}: {} ({})", report.file, record.name, weight_text(record)))
            }
            (ExtractionOutcome::Success(record), Some(FilterVerdict::OverLimit)) => self.colorize(
                &format!("- {}: {} over limit ({})", report.file, record.name, weight_text(record)),
                "yellow",
            ),
            (ExtractionOutcome::Success(record), _) => self.colorize(
                &format!("- {}: {} has no weight", report.file, record.name),
                "yellow",
            ),
            (ExtractionOutcome::Skipped(reason), _) => {
                self.colorize(&format!("· {}: skipped ({})", report.file, reason), "cyan")
            }
            (ExtractionOutcome::Failed(reason), _) => {
                self.error(&format!("{}: {}", report.file, reason))
            }
        }
    }

    /// Summary table of a run.
    pub fn summary_table(&self, summary: &ScanSummary) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Files", "Count"]);

        let rows = [
            ("Scanned", summary.scanned),
            ("Wrong extension", summary.wrong_extension),
            ("Duplicate", summary.duplicate),
            ("Skipped", summary.skipped),
            ("Failed", summary.failed),
            ("Over limit", summary.filtered_out),
            ("No weight", summary.no_weight),
            ("Emitted", summary.emitted),
        ];
        for (label, count) in rows {
            builder.push_record([label.to_string(), count.to_string()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::last()).with(Alignment::right()));

        table.to_string()
    }

    /// Failed files with their reasons, one per line.
    pub fn failures(&self, summary: &ScanSummary) -> Option<String> {
        if summary.failures.is_empty() {
            return None;
        }
        let lines: Vec<String> = summary
            .failures
            .iter()
            .map(|(file, reason)| self.error(&format!("{}: {}", file, reason)))
            .collect();
        Some(format!("Failed files:\n{}", lines.join("\n")))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn weight_text(record: &ProductRecord) -> String {
    record
        .weight_grams
        .map(|g| g.to_string())
        .unwrap_or_else(|| "no weight".to_string())
}
