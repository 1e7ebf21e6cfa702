//! Per-file reports and run totals

use crate::filter::FilterVerdict;
use specscout_domain::{ExtractionOutcome, FailureReason, Fingerprint, ProductRecord, SkipReason};

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// File name
    pub file: String,

    /// Content fingerprint, when the file could be hashed
    pub fingerprint: Option<Fingerprint>,

    /// Extraction outcome
    pub outcome: ExtractionOutcome,

    /// Filter decision, for successful extractions only
    pub verdict: Option<FilterVerdict>,
}

impl FileReport {
    /// Report for a file that never reached the filter
    pub fn new(file: impl Into<String>, fingerprint: Option<Fingerprint>, outcome: ExtractionOutcome) -> Self {
        Self {
            file: file.into(),
            fingerprint,
            outcome,
            verdict: None,
        }
    }

    /// Report for a successful extraction and its filter decision
    pub fn extracted(
        file: impl Into<String>,
        fingerprint: Option<Fingerprint>,
        record: ProductRecord,
        verdict: FilterVerdict,
    ) -> Self {
        Self {
            file: file.into(),
            fingerprint,
            outcome: ExtractionOutcome::Success(record),
            verdict: Some(verdict),
        }
    }

    /// The record, if it passed the filter
    pub fn emitted(&self) -> Option<&ProductRecord> {
        match self.verdict {
            Some(FilterVerdict::Emit) => self.outcome.record(),
            _ => None,
        }
    }

    /// Short status for display, e.g. `emitted` or `skipped:duplicate`
    pub fn status(&self) -> String {
        match self.verdict {
            Some(FilterVerdict::Emit) => "emitted".to_string(),
            Some(FilterVerdict::OverLimit) => "filtered:over-limit".to_string(),
            Some(FilterVerdict::NoWeight) => "filtered:no-weight".to_string(),
            None => self.outcome.label(),
        }
    }
}

/// Aggregate counts for a scan run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files found in the directory
    pub scanned: usize,

    /// Files without the PDF extension
    pub wrong_extension: usize,

    /// Files whose content was already seen
    pub duplicate: usize,

    /// Files skipped for any other reason
    pub skipped: usize,

    /// Files that failed
    pub failed: usize,

    /// Records above the weight limit
    pub filtered_out: usize,

    /// Records without a weight
    pub no_weight: usize,

    /// Records emitted
    pub emitted: usize,

    /// Every failed file with its reason
    pub failures: Vec<(String, FailureReason)>,
}

impl ScanSummary {
    /// Create new empty totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file report
    pub fn record(&mut self, report: &FileReport) {
        self.scanned += 1;
        match (&report.outcome, report.verdict) {
            (ExtractionOutcome::Skipped(SkipReason::WrongExtension), _) => self.wrong_extension += 1,
            (ExtractionOutcome::Skipped(SkipReason::Duplicate), _) => self.duplicate += 1,
            (ExtractionOutcome::Skipped(_), _) => self.skipped += 1,
            (ExtractionOutcome::Failed(reason), _) => {
                self.failed += 1;
                self.failures.push((report.file.clone(), reason.clone()));
            }
            (ExtractionOutcome::Success(_), Some(FilterVerdict::OverLimit)) => self.filtered_out += 1,
            (ExtractionOutcome::Success(_), Some(FilterVerdict::NoWeight)) => self.no_weight += 1,
            (ExtractionOutcome::Success(_), _) => self.emitted += 1,
        }
    }

    /// Generate a summary report of the run
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Scan Summary".to_string(),
            "============".to_string(),
            format!("Files scanned: {}", self.scanned),
            format!("Wrong extension: {}", self.wrong_extension),
            format!("Duplicates: {}", self.duplicate),
            format!("Skipped: {}", self.skipped),
            format!("Failed: {}", self.failed),
            format!("Over limit: {}", self.filtered_out),
            format!("No weight found: {}", self.no_weight),
            format!("Emitted: {}", self.emitted),
        ];

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failures:".to_string());
            for (file, reason) in &self.failures {
                lines.push(format!("  {}: {}", file, reason));
            }
        }

        lines.join("\n")
    }
}

/// Everything a scan produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Emitted records, sorted by source file name
    pub records: Vec<ProductRecord>,

    /// One report per file, sorted by file name
    pub files: Vec<FileReport>,

    /// Totals
    pub summary: ScanSummary,
}

impl ScanReport {
    /// Build a report from per-file results
    pub fn from_files(mut files: Vec<FileReport>) -> Self {
        files.sort_by(|a, b| a.file.cmp(&b.file));

        let mut summary = ScanSummary::new();
        for report in &files {
            summary.record(report);
        }

        let mut records: Vec<ProductRecord> = files.iter().filter_map(|f| f.emitted().cloned()).collect();
        records.sort_by(|a, b| a.source_file.cmp(&b.source_file));

        Self {
            records,
            files,
            summary,
        }
    }
}
