//! Scan orchestration
//!
//! A run has two phases:
//!
//! 1. **Dedup**, sequential and in sorted file-name order: extension check,
//!    fingerprint, seen-set insert. The lexicographically first of a set of
//!    identical files is the one that goes on.
//! 2. **Extract**, on a bounded worker pool: load text on the blocking pool,
//!    run the configured [`Engine`], normalize, filter.
//!
//! Files are independent. A failure in one file becomes that file's outcome
//! and never stops the others.

use crate::config::ScanConfig;
use crate::discovery::{discover, display_name, is_pdf};
use crate::error::ScanError;
use crate::filter::WeightFilter;
use crate::fingerprint::ContentFingerprinter;
use crate::loader::aggregate_pages;
use crate::summary::{FileReport, ScanReport};
use specscout_domain::{
    DocumentTextLoader, ExtractionOutcome, FailureReason, Fingerprint, ProductRecord, SkipReason,
};
use specscout_extractor::{AbortSignal, Engine};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A unique PDF that survived the dedup phase
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    file: String,
    fingerprint: Fingerprint,
}

impl Candidate {
    fn report(&self, outcome: ExtractionOutcome) -> FileReport {
        FileReport::new(self.file.clone(), Some(self.fingerprint), outcome)
    }
}

/// Drives one scan of a directory
///
/// # Examples
///
/// ```no_run
/// use specscout_extractor::PatternExtractor;
/// use specscout_scanner::{PdfTextLoader, ScanConfig, ScanOrchestrator};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let orchestrator = ScanOrchestrator::new(
///     PatternExtractor::new(),
///     PdfTextLoader::new(),
///     ScanConfig::new(1_000),
/// )?;
///
/// let report = orchestrator.run("datasheets".as_ref()).await?;
/// println!("{}", report.summary.summary());
/// # Ok(())
/// # }
/// ```
pub struct ScanOrchestrator<E, D> {
    engine: Arc<E>,
    loader: Arc<D>,
    config: ScanConfig,
    abort: AbortSignal,
}

impl<E, D> ScanOrchestrator<E, D>
where
    E: Engine + 'static,
    D: DocumentTextLoader + Send + Sync + 'static,
{
    /// Create a new orchestrator
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Config` if the configuration is invalid.
    pub fn new(engine: E, loader: D, config: ScanConfig) -> Result<Self, ScanError> {
        config.validate().map_err(ScanError::Config)?;
        Ok(Self {
            engine: Arc::new(engine),
            loader: Arc::new(loader),
            config,
            abort: AbortSignal::new(),
        })
    }

    /// Use an externally owned abort signal
    pub fn with_abort_signal(mut self, abort: AbortSignal) -> Self {
        self.abort = abort;
        self
    }

    /// The abort signal checked by this orchestrator
    pub fn abort_signal(&self) -> AbortSignal {
        self.abort.clone()
    }

    /// Configuration in use
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every file directly inside `dir`
    ///
    /// # Errors
    ///
    /// Only setup problems are errors: an unreadable directory or a failed
    /// worker runtime. Per-file problems end up in the report.
    pub async fn run(&self, dir: &Path) -> Result<ScanReport, ScanError> {
        let paths = discover(dir)?;
        info!(
            "Scanning {} ({} file(s), engine: {}, limit: {} g, concurrency: {}{})",
            dir.display(),
            paths.len(),
            self.engine.name(),
            self.config.weight_limit_grams,
            self.config.effective_concurrency(),
            if self.config.test_mode { ", test mode" } else { "" }
        );

        let (candidates, mut reports) = deduplicate(paths).await?;
        debug!("{} unique PDF(s) to process", candidates.len());

        let processed = if self.config.test_mode {
            self.run_test_mode(candidates).await
        } else {
            self.run_pool(candidates).await
        };
        reports.extend(processed);

        let report = ScanReport::from_files(reports);
        info!(
            "Scan complete: {} emitted, {} failed, {} skipped",
            report.summary.emitted,
            report.summary.failed,
            report.summary.skipped + report.summary.duplicate + report.summary.wrong_extension
        );
        Ok(report)
    }

    async fn run_pool(&self, candidates: Vec<Candidate>) -> Vec<FileReport> {
        let semaphore = Arc::new(Semaphore::new(self.config.effective_concurrency()));
        let filter = WeightFilter::new(self.config.weight_limit());
        let mut tasks = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let sem = Arc::clone(&semaphore);
            let engine = Arc::clone(&self.engine);
            let loader = Arc::clone(&self.loader);
            let abort = self.abort.clone();
            let fallback = candidate.clone();

            let task = tokio::spawn(async move {
                let _permit = match sem.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return candidate.report(ExtractionOutcome::Failed(FailureReason::Internal(
                            e.to_string(),
                        )))
                    }
                };
                process_file(engine, loader, candidate, abort, filter).await
            });

            tasks.push((fallback, task));
        }

        let mut reports = Vec::with_capacity(tasks.len());
        for (candidate, task) in tasks {
            match task.await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!("Worker for {} failed: {}", candidate.file, e);
                    reports.push(candidate.report(ExtractionOutcome::Failed(FailureReason::Internal(
                        format!("Join error: {}", e),
                    ))));
                }
            }
        }
        reports
    }

    /// Sequential processing that stops after the first relevant file
    async fn run_test_mode(&self, candidates: Vec<Candidate>) -> Vec<FileReport> {
        let filter = WeightFilter::new(self.config.weight_limit());
        let mut reports = Vec::with_capacity(candidates.len());
        let mut remaining = candidates.into_iter();

        while let Some(candidate) = remaining.next() {
            if self.abort.is_aborted() {
                reports.push(candidate.report(ExtractionOutcome::Skipped(SkipReason::Aborted)));
                continue;
            }

            let text = match load_text(Arc::clone(&self.loader), candidate.path.clone()).await {
                Ok(text) => text,
                Err(reason) => {
                    warn!("{}: {}", candidate.file, reason);
                    reports.push(candidate.report(ExtractionOutcome::Failed(reason)));
                    continue;
                }
            };

            if !self.engine.is_relevant(&text) {
                debug!("{}: not relevant, trying next file", candidate.file);
                reports.push(candidate.report(ExtractionOutcome::Skipped(SkipReason::NoKeywordMatch)));
                continue;
            }

            reports.push(extract_record(self.engine.as_ref(), &candidate, &text, &self.abort, filter).await);
            info!("Test mode: stopping after {}", candidate.file);

            reports.extend(
                remaining
                    .by_ref()
                    .map(|rest| rest.report(ExtractionOutcome::Skipped(SkipReason::TestMode))),
            );
            break;
        }

        reports
    }
}

/// Extension filter, fingerprinting and duplicate detection, in input order
async fn deduplicate(paths: Vec<PathBuf>) -> Result<(Vec<Candidate>, Vec<FileReport>), ScanError> {
    tokio::task::spawn_blocking(move || {
        let fingerprinter = ContentFingerprinter::new();
        let mut candidates = Vec::new();
        let mut reports = Vec::new();

        for path in paths {
            let file = display_name(&path);

            if !is_pdf(&path) {
                debug!("{}: not a PDF", file);
                reports.push(FileReport::new(
                    file,
                    None,
                    ExtractionOutcome::Skipped(SkipReason::WrongExtension),
                ));
                continue;
            }

            match fingerprinter.check_file(&path) {
                Ok((fingerprint, true)) => candidates.push(Candidate {
                    path,
                    file,
                    fingerprint,
                }),
                Ok((fingerprint, false)) => {
                    debug!("{}: duplicate content ({})", file, fingerprint.short());
                    reports.push(FileReport::new(
                        file,
                        Some(fingerprint),
                        ExtractionOutcome::Skipped(SkipReason::Duplicate),
                    ));
                }
                Err(e) => {
                    warn!("{}", e);
                    reports.push(FileReport::new(
                        file,
                        None,
                        ExtractionOutcome::Failed(FailureReason::FileProcessing(e.to_string())),
                    ));
                }
            }
        }

        (candidates, reports)
    })
    .await
    .map_err(|e| ScanError::Worker(e.to_string()))
}

async fn process_file<E, D>(
    engine: Arc<E>,
    loader: Arc<D>,
    candidate: Candidate,
    abort: AbortSignal,
    filter: WeightFilter,
) -> FileReport
where
    E: Engine,
    D: DocumentTextLoader + Send + Sync + 'static,
{
    if abort.is_aborted() {
        return candidate.report(ExtractionOutcome::Skipped(SkipReason::Aborted));
    }

    match load_text(loader, candidate.path.clone()).await {
        Ok(text) => extract_record(engine.as_ref(), &candidate, &text, &abort, filter).await,
        Err(reason) => {
            warn!("{}: {}", candidate.file, reason);
            candidate.report(ExtractionOutcome::Failed(reason))
        }
    }
}

/// Load and aggregate page text on the blocking pool
///
/// A panic inside the decoder surfaces as a file-processing failure.
async fn load_text<D>(loader: Arc<D>, path: PathBuf) -> Result<String, FailureReason>
where
    D: DocumentTextLoader + Send + Sync + 'static,
{
    match tokio::task::spawn_blocking(move || loader.load(&path)).await {
        Ok(Ok(pages)) => Ok(aggregate_pages(&pages)),
        Ok(Err(e)) => Err(FailureReason::FileProcessing(e.to_string())),
        Err(e) => Err(FailureReason::FileProcessing(format!(
            "Text extraction crashed: {}",
            e
        ))),
    }
}

async fn extract_record<E: Engine>(
    engine: &E,
    candidate: &Candidate,
    text: &str,
    abort: &AbortSignal,
    filter: WeightFilter,
) -> FileReport {
    match engine.run(text, abort).await {
        Ok(extraction) => {
            let weight = extraction.weight();
            let name = extraction
                .name
                .unwrap_or_else(|| file_stem(&candidate.path));
            let record = ProductRecord::new(name, &candidate.file, extraction.characteristics, weight);
            let verdict = filter.verdict(&record);
            debug!("{}: weight {:?}, {:?}", candidate.file, record.weight_grams, verdict);

            FileReport::extracted(candidate.file.clone(), Some(candidate.fingerprint), record, verdict)
        }
        Err(e) => {
            let outcome = e.outcome();
            match &outcome {
                ExtractionOutcome::Failed(reason) => warn!("{}: {}", candidate.file, reason),
                _ => debug!("{}: {}", candidate.file, outcome.label()),
            }
            candidate.report(outcome)
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_name(path))
}

/// Trip `abort` when Ctrl-C is received
///
/// In-flight calls finish; no new external call starts afterwards.
pub fn abort_on_ctrl_c(abort: AbortSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, finishing in-flight files");
                abort.abort();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {}", e),
        }
    })
}
