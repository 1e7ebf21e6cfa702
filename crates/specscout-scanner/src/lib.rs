//! SpecScout Scanner
//!
//! Walks a directory of PDF datasheets, skips duplicates, runs one extraction
//! engine over each unique file and keeps the products whose weight does not
//! exceed a limit.
//!
//! # Overview
//!
//! The scanner is responsible for:
//! - **Discovery**: regular files directly inside the input directory
//! - **Dedup**: SHA-256 content fingerprints, first file in name order wins
//! - **Loading**: per-page PDF text via `pdf-extract`, off the async runtime
//! - **Orchestration**: a bounded worker pool with a run-level abort signal
//! - **Filtering and totals**: weight threshold, per-file reports, run summary
//!
//! # Per-file flow
//!
//! ```text
//! Pending ─┬─ wrong extension ─────────────► Skipped
//!          ├─ duplicate fingerprint ───────► Skipped
//!          └─ load text ─► engine ─► normalize ─┬─ within limit ──► Emitted
//!                │            │                 └─ over / none ───► FilteredOut
//!                └────────────┴──────── error ─────────────────────► Failed / Skipped
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use specscout_extractor::PatternExtractor;
//! use specscout_scanner::{abort_on_ctrl_c, PdfTextLoader, ScanConfig, ScanOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = ScanOrchestrator::new(
//!         PatternExtractor::new(),
//!         PdfTextLoader::new(),
//!         ScanConfig::new(1_000).with_concurrency(8),
//!     )?;
//!     abort_on_ctrl_c(orchestrator.abort_signal());
//!
//!     let report = orchestrator.run("datasheets".as_ref()).await?;
//!     for record in &report.records {
//!         println!("{} ({})", record.name, record.source_file);
//!     }
//!     println!("\n{}", report.summary.summary());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod discovery;
mod error;
mod filter;
mod fingerprint;
mod loader;
mod orchestrator;
mod summary;

pub use config::{ScanConfig, DEFAULT_CONCURRENCY};
pub use discovery::{discover, is_pdf, PDF_EXTENSION};
pub use error::ScanError;
pub use filter::{FilterVerdict, WeightFilter};
pub use fingerprint::{fingerprint, fingerprint_file, ContentFingerprinter, CHUNK_SIZE};
pub use loader::{aggregate_pages, PdfTextLoader};
pub use orchestrator::{abort_on_ctrl_c, ScanOrchestrator};
pub use summary::{FileReport, ScanReport, ScanSummary};
