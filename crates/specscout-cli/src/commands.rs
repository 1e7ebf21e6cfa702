//! Scan command implementation.

use crate::cli::EngineArg;
use crate::config::{OutputFormat, RunSettings};
use crate::error::{CliError, Result};
use crate::output::{records_json, write_results, Formatter};
use specscout_domain::DocumentTextLoader;
use specscout_extractor::{Engine, PatternExtractor, SemanticExtractor};
use specscout_llm::GeminiProvider;
use specscout_scanner::{abort_on_ctrl_c, PdfTextLoader, ScanOrchestrator, ScanReport};
use std::time::Duration;
use tracing::info;

/// Execute the scan command with PDF text extraction.
pub async fn execute_scan(settings: &RunSettings, formatter: &Formatter) -> Result<ScanReport> {
    execute_scan_with(settings, PdfTextLoader::new(), formatter).await
}

/// Execute the scan command with a given text loader.
///
/// Builds the configured engine, scans, writes the results file and prints
/// the report.
pub async fn execute_scan_with<D>(settings: &RunSettings, loader: D, formatter: &Formatter) -> Result<ScanReport>
where
    D: DocumentTextLoader + Send + Sync + 'static,
{
    if !settings.dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a directory",
            settings.dir.display()
        )));
    }

    let report = match settings.engine {
        EngineArg::Pattern => scan(PatternExtractor::new(), loader, settings).await?,
        EngineArg::Semantic => {
            let api_key = settings.llm.api_key.clone().ok_or(CliError::MissingApiKey)?;
            let provider = GeminiProvider::with_endpoint(
                settings.llm.endpoint.clone(),
                api_key,
                settings.llm.model.clone(),
                // Socket bound only; the extractor times each call itself
                settings.extractor.call_timeout() + Duration::from_secs(5),
            )?;
            let engine = SemanticExtractor::new(provider, settings.extractor.clone())?;
            scan(engine, loader, settings).await?
        }
    };

    let json = records_json(&report.records)?;
    write_results(&settings.output_path, &json)?;
    info!(
        "Wrote {} record(s) to {}",
        report.records.len(),
        settings.output_path.display()
    );

    print_report(&report, &json, settings, formatter);
    Ok(report)
}

async fn scan<E, D>(engine: E, loader: D, settings: &RunSettings) -> Result<ScanReport>
where
    E: Engine + 'static,
    D: DocumentTextLoader + Send + Sync + 'static,
{
    let orchestrator = ScanOrchestrator::new(engine, loader, settings.scan.clone())?;
    let ctrl_c = abort_on_ctrl_c(orchestrator.abort_signal());
    let report = orchestrator.run(&settings.dir).await;
    ctrl_c.abort();
    Ok(report?)
}

fn print_report(report: &ScanReport, json: &str, settings: &RunSettings, formatter: &Formatter) {
    if formatter.format() == OutputFormat::Json {
        println!("{}", json);
        return;
    }

    for file in &report.files {
        println!("{}", formatter.file_line(file));
    }
    println!();
    println!("{}", json);
    println!();
    println!("{}", formatter.summary_table(&report.summary));
    if let Some(failures) = formatter.failures(&report.summary) {
        println!("{}", failures);
    }

    let saved = format!(
        "{} product(s) within {} g saved to {}",
        report.records.len(),
        settings.scan.weight_limit_grams,
        settings.output_path.display()
    );
    if report.records.is_empty() {
        println!("{}", formatter.warning(&saved));
    } else {
        println!("{}", formatter.info(&saved));
    }
}
