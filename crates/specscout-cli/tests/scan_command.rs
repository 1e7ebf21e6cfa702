//! Scan command tests: settings in, results file out

use clap::Parser;
use specscout_cli::commands::execute_scan_with;
use specscout_cli::{Cli, CliError, Config, Formatter, RunSettings};
use specscout_domain::{DocumentTextLoader, FileProcessingError};
use std::path::Path;
use tempfile::TempDir;

struct TextLoader;

impl DocumentTextLoader for TextLoader {
    fn load(&self, path: &Path) -> Result<Vec<String>, FileProcessingError> {
        std::fs::read_to_string(path)
            .map(|text| vec![text])
            .map_err(|e| FileProcessingError::new(path, e.to_string()))
    }
}

fn settings(dir: &Path, output: &Path, limit: &str) -> RunSettings {
    let cli = Cli::parse_from([
        "specscout",
        dir.to_str().unwrap(),
        "-w",
        limit,
        "-o",
        output.to_str().unwrap(),
        "--format",
        "json",
        "--no-color",
    ]);
    RunSettings::resolve(&cli, Config::default()).unwrap()
}

#[tokio::test]
async fn test_results_file_written() {
    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("light.pdf"), "Light Patch\nWeight: 45 g\nGain: 5 dBi\n").unwrap();
    std::fs::write(input.path().join("heavy.pdf"), "Heavy Dish\nWeight: 1.2 kg\n").unwrap();
    std::fs::write(input.path().join("readme.txt"), "Weight: 1 g").unwrap();

    let out = TempDir::new().unwrap();
    let output = out.path().join("filtered_products.json");
    let settings = settings(input.path(), &output, "1000");
    let formatter = Formatter::new(settings.format, settings.color);

    let report = execute_scan_with(&settings, TextLoader, &formatter).await.unwrap();
    assert_eq!(report.summary.emitted, 1);
    assert_eq!(report.summary.filtered_out, 1);
    assert_eq!(report.summary.wrong_extension, 1);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        serde_json::json!([{
            "name": "Light Patch",
            "file": "light.pdf",
            "characteristics": [{"Weight": "45 g"}, {"Gain": "5 dBi"}]
        }])
    );
}

#[tokio::test]
async fn test_raising_limit_includes_heavier_product() {
    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("heavy.pdf"), "Heavy Dish\nWeight: 1.2 kg\n").unwrap();

    let out = TempDir::new().unwrap();
    let output = out.path().join("results.json");
    let settings = settings(input.path(), &output, "1500");
    let formatter = Formatter::new(settings.format, false);

    let report = execute_scan_with(&settings, TextLoader, &formatter).await.unwrap();
    assert_eq!(report.records.len(), 1);
    assert!(std::fs::read_to_string(&output).unwrap().contains("Heavy Dish"));
}

#[tokio::test]
async fn test_missing_directory_is_setup_error() {
    let out = TempDir::new().unwrap();
    let missing = out.path().join("no-such-dir");
    let output = out.path().join("results.json");
    let settings = settings(&missing, &output, "1000");
    let formatter = Formatter::new(settings.format, false);

    let result = execute_scan_with(&settings, TextLoader, &formatter).await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
    assert!(!output.exists());
}
