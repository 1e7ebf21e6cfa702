//! Configuration management for the CLI.
//!
//! Values come from, in order of precedence: command-line flags, environment
//! variables (`GEMINI_API_KEY`, `GEMINI_MODEL`, `.env` honoured), the config
//! file and built-in defaults.

use crate::cli::{Cli, EngineArg};
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use specscout_extractor::ExtractorConfig;
use specscout_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use specscout_scanner::{ScanConfig, DEFAULT_CONCURRENCY};
use std::fs;
use std::path::{Path, PathBuf};

/// Default results file, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "filtered_products.json";

/// CLI configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Model client settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Semantic extractor tuning
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Scan settings
    #[serde(default)]
    pub scan: ScanSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Model client settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key (the environment takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Scan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Number of files processed at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Results file
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Status lines, results and a summary table
    Text,
    /// JSON results only
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".specscout").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// missing the built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::Config(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => {
                let path = Self::path()?;
                if path.is_file() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.extractor.validate().map_err(CliError::Config)?;
        if config.scan.concurrency == 0 {
            return Err(CliError::Config("scan.concurrency must be greater than 0".into()));
        }
        Ok(config)
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            color: true,
            format: OutputFormat::Text,
        }
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

/// Model settings after precedence has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLlm {
    /// Model name
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// API key, if any source supplied one
    pub api_key: Option<String>,
}

/// Everything one run needs, with precedence applied.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Input directory
    pub dir: PathBuf,
    /// Selected engine
    pub engine: EngineArg,
    /// Scan settings
    pub scan: ScanConfig,
    /// Semantic extractor tuning
    pub extractor: ExtractorConfig,
    /// Model settings
    pub llm: ResolvedLlm,
    /// Results file
    pub output_path: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Whether to color terminal output
    pub color: bool,
}

impl RunSettings {
    /// Merge command-line arguments over the config file.
    ///
    /// # Errors
    ///
    /// Returns `CliError::MissingApiKey` when the semantic engine is selected
    /// and no source supplies a key, and `CliError::Config` for invalid
    /// combined settings.
    pub fn resolve(cli: &Cli, config: Config) -> Result<Self> {
        let present = |key: &String| !key.trim().is_empty();
        let api_key = cli
            .api_key
            .clone()
            .filter(present)
            .or_else(|| config.llm.api_key.filter(present));

        if cli.engine == EngineArg::Semantic && api_key.is_none() {
            return Err(CliError::MissingApiKey);
        }

        let scan = ScanConfig::new(cli.weight_limit)
            .with_test_mode(cli.test)
            .with_concurrency(cli.concurrency.unwrap_or(config.scan.concurrency));
        scan.validate().map_err(CliError::Config)?;

        Ok(Self {
            dir: cli.dir.clone(),
            engine: cli.engine,
            scan,
            extractor: config.extractor,
            llm: ResolvedLlm {
                model: cli
                    .model
                    .clone()
                    .or(config.llm.model)
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                endpoint: config.llm.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                api_key,
            },
            output_path: cli.output.clone().unwrap_or(config.output.path),
            format: cli.format.map(Into::into).unwrap_or(config.output.format),
            color: !cli.no_color && config.output.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["specscout", "sheets", "-w", "1000", "--api-key", ""];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.output.color);
        assert_eq!(config.output.path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.scan.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.extractor, ExtractorConfig::default());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::from_toml(
            r#"
            [llm]
            model = "gemini-1.5-pro"
            api_key = "from-file"

            [extractor]
            max_prompt_chars = 4000

            [extractor.retry]
            max_attempts = 3

            [output]
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.extractor.max_prompt_chars, 4000);
        assert_eq!(config.extractor.retry.max_attempts, 3);
        assert_eq!(config.extractor.call_timeout_secs, ExtractorConfig::default().call_timeout_secs);
        assert!(!config.output.color);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_file_rejected() {
        assert!(matches!(
            Config::from_toml("[extractor]\nmax_prompt_chars = 0\n"),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("[scan]\nconcurrency = 0\n"),
            Err(CliError::Config(_))
        ));
        assert!(matches!(Config::from_toml("[output\n"), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\npath = \"results.json\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output.path, PathBuf::from("results.json"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = Config::default();
        config.output.path = PathBuf::from("file.json");
        config.output.format = OutputFormat::Json;
        config.llm.model = Some("file-model".into());
        config.scan.concurrency = 2;

        let settings = RunSettings::resolve(
            &cli(&["-o", "flag.json", "--format", "text", "--model", "flag-model", "--concurrency", "6"]),
            config,
        )
        .unwrap();

        assert_eq!(settings.output_path, PathBuf::from("flag.json"));
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.llm.model, "flag-model");
        assert_eq!(settings.scan.concurrency, 6);
    }

    #[test]
    fn test_file_fills_missing_flags() {
        let mut config = Config::default();
        config.llm.api_key = Some("file-key".into());
        config.llm.endpoint = Some("http://localhost:9000".into());
        config.scan.concurrency = 3;

        let settings = RunSettings::resolve(&cli(&["--engine", "semantic"]), config).unwrap();
        assert_eq!(settings.llm.api_key.as_deref(), Some("file-key"));
        assert_eq!(settings.llm.endpoint, "http://localhost:9000");
        assert_eq!(settings.scan.concurrency, 3);
        assert!(settings.color);
    }

    #[test]
    fn test_semantic_requires_key() {
        let result = RunSettings::resolve(&cli(&["--engine", "semantic"]), Config::default());
        assert!(matches!(result, Err(CliError::MissingApiKey)));

        let pattern = RunSettings::resolve(&cli(&[]), Config::default()).unwrap();
        assert!(pattern.llm.api_key.is_none());
        assert_eq!(pattern.llm.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_no_color_flag_wins() {
        let settings = RunSettings::resolve(&cli(&["--no-color"]), Config::default()).unwrap();
        assert!(!settings.color);
    }

    #[test]
    fn test_invalid_concurrency_flag() {
        let result = RunSettings::resolve(&cli(&["--concurrency", "0"]), Config::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
