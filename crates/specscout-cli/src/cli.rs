//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// SpecScout - find products under a weight limit in a folder of PDF datasheets.
#[derive(Debug, Parser)]
#[command(name = "specscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the PDF datasheets
    pub dir: PathBuf,

    /// Maximum product weight in grams (inclusive)
    #[arg(short, long)]
    pub weight_limit: u64,

    /// Stop after the first relevant file
    #[arg(short, long)]
    pub test: bool,

    /// Extraction engine
    #[arg(short, long, value_enum, default_value = "pattern")]
    pub engine: EngineArg,

    /// Number of files processed at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Where to write the JSON results
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API key for the semantic engine
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used by the semantic engine
    #[arg(long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Extraction engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EngineArg {
    /// Regular-expression rules, no network (default)
    Pattern,
    /// Structured-output model call
    Semantic,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Status lines, results and a summary table (default)
    Text,
    /// JSON results only
    Json,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let cli = Cli::parse_from(["specscout", "datasheets", "-w", "1000"]);
        assert_eq!(cli.dir, PathBuf::from("datasheets"));
        assert_eq!(cli.weight_limit, 1000);
        assert_eq!(cli.engine, EngineArg::Pattern);
        assert!(!cli.test);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_full_arguments() {
        let cli = Cli::parse_from([
            "specscout",
            "datasheets",
            "--weight-limit",
            "250",
            "--test",
            "--engine",
            "semantic",
            "--concurrency",
            "8",
            "-o",
            "out.json",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(cli.test);
        assert_eq!(cli.engine, EngineArg::Semantic);
        assert_eq!(cli.concurrency, Some(8));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
    }

    #[test]
    fn test_weight_limit_is_required() {
        assert!(Cli::try_parse_from(["specscout", "datasheets"]).is_err());
        assert!(Cli::try_parse_from(["specscout", "datasheets", "-w", "-5"]).is_err());
    }
}
