//! Command line argument parsing for Utterscope CLI using clap.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::length::{DEFAULT_FLUFF_ABOVE, DEFAULT_KEYWORD_BELOW, LengthClassifier};
use crate::analysis::threshold::{CategoryBounds, ThresholdConfig};
use crate::error::Result;

/// Utterscope - data-quality statistics for chatbot training phrases
#[derive(Parser, Debug, Clone)]
#[command(name = "utterscope")]
#[command(about = "Phrase count and length bias statistics for intent training data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct UtterscopeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl UtterscopeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Phrase counts per intent with histogram and fitted normal curve
    Distribution(DistributionArgs),

    /// Keyword / natural language / fluff fractions per intent
    Bias(BiasArgs),

    /// Polar embedding of each intent's length bias
    Polar(BiasArgs),

    /// Pass/fail of each intent's length bias against threshold ranges
    Compliance(ComplianceArgs),

    /// Every analysis, optionally for a training and a testing file
    Report(ReportArgs),
}

/// Input file formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Guess from the file extension (.json is a QnA export, anything else CSV)
    Auto,
    /// CSV with an intent column and a phrase column
    Csv,
    /// Botpress qnas.json export
    Qna,
}

/// Options describing how to read one dataset file.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file format
    #[arg(long = "input-format", default_value = "auto")]
    pub input_format: InputFormat,

    /// CSV column holding the intent
    #[arg(long, default_value = "id")]
    pub intent_column: String,

    /// CSV column holding the phrase (default: first non-intent column)
    #[arg(long)]
    pub phrase_column: Option<String>,

    /// CSV delimiter
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Language of QnA questions to read
    #[arg(long, default_value = "en")]
    pub language: String,
}

impl InputArgs {
    /// The concrete format for a file.
    pub fn format_for(&self, path: &Path) -> InputFormat {
        match self.input_format {
            InputFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::Qna
                } else {
                    InputFormat::Csv
                }
            }
            other => other,
        }
    }
}

/// Word-count boundaries of the length categories.
#[derive(Args, Debug, Clone)]
pub struct ClassifierArgs {
    /// Phrases with fewer words than this are keywords
    #[arg(long, default_value_t = DEFAULT_KEYWORD_BELOW)]
    pub keyword_below: usize,

    /// Phrases with more words than this are fluff
    #[arg(long, default_value_t = DEFAULT_FLUFF_ABOVE)]
    pub fluff_above: usize,
}

impl ClassifierArgs {
    pub fn classifier(&self) -> LengthClassifier {
        LengthClassifier::new()
            .with_keyword_below(self.keyword_below)
            .with_fluff_above(self.fluff_above)
    }
}

/// Ideal length-bias ranges. Flags override values read from the file.
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Threshold configuration file (JSON)
    #[arg(long, value_name = "THRESHOLD_FILE")]
    pub thresholds: Option<PathBuf>,

    /// Ideal minimum keyword bias
    #[arg(long)]
    pub min_keyword: Option<f64>,

    /// Ideal maximum keyword bias
    #[arg(long)]
    pub max_keyword: Option<f64>,

    /// Ideal minimum natural language bias
    #[arg(long)]
    pub min_natural_language: Option<f64>,

    /// Ideal maximum natural language bias
    #[arg(long)]
    pub max_natural_language: Option<f64>,

    /// Ideal minimum fluff bias
    #[arg(long)]
    pub min_fluff: Option<f64>,

    /// Ideal maximum fluff bias
    #[arg(long)]
    pub max_fluff: Option<f64>,
}

impl ThresholdArgs {
    /// Merge the file, the flags and the defaults, then validate.
    pub fn resolve(&self) -> Result<ThresholdConfig> {
        let base = match &self.thresholds {
            Some(path) => ThresholdConfig::from_file(path)?,
            None => ThresholdConfig::default(),
        };

        let merge = |bounds: CategoryBounds, min: Option<f64>, max: Option<f64>| {
            CategoryBounds::new(min.unwrap_or(bounds.min), max.unwrap_or(bounds.max))
        };

        let config = ThresholdConfig {
            keyword: merge(base.keyword, self.min_keyword, self.max_keyword),
            natural_language: merge(
                base.natural_language,
                self.min_natural_language,
                self.max_natural_language,
            ),
            fluff: merge(base.fluff, self.min_fluff, self.max_fluff),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the distribution command
#[derive(Parser, Debug, Clone)]
pub struct DistributionArgs {
    /// Dataset file
    #[arg(value_name = "DATASET_FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the bias and polar commands
#[derive(Parser, Debug, Clone)]
pub struct BiasArgs {
    /// Dataset file
    #[arg(value_name = "DATASET_FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,
}

/// Arguments for the compliance command
#[derive(Parser, Debug, Clone)]
pub struct ComplianceArgs {
    /// Dataset file
    #[arg(value_name = "DATASET_FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Only list intents failing at least one range
    #[arg(long)]
    pub failing_only: bool,
}

/// Arguments for the report command
#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Training dataset file
    #[arg(value_name = "TRAINING_FILE")]
    pub training: PathBuf,

    /// Testing dataset file
    #[arg(long, value_name = "TESTING_FILE")]
    pub testing: Option<PathBuf>,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    Human,
    /// JSON format
    Json,
}
