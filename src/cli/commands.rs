//! Command implementations for Utterscope CLI.

use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::analysis::{DatasetAnalyzer, bias, distribution, geometry};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::PhraseDataset;
use crate::document::{CsvDatasetConverter, DatasetConverter, QnaDatasetConverter};
use crate::error::Result;

/// Label of the training dataset in reports.
pub const TRAINING_LABEL: &str = "Training Data";
/// Label of the testing dataset in reports.
pub const TESTING_LABEL: &str = "Testing Data";

/// Execute a CLI command, writing to standard output.
pub fn execute_command(args: UtterscopeArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_command_to(args, &mut out)
}

/// Execute a CLI command, writing to `out`.
pub fn execute_command_to<W: Write>(args: UtterscopeArgs, out: &mut W) -> Result<()> {
    match &args.command {
        Command::Distribution(dist_args) => show_distribution(dist_args, &args, out),
        Command::Bias(bias_args) => show_bias(bias_args, &args, out),
        Command::Polar(bias_args) => show_polar(bias_args, &args, out),
        Command::Compliance(compliance_args) => show_compliance(compliance_args, &args, out),
        Command::Report(report_args) => show_report(report_args, &args, out),
    }
}

/// Read one dataset file in the configured format.
pub fn load_dataset(path: &Path, input: &InputArgs) -> Result<PhraseDataset> {
    let loaded = match input.format_for(path) {
        InputFormat::Qna => QnaDatasetConverter::new()
            .with_language(input.language.as_str())
            .convert_file(path),
        _ => {
            let mut converter = CsvDatasetConverter::new()
                .with_intent_column(input.intent_column.as_str())
                .with_delimiter(input.delimiter);
            if let Some(column) = &input.phrase_column {
                converter = converter.with_phrase_column(column.as_str());
            }
            converter.convert_file(path)
        }
    };

    let dataset =
        loaded.with_context(|| format!("failed to load dataset from {}", path.display()))?;
    Ok(dataset)
}

/// Show the phrase count distribution.
fn show_distribution<W: Write>(
    args: &DistributionArgs,
    cli_args: &UtterscopeArgs,
    out: &mut W,
) -> Result<()> {
    let dataset = load_dataset(&args.file, &args.input)?;
    let result = distribution::analyze(&dataset)?;
    output_result("Phrase count distribution", &result, cli_args, out)
}

/// Show the length bias of every intent.
fn show_bias<W: Write>(args: &BiasArgs, cli_args: &UtterscopeArgs, out: &mut W) -> Result<()> {
    let dataset = load_dataset(&args.file, &args.input)?;
    let biases = bias::aggregate_with(&dataset, &args.classifier.classifier())?;
    output_result("Length bias", &BiasResults { biases }, cli_args, out)
}

/// Show the polar embedding of every intent.
fn show_polar<W: Write>(args: &BiasArgs, cli_args: &UtterscopeArgs, out: &mut W) -> Result<()> {
    let dataset = load_dataset(&args.file, &args.input)?;
    let biases = bias::aggregate_with(&dataset, &args.classifier.classifier())?;
    let result = PolarResults::new(geometry::polar_embedding(&biases));
    output_result("Polar embedding of length bias", &result, cli_args, out)
}

/// Show the compliance table.
fn show_compliance<W: Write>(
    args: &ComplianceArgs,
    cli_args: &UtterscopeArgs,
    out: &mut W,
) -> Result<()> {
    let thresholds = args.thresholds.resolve()?;
    let dataset = load_dataset(&args.file, &args.input)?;
    let biases = bias::aggregate_with(&dataset, &args.classifier.classifier())?;

    let mut rows = geometry::compliance_table(&biases, &thresholds);
    if args.failing_only {
        rows.retain(|_, row| !row.passes_all());
    }

    output_result(
        "Length distribution tests per intent",
        &ComplianceResults { thresholds, rows },
        cli_args,
        out,
    )
}

/// Run every analysis on the training file and, if given, the testing file.
fn show_report<W: Write>(args: &ReportArgs, cli_args: &UtterscopeArgs, out: &mut W) -> Result<()> {
    let thresholds = args.thresholds.resolve()?;
    let analyzer = DatasetAnalyzer::new(thresholds).with_classifier(args.classifier.classifier());

    let mut inputs = vec![(TRAINING_LABEL, args.training.as_path())];
    if let Some(testing) = &args.testing {
        inputs.push((TESTING_LABEL, testing.as_path()));
    }

    let mut reports = Vec::with_capacity(inputs.len());
    for (label, path) in inputs {
        let dataset = load_dataset(path, &args.input)?;
        let report = analyzer
            .analyze(&dataset)
            .with_context(|| format!("failed to analyze {}", path.display()))?;
        reports.push(DatasetReport {
            label: label.to_string(),
            report,
        });
    }

    output_result("Dataset report", &ReportResults { reports }, cli_args, out)
}
