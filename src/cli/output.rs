//! Output formatting for CLI commands.
//!
//! JSON output serializes the analysis structures as they are. Human output
//! renders them as aligned tables; compliance flags become ✅ / 🚫 here and
//! nowhere else.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::geometry::AXIS_TICKS;
use crate::analysis::{
    AnalysisReport, BiasMap, ComplianceTable, CountDistribution, LengthCategory, PolarPoint,
    ThresholdConfig,
};
use crate::cli::args::{OutputFormat, UtterscopeArgs};
use crate::error::Result;

/// Glyph for a range that is met.
pub const PASS_GLYPH: &str = "✅";
/// Glyph for a range that is missed.
pub const FAIL_GLYPH: &str = "🚫";

const BAR_WIDTH: usize = 40;

/// Result structure for the bias command.
#[derive(Debug, Serialize, Deserialize)]
pub struct BiasResults {
    pub biases: BiasMap,
}

/// Result structure for the polar command.
#[derive(Debug, Serialize, Deserialize)]
pub struct PolarResults {
    pub points: Vec<PolarPoint>,
    /// `(degrees, label)` ticks of the angular axis.
    pub axis_ticks: Vec<(f64, String)>,
}

impl PolarResults {
    pub fn new(points: Vec<PolarPoint>) -> Self {
        Self {
            points,
            axis_ticks: AXIS_TICKS
                .iter()
                .map(|(degrees, label)| (*degrees, label.to_string()))
                .collect(),
        }
    }
}

/// Result structure for the compliance command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComplianceResults {
    pub thresholds: ThresholdConfig,
    pub rows: ComplianceTable,
}

/// One labelled dataset report.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetReport {
    pub label: String,
    pub report: AnalysisReport,
}

/// Result structure for the report command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResults {
    pub reports: Vec<DatasetReport>,
}

/// Types with a human-readable rendering.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> Result<()>;
}

/// Output a result in the specified format.
pub fn output_result<T, W>(
    message: &str,
    result: &T,
    args: &UtterscopeArgs,
    out: &mut W,
) -> Result<()>
where
    T: Serialize + HumanOutput,
    W: Write,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args, out),
        OutputFormat::Json => output_json(result, args, out),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput, W: Write>(
    message: &str,
    result: &T,
    args: &UtterscopeArgs,
    out: &mut W,
) -> Result<()> {
    if args.verbosity() > 0 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }
    result.write_human(out)
}

/// Output in JSON format.
fn output_json<T: Serialize, W: Write>(
    result: &T,
    args: &UtterscopeArgs,
    out: &mut W,
) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn glyph(pass: bool) -> &'static str {
    if pass { PASS_GLYPH } else { FAIL_GLYPH }
}

fn intent_width<'a, I: Iterator<Item = &'a String>>(intents: I) -> usize {
    intents.map(|intent| intent.chars().count()).max().unwrap_or(0).max("Intent".len())
}

fn write_title(out: &mut dyn Write, title: &str) -> Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "═".repeat(title.chars().count()))?;
    Ok(())
}

impl HumanOutput for CountDistribution {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        let summary = &self.summary;
        let ranked = summary.ranked();
        let width = intent_width(ranked.iter().map(|entry| &entry.intent));

        write_title(out, "Training phrases per intent")?;
        for entry in &ranked {
            writeln!(out, "{:<width$}  {:>6}", entry.intent, entry.count)?;
        }
        writeln!(out)?;

        writeln!(out, "Total: {}", summary.total)?;
        writeln!(out, "Mean: {:.2}", summary.mean)?;
        writeln!(out, "Median: {}", summary.median)?;
        writeln!(out, "Size: {}", summary.intents)?;
        writeln!(out, "St Dev: {:.2}", summary.std_dev)?;
        writeln!(out)?;

        write_title(out, "Distribution of training phrases per intent")?;
        let peak = self
            .histogram
            .densities
            .iter()
            .copied()
            .fold(0.0f64, f64::max);
        for (i, density) in self.histogram.densities.iter().enumerate() {
            let lo = self.histogram.edges[i];
            let hi = self.histogram.edges[i + 1];
            let bar = if peak > 0.0 {
                ((density / peak) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            writeln!(
                out,
                "[{lo:>8.2}, {hi:>8.2}{}  {density:.4}  {}",
                if i + 1 == self.histogram.bins() { "]" } else { ")" },
                "█".repeat(bar)
            )?;
        }
        writeln!(out)?;

        writeln!(
            out,
            "Distribution curve (normal fit: mean {:.2}, std dev {:.2}):",
            self.fit.mean, self.fit.std_dev
        )?;
        for (edge, value) in self.histogram.edges.iter().zip(&self.curve) {
            writeln!(out, "  x = {edge:>8.2}  y = {value:.4}")?;
        }
        Ok(())
    }
}

impl HumanOutput for BiasResults {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        let width = intent_width(self.biases.keys());
        write_title(out, "Length bias by intent")?;
        writeln!(
            out,
            "{:<width$}  {:>10}  {:>18}  {:>8}",
            "Intent", "Keywords %", "Natural Language %", "Fluff %"
        )?;
        for (intent, bias) in &self.biases {
            writeln!(
                out,
                "{:<width$}  {:>10.1}  {:>18.1}  {:>8.1}",
                intent,
                bias.keyword * 100.0,
                bias.natural_language * 100.0,
                bias.fluff * 100.0
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for PolarResults {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        let width = intent_width(self.points.iter().map(|point| &point.intent));
        write_title(out, "Distribution of length bias in intents")?;
        let ticks: Vec<String> = self
            .axis_ticks
            .iter()
            .map(|(degrees, label)| format!("{label} {degrees}°"))
            .collect();
        writeln!(out, "Axes: {}", ticks.join(", "))?;
        writeln!(out, "{:<width$}  {:>8}  {:>9}", "Intent", "Radius", "Angle (°)")?;
        for point in &self.points {
            writeln!(
                out,
                "{:<width$}  {:>8.4}  {:>9.2}",
                point.intent,
                point.radius,
                point.angle_degrees()
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for ComplianceResults {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        let width = intent_width(self.rows.keys());
        write_title(out, "Length distribution pass/fail by intent")?;
        for category in LengthCategory::ALL {
            let bounds = self.thresholds.bounds(category);
            writeln!(out, "{category}: {:.2} - {:.2}", bounds.min, bounds.max)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{:<width$}  {}  {}  {}",
            "Intent",
            LengthCategory::Keyword,
            LengthCategory::NaturalLanguage,
            LengthCategory::Fluff
        )?;
        for (intent, row) in &self.rows {
            writeln!(
                out,
                "{:<width$}  {:^8}  {:^16}  {:^5}",
                intent,
                glyph(row.keyword),
                glyph(row.natural_language),
                glyph(row.fluff)
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for ReportResults {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        for (i, dataset) in self.reports.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "## {}", dataset.label)?;
            writeln!(out)?;
            let report = &dataset.report;
            report.distribution.write_human(out)?;
            writeln!(out)?;
            BiasResults {
                biases: report.biases.clone(),
            }
            .write_human(out)?;
            writeln!(out)?;
            PolarResults::new(report.polar.clone()).write_human(out)?;
            writeln!(out)?;
            ComplianceResults {
                thresholds: report.thresholds,
                rows: report.compliance.clone(),
            }
            .write_human(out)?;
        }
        Ok(())
    }
}
