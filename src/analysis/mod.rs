//! Length-bias and phrase-count analysis of intent datasets.
//!
//! The analysis runs in two independent paths over one [`PhraseDataset`]:
//!
//! - [`distribution`]: phrase counts per intent and their statistical shape;
//! - [`length`] → [`bias`] → [`geometry`]: every phrase is classified by word
//!   count, the categories are aggregated into a bias vector per intent, and
//!   the vectors are mapped to polar points and compared with thresholds.
//!
//! Every function here is pure: inputs are borrowed, nothing is cached, and
//! the same dataset always produces the same report.
//!
//! # Example
//!
//! ```
//! use utterscope::analysis::{DatasetAnalyzer, ThresholdConfig};
//! use utterscope::dataset::PhraseDataset;
//!
//! # fn main() -> utterscope::error::Result<()> {
//! let dataset = PhraseDataset::from_intents([
//!     ("greet", vec!["hi", "hello there", "hi"]),
//!     ("bye", vec!["goodbye now friend"]),
//! ])?;
//!
//! let report = DatasetAnalyzer::new(ThresholdConfig::default()).analyze(&dataset)?;
//! assert_eq!(report.distribution.summary.total, 4);
//! assert_eq!(report.polar.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod bias;
pub mod distribution;
pub mod geometry;
pub mod length;
pub mod threshold;

use serde::{Deserialize, Serialize};

pub use bias::{BiasMap, BiasVector, CategoryCounts};
pub use distribution::{CountDistribution, Histogram, IntentCount, IntentCountSummary, NormalFit};
pub use geometry::{ComplianceRow, ComplianceTable, PolarPoint};
pub use length::{LengthCategory, LengthClassifier};
pub use threshold::{CategoryBounds, ThresholdConfig};

use crate::dataset::PhraseDataset;
use crate::error::Result;

/// Every analysis output for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub distribution: CountDistribution,
    pub biases: BiasMap,
    pub polar: Vec<PolarPoint>,
    pub compliance: ComplianceTable,
    pub thresholds: ThresholdConfig,
}

impl AnalysisReport {
    /// Intents failing at least one category range.
    pub fn failing_intents(&self) -> Vec<&str> {
        self.compliance
            .iter()
            .filter(|(_, row)| !row.passes_all())
            .map(|(intent, _)| intent.as_str())
            .collect()
    }
}

/// Runs the full analysis with one classifier and threshold configuration.
#[derive(Debug, Clone, Default)]
pub struct DatasetAnalyzer {
    classifier: LengthClassifier,
    thresholds: ThresholdConfig,
}

impl DatasetAnalyzer {
    /// Create an analyzer with the default classifier.
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self {
            classifier: LengthClassifier::default(),
            thresholds,
        }
    }

    /// Use a custom length classifier.
    pub fn with_classifier(mut self, classifier: LengthClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier(&self) -> &LengthClassifier {
        &self.classifier
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Count distribution only.
    pub fn distribution(&self, dataset: &PhraseDataset) -> Result<CountDistribution> {
        distribution::analyze(dataset)
    }

    /// Bias vectors only.
    pub fn biases(&self, dataset: &PhraseDataset) -> Result<BiasMap> {
        bias::aggregate_with(dataset, &self.classifier)
    }

    /// Run every analysis.
    ///
    /// Fails when the dataset is empty or any intent has no phrases.
    pub fn analyze(&self, dataset: &PhraseDataset) -> Result<AnalysisReport> {
        let distribution = self.distribution(dataset)?;
        let biases = self.biases(dataset)?;
        let polar = geometry::polar_embedding(&biases);
        let compliance = geometry::compliance_table(&biases, &self.thresholds);

        log::debug!(
            "analysis complete: {} intents, {} failing compliance",
            biases.len(),
            compliance.values().filter(|row| !row.passes_all()).count()
        );

        Ok(AnalysisReport {
            distribution,
            biases,
            polar,
            compliance,
            thresholds: self.thresholds,
        })
    }
}

/// Run every analysis with the default classifier.
pub fn analyze(dataset: &PhraseDataset, thresholds: &ThresholdConfig) -> Result<AnalysisReport> {
    DatasetAnalyzer::new(*thresholds).analyze(dataset)
}
