//! Phrase-count distribution across intents.
//!
//! [`analyze`] counts the phrases of every intent and describes the resulting
//! count sequence: population mean, median and standard deviation, a density
//! histogram, and a fitted normal curve sampled at the histogram bin edges.
//! The output carries everything a renderer needs to draw the histogram with
//! its overlaid curve without recomputing any statistic.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::dataset::PhraseDataset;
use crate::error::{Result, UtterscopeError};

/// Factor applied to the fitted normal density so the curve lines up with the
/// density histogram.
pub const CURVE_SCALE: f64 = 2.0;

/// Phrase count of one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCount {
    pub intent: String,
    pub count: usize,
}

/// Per-intent counts and dataset-wide aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentCountSummary {
    /// Counts in dataset order.
    pub counts: Vec<IntentCount>,
    /// Total phrase count.
    pub total: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation, with 0 replaced by 1.
    pub std_dev: f64,
    pub max: usize,
    pub min: usize,
    /// Number of distinct intents.
    pub intents: usize,
}

impl IntentCountSummary {
    /// Counts ordered by descending count, ties by intent identifier.
    pub fn ranked(&self) -> Vec<IntentCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.intent.cmp(&b.intent)));
        ranked
    }

    /// Phrase count of one intent.
    pub fn count_of(&self, intent: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|entry| entry.intent == intent)
            .map(|entry| entry.count)
    }
}

/// Density histogram of the count sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `bins + 1` equally spaced edges.
    pub edges: Vec<f64>,
    /// Number of intents falling into each bin.
    pub frequencies: Vec<usize>,
    /// Bin heights normalized so the histogram integrates to one.
    pub densities: Vec<f64>,
}

impl Histogram {
    pub fn bins(&self) -> usize {
        self.frequencies.len()
    }
}

/// Maximum-likelihood normal fit of the count sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalFit {
    pub mean: f64,
    /// Population (ddof = 0) standard deviation, not remapped.
    pub std_dev: f64,
}

impl NormalFit {
    /// Fit a normal distribution to a sample.
    pub fn fit(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std_dev: population_std_dev(values),
        }
    }

    /// A zero-width fit has no density.
    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= 0.0 || !self.std_dev.is_finite()
    }

    /// Probability density at `x`. Zero for a degenerate fit.
    pub fn pdf(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp() / (self.std_dev * (2.0 * PI).sqrt())
    }
}

/// Complete output of the count distribution analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountDistribution {
    pub summary: IntentCountSummary,
    /// Raw count sequence in dataset order.
    pub counts: Vec<usize>,
    pub histogram: Histogram,
    pub fit: NormalFit,
    /// `CURVE_SCALE * pdf(edge)` for every histogram edge.
    pub curve: Vec<f64>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64;
    variance.max(0.0).sqrt()
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Number of histogram bins: `floor(max / std_dev)`, never less than one.
pub fn bin_count(max: usize, std_dev: f64) -> usize {
    let bins = (max as f64 / std_dev).floor();
    if bins.is_finite() && bins >= 1.0 {
        bins as usize
    } else {
        1
    }
}

/// Build an equal-width density histogram over `[min, max]` of the values.
///
/// A zero-width range is widened by 0.5 on each side. The last bin is closed
/// on the right, the others are half-open.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if values.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut frequencies = vec![0usize; bins];
    for &value in values {
        let mut slot = (((value - lo) / (hi - lo)) * bins as f64) as usize;
        if slot >= bins {
            slot = bins - 1;
        }
        // Floating point division can land one bin off the edge it belongs to.
        if slot > 0 && value < edges[slot] {
            slot -= 1;
        } else if slot + 1 < bins && value >= edges[slot + 1] {
            slot += 1;
        }
        frequencies[slot] += 1;
    }

    let n = values.len() as f64;
    let densities = frequencies
        .iter()
        .zip(edges.windows(2))
        .map(|(&freq, edge)| {
            if n == 0.0 {
                0.0
            } else {
                freq as f64 / (n * (edge[1] - edge[0]))
            }
        })
        .collect();

    Histogram {
        edges,
        frequencies,
        densities,
    }
}

/// Analyze the per-intent phrase count distribution of a dataset.
///
/// Fails with [`UtterscopeError::EmptyDataset`] when the dataset has no
/// intents or no phrases. Intents with zero phrases contribute a count of 0.
pub fn analyze(dataset: &PhraseDataset) -> Result<CountDistribution> {
    if dataset.is_empty() {
        return Err(UtterscopeError::empty_dataset(
            "cannot describe a count distribution without intents",
        ));
    }

    let counts: Vec<IntentCount> = dataset
        .iter()
        .map(|entry| IntentCount {
            intent: entry.intent.clone(),
            count: entry.phrases.len(),
        })
        .collect();
    let raw: Vec<usize> = counts.iter().map(|entry| entry.count).collect();
    let total: usize = raw.iter().sum();
    if total == 0 {
        return Err(UtterscopeError::empty_dataset(format!(
            "{} intents but no phrases",
            counts.len()
        )));
    }

    let values: Vec<f64> = raw.iter().map(|&c| c as f64).collect();
    let max = raw.iter().copied().max().unwrap_or(0);
    let min = raw.iter().copied().min().unwrap_or(0);

    let raw_std_dev = population_std_dev(&values);
    let std_dev = if raw_std_dev == 0.0 { 1.0 } else { raw_std_dev };
    let bins = bin_count(max, std_dev);
    let histogram = histogram(&values, bins);

    let fit = NormalFit::fit(&values);
    let curve = histogram
        .edges
        .iter()
        .map(|&edge| fit.pdf(edge) * CURVE_SCALE)
        .collect();

    let summary = IntentCountSummary {
        intents: counts.len(),
        counts,
        total,
        mean: mean(&values),
        median: median(&values),
        std_dev,
        max,
        min,
    };

    log::debug!(
        "count distribution: {} intents, {} phrases, mean {:.2}, std dev {:.2}, {} bins",
        summary.intents,
        summary.total,
        summary.mean,
        summary.std_dev,
        bins
    );

    Ok(CountDistribution {
        summary,
        counts: raw,
        histogram,
        fit,
        curve,
    })
}
