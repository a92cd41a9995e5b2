//! Per-intent length bias aggregation.
//!
//! Every phrase of an intent is classified with a [`LengthClassifier`] and the
//! category counts are divided by the intent's phrase count, giving a
//! [`BiasVector`] whose three fractions sum to one.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::length::{LengthCategory, LengthClassifier};
use crate::dataset::{IntentPhrases, PhraseDataset};
use crate::error::{Result, UtterscopeError};

/// Fractions of an intent's phrases in each length category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasVector {
    pub keyword: f64,
    pub natural_language: f64,
    pub fluff: f64,
}

impl BiasVector {
    pub fn new(keyword: f64, natural_language: f64, fluff: f64) -> Self {
        Self {
            keyword,
            natural_language,
            fluff,
        }
    }

    /// The perfectly balanced bias, one third per category.
    pub fn balanced() -> Self {
        let third = 1.0 / 3.0;
        Self::new(third, third, third)
    }

    /// Fraction for one category.
    pub fn fraction(&self, category: LengthCategory) -> f64 {
        match category {
            LengthCategory::Keyword => self.keyword,
            LengthCategory::NaturalLanguage => self.natural_language,
            LengthCategory::Fluff => self.fluff,
        }
    }

    /// Fractions in `[keyword, natural_language, fluff]` order.
    pub fn as_array(&self) -> [f64; 3] {
        [self.keyword, self.natural_language, self.fluff]
    }

    /// Sum of the three fractions.
    pub fn total(&self) -> f64 {
        self.keyword + self.natural_language + self.fluff
    }

    /// The category holding the largest fraction. Ties resolve in category order.
    pub fn dominant(&self) -> LengthCategory {
        let mut best = LengthCategory::Keyword;
        for category in LengthCategory::ALL {
            if self.fraction(category) > self.fraction(best) {
                best = category;
            }
        }
        best
    }
}

/// Raw category tallies for one intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub keyword: usize,
    pub natural_language: usize,
    pub fluff: usize,
}

impl CategoryCounts {
    /// Count one classified phrase.
    pub fn record(&mut self, category: LengthCategory) {
        match category {
            LengthCategory::Keyword => self.keyword += 1,
            LengthCategory::NaturalLanguage => self.natural_language += 1,
            LengthCategory::Fluff => self.fluff += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.keyword + self.natural_language + self.fluff
    }

    /// Divide every tally by the total. `None` when nothing was counted.
    pub fn to_bias(&self) -> Option<BiasVector> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let n = total as f64;
        Some(BiasVector::new(
            self.keyword as f64 / n,
            self.natural_language as f64 / n,
            self.fluff as f64 / n,
        ))
    }
}

/// Intent identifier to bias vector, ordered by intent identifier.
pub type BiasMap = BTreeMap<String, BiasVector>;

/// Tally the categories of one intent's phrases.
pub fn count_categories(phrases: &[String], classifier: &LengthClassifier) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for phrase in phrases {
        counts.record(classifier.classify(phrase));
    }
    counts
}

/// Compute the bias vector of every intent with the default classifier.
pub fn aggregate(dataset: &PhraseDataset) -> Result<BiasMap> {
    aggregate_with(dataset, &LengthClassifier::default())
}

/// Compute the bias vector of every intent.
///
/// Fails with [`UtterscopeError::EmptyDataset`] when the dataset has no
/// intents, and with [`UtterscopeError::DegenerateIntent`] naming the first
/// intent (in dataset order) that has no phrases.
pub fn aggregate_with(dataset: &PhraseDataset, classifier: &LengthClassifier) -> Result<BiasMap> {
    if dataset.is_empty() {
        return Err(UtterscopeError::empty_dataset(
            "cannot compute length bias without intents",
        ));
    }

    let tallies: Vec<(&IntentPhrases, CategoryCounts)> = dataset
        .intents()
        .par_iter()
        .map(|entry| (entry, count_categories(&entry.phrases, classifier)))
        .collect();

    // Tallies keep dataset order, so the first degenerate intent is reported.
    let mut biases = BiasMap::new();
    for (entry, counts) in tallies {
        let bias = counts
            .to_bias()
            .ok_or_else(|| UtterscopeError::degenerate_intent(entry.intent.as_str()))?;
        biases.insert(entry.intent.clone(), bias);
    }

    log::debug!(
        "computed length bias for {} intents ({} phrases)",
        biases.len(),
        dataset.phrase_count()
    );

    Ok(biases)
}
