//! Word-count classification of single phrases.
//!
//! Phrases are split on whitespace and bucketed by word count `n`:
//!
//! | Category           | Word count       |
//! |--------------------|------------------|
//! | `Keyword`          | `n < 4`          |
//! | `NaturalLanguage`  | `4 <= n <= 12`   |
//! | `Fluff`            | `n > 12`         |
//!
//! The lower Natural Language bound is 4, so every word count maps to exactly
//! one category. An empty phrase has zero words and is a `Keyword`.

use serde::{Deserialize, Serialize};

/// Phrases with fewer words than this are keywords.
pub const DEFAULT_KEYWORD_BELOW: usize = 4;

/// Phrases with more words than this are fluff.
pub const DEFAULT_FLUFF_ABOVE: usize = 12;

/// Length-based style of a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthCategory {
    /// Short, keyword-style phrase.
    Keyword,
    /// Sentence-length phrase.
    NaturalLanguage,
    /// Long, padded phrase.
    Fluff,
}

impl LengthCategory {
    /// All categories in bias-vector order.
    pub const ALL: [LengthCategory; 3] = [
        LengthCategory::Keyword,
        LengthCategory::NaturalLanguage,
        LengthCategory::Fluff,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LengthCategory::Keyword => "Keywords",
            LengthCategory::NaturalLanguage => "Natural Language",
            LengthCategory::Fluff => "Fluff",
        }
    }

    /// Position of this category inside a bias vector.
    pub fn index(&self) -> usize {
        match self {
            LengthCategory::Keyword => 0,
            LengthCategory::NaturalLanguage => 1,
            LengthCategory::Fluff => 2,
        }
    }
}

impl std::fmt::Display for LengthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of whitespace-separated words in a phrase.
pub fn word_count(phrase: &str) -> usize {
    phrase.split_whitespace().count()
}

/// Classifies phrases by word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthClassifier {
    /// Word counts strictly below this value are `Keyword`.
    pub keyword_below: usize,
    /// Word counts strictly above this value are `Fluff`.
    pub fluff_above: usize,
}

impl Default for LengthClassifier {
    fn default() -> Self {
        Self {
            keyword_below: DEFAULT_KEYWORD_BELOW,
            fluff_above: DEFAULT_FLUFF_ABOVE,
        }
    }
}

impl LengthClassifier {
    /// Create a classifier with the default 4 / 12 boundaries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyword boundary.
    pub fn with_keyword_below(mut self, keyword_below: usize) -> Self {
        self.keyword_below = keyword_below;
        self
    }

    /// Set the fluff boundary.
    pub fn with_fluff_above(mut self, fluff_above: usize) -> Self {
        self.fluff_above = fluff_above;
        self
    }

    /// Classify a word count.
    pub fn classify_count(&self, words: usize) -> LengthCategory {
        if words < self.keyword_below {
            LengthCategory::Keyword
        } else if words > self.fluff_above {
            LengthCategory::Fluff
        } else {
            LengthCategory::NaturalLanguage
        }
    }

    /// Classify a phrase.
    pub fn classify(&self, phrase: &str) -> LengthCategory {
        self.classify_count(word_count(phrase))
    }
}

/// Classify a phrase with the default boundaries.
pub fn classify(phrase: &str) -> LengthCategory {
    LengthClassifier::default().classify(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_phrases() {
        assert_eq!(classify("a b c"), LengthCategory::Keyword);
        assert_eq!(classify("a b c d e"), LengthCategory::NaturalLanguage);
        assert_eq!(
            classify("a b c d e f g h i j k l m"),
            LengthCategory::Fluff
        );
    }

    #[test]
    fn test_boundaries() {
        let classifier = LengthClassifier::new();
        assert_eq!(classifier.classify_count(3), LengthCategory::Keyword);
        // Four words is the first natural language count; there is no gap.
        assert_eq!(classifier.classify_count(4), LengthCategory::NaturalLanguage);
        assert_eq!(classifier.classify_count(12), LengthCategory::NaturalLanguage);
        assert_eq!(classifier.classify_count(13), LengthCategory::Fluff);
        assert_eq!(classify("one two three four"), LengthCategory::NaturalLanguage);
    }

    #[test]
    fn test_empty_and_blank_phrases_are_keywords() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \t "), 0);
        assert_eq!(classify(""), LengthCategory::Keyword);
        assert_eq!(classify("  "), LengthCategory::Keyword);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(word_count("a  b\tc\nd"), 4);
        assert_eq!(word_count("  leading and trailing  "), 3);
    }

    #[test]
    fn test_custom_boundaries() {
        let classifier = LengthClassifier::new()
            .with_keyword_below(2)
            .with_fluff_above(5);
        assert_eq!(classifier.classify("one"), LengthCategory::Keyword);
        assert_eq!(classifier.classify("one two"), LengthCategory::NaturalLanguage);
        assert_eq!(classifier.classify("a b c d e f"), LengthCategory::Fluff);
    }

    #[test]
    fn test_category_order_and_labels() {
        for (i, category) in LengthCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        assert_eq!(LengthCategory::NaturalLanguage.to_string(), "Natural Language");
    }
}
