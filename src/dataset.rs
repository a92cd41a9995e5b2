//! Intent-to-phrase datasets.
//!
//! A [`PhraseDataset`] keeps intents in the order they were first seen. The
//! analysis functions only ever borrow a dataset, so one instance can be fed
//! through every analyzer without cloning.

use ahash::AHashMap;

use crate::error::{Result, UtterscopeError};

/// All training phrases that belong to one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentPhrases {
    /// Intent identifier (never empty).
    pub intent: String,
    /// Phrases in input order. Empty strings are kept and count as zero-word phrases.
    pub phrases: Vec<String>,
}

/// An ordered mapping from intent identifier to its phrases.
#[derive(Debug, Clone, Default)]
pub struct PhraseDataset {
    intents: Vec<IntentPhrases>,
    index: AHashMap<String, usize>,
}

impl PartialEq for PhraseDataset {
    fn eq(&self, other: &Self) -> bool {
        self.intents == other.intents
    }
}

impl PhraseDataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(intent, phrase)` rows, grouping rows by intent in
    /// first-appearance order.
    pub fn from_rows<I, K, V>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut dataset = Self::new();
        for (intent, phrase) in rows {
            dataset.add_phrase(intent, phrase)?;
        }
        Ok(dataset)
    }

    /// Build a dataset from whole intents. Repeated intents are merged.
    pub fn from_intents<I, K, P, V>(intents: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut dataset = Self::new();
        for (intent, phrases) in intents {
            dataset.extend_intent(intent, phrases)?;
        }
        Ok(dataset)
    }

    /// Append one phrase to an intent, registering the intent if needed.
    pub fn add_phrase<K: Into<String>, V: Into<String>>(
        &mut self,
        intent: K,
        phrase: V,
    ) -> Result<()> {
        let slot = self.slot(intent.into())?;
        self.intents[slot].phrases.push(phrase.into());
        Ok(())
    }

    /// Append phrases to an intent. An empty `phrases` iterator still registers
    /// the intent, which is how an intent with zero phrases comes to exist.
    pub fn extend_intent<K, P, V>(&mut self, intent: K, phrases: P) -> Result<()>
    where
        K: Into<String>,
        P: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let slot = self.slot(intent.into())?;
        self.intents[slot]
            .phrases
            .extend(phrases.into_iter().map(Into::into));
        Ok(())
    }

    fn slot(&mut self, intent: String) -> Result<usize> {
        if intent.trim().is_empty() {
            return Err(UtterscopeError::parse("intent identifier must not be empty"));
        }
        if let Some(&slot) = self.index.get(&intent) {
            return Ok(slot);
        }
        let slot = self.intents.len();
        self.index.insert(intent.clone(), slot);
        self.intents.push(IntentPhrases {
            intent,
            phrases: Vec::new(),
        });
        Ok(slot)
    }

    /// Phrases of one intent.
    pub fn get(&self, intent: &str) -> Option<&[String]> {
        self.index
            .get(intent)
            .map(|&slot| self.intents[slot].phrases.as_slice())
    }

    /// Number of distinct intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Total number of phrases across all intents.
    pub fn phrase_count(&self) -> usize {
        self.intents.iter().map(|entry| entry.phrases.len()).sum()
    }

    /// Iterate intents in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &IntentPhrases> {
        self.intents.iter()
    }

    pub fn intents(&self) -> &[IntentPhrases] {
        &self.intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_grouped_in_first_seen_order() {
        let dataset = PhraseDataset::from_rows([
            ("greet", "hi"),
            ("bye", "goodbye now friend"),
            ("greet", "hello there"),
        ])
        .unwrap();

        let names: Vec<&str> = dataset.iter().map(|e| e.intent.as_str()).collect();
        assert_eq!(names, vec!["greet", "bye"]);
        assert_eq!(dataset.get("greet").unwrap(), ["hi", "hello there"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.phrase_count(), 3);
    }

    #[test]
    fn test_empty_intent_identifier_rejected() {
        let result = PhraseDataset::from_rows([("", "hi")]);
        assert!(matches!(result, Err(UtterscopeError::Parse(_))));

        let result = PhraseDataset::from_rows([("   ", "hi")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_intent_without_phrases_is_registered() {
        let mut dataset = PhraseDataset::new();
        dataset
            .extend_intent("silent", Vec::<String>::new())
            .unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.phrase_count(), 0);
        assert!(dataset.get("silent").unwrap().is_empty());
    }

    #[test]
    fn test_from_intents_merges_duplicates() {
        let dataset =
            PhraseDataset::from_intents([("a", vec!["x"]), ("b", vec!["y"]), ("a", vec!["z"])])
                .unwrap();
        assert_eq!(dataset.get("a").unwrap(), ["x", "z"]);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_empty_phrase_is_kept() {
        let dataset = PhraseDataset::from_rows([("greet", "")]).unwrap();
        assert_eq!(dataset.get("greet").unwrap(), [""]);
        assert!(dataset.get("missing").is_none());
    }
}
