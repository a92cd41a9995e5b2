//! Botpress `qnas.json` dataset converter.
//!
//! A QnA export lists intents with their questions per language:
//! ```json
//! {
//!   "qnas": [
//!     {
//!       "id": "__qna__abc_greeting",
//!       "data": { "questions": { "en": ["hi", "hello there"] } }
//!     }
//!   ]
//! }
//! ```
//! Botpress prefixes each id with an 11-character generated tag, which is
//! stripped to get the intent name.

use std::collections::HashMap;

use serde::Deserialize;

use crate::dataset::PhraseDataset;
use crate::document::DatasetConverter;
use crate::error::{Result, UtterscopeError};

/// Length of the generated prefix on Botpress QnA ids.
pub const QNA_ID_PREFIX_LEN: usize = 11;

#[derive(Debug, Deserialize)]
struct QnaExport {
    qnas: Vec<QnaEntry>,
}

#[derive(Debug, Deserialize)]
struct QnaEntry {
    id: String,
    data: QnaData,
}

#[derive(Debug, Deserialize)]
struct QnaData {
    #[serde(default)]
    questions: HashMap<String, Vec<String>>,
}

/// A dataset converter for Botpress QnA exports.
#[derive(Debug, Clone)]
pub struct QnaDatasetConverter {
    /// Language whose questions become phrases.
    language: String,
    /// Characters stripped from the front of each id.
    id_prefix_len: usize,
}

impl Default for QnaDatasetConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl QnaDatasetConverter {
    /// Create a converter reading English questions.
    pub fn new() -> Self {
        QnaDatasetConverter {
            language: "en".to_string(),
            id_prefix_len: QNA_ID_PREFIX_LEN,
        }
    }

    /// Read questions of another language.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = language.into();
        self
    }

    /// Change how many leading id characters are stripped.
    pub fn with_id_prefix_len(mut self, len: usize) -> Self {
        self.id_prefix_len = len;
        self
    }

    fn intent_name(&self, id: &str) -> Result<String> {
        let name: String = id.chars().skip(self.id_prefix_len).collect();
        if name.trim().is_empty() {
            return Err(UtterscopeError::parse(format!(
                "QnA id '{id}' has no intent name after its {}-character prefix",
                self.id_prefix_len
            )));
        }
        Ok(name)
    }
}

impl DatasetConverter for QnaDatasetConverter {
    fn convert(&self, input: &str) -> Result<PhraseDataset> {
        let export: QnaExport = serde_json::from_str(input)
            .map_err(|e| UtterscopeError::parse(format!("Failed to parse QnA export: {e}")))?;

        let mut dataset = PhraseDataset::new();
        for entry in export.qnas {
            let intent = self.intent_name(&entry.id)?;
            match entry.data.questions.get(&self.language) {
                Some(questions) if !questions.is_empty() => {
                    dataset.extend_intent(intent, questions.iter().cloned())?;
                }
                _ => log::warn!(
                    "skipping QnA '{intent}': no '{}' questions",
                    self.language
                ),
            }
        }

        if dataset.is_empty() {
            return Err(UtterscopeError::parse(format!(
                "QnA export has no '{}' questions",
                self.language
            )));
        }

        Ok(dataset)
    }
}
