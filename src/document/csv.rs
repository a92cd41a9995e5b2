//! CSV format dataset converter.
//!
//! The first row holds column names. One column names the intent and another
//! holds the phrase; every other column is ignored:
//! ```csv
//! id,phrase
//! greet,hi
//! greet,hello there
//! bye,goodbye now friend
//! ```

use csv::ReaderBuilder;

use crate::dataset::PhraseDataset;
use crate::document::DatasetConverter;
use crate::error::{Result, UtterscopeError};

/// Default name of the intent column.
pub const DEFAULT_INTENT_COLUMN: &str = "id";

/// A dataset converter for CSV format.
///
/// Rows are grouped by intent in first-appearance order. When no phrase
/// column is configured, the first column other than the intent column is
/// used.
#[derive(Debug, Clone)]
pub struct CsvDatasetConverter {
    /// Header of the intent column.
    intent_column: String,
    /// Header of the phrase column (optional).
    phrase_column: Option<String>,
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
    /// Whether to allow flexible field counts
    flexible: bool,
}

impl Default for CsvDatasetConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetConverter {
    /// Create a new CSV converter reading the `id` column as the intent.
    pub fn new() -> Self {
        CsvDatasetConverter {
            intent_column: DEFAULT_INTENT_COLUMN.to_string(),
            phrase_column: None,
            delimiter: b',',
            trim: true,
            flexible: false,
        }
    }

    /// Set the intent column header.
    pub fn with_intent_column<S: Into<String>>(mut self, column: S) -> Self {
        self.intent_column = column.into();
        self
    }

    /// Set the phrase column header.
    pub fn with_phrase_column<S: Into<String>>(mut self, column: S) -> Self {
        self.phrase_column = Some(column.into());
        self
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether to allow flexible field counts.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    fn column_positions(&self, headers: &csv::StringRecord) -> Result<(usize, usize)> {
        let intent = headers
            .iter()
            .position(|h| h == self.intent_column)
            .ok_or_else(|| {
                UtterscopeError::parse(format!(
                    "CSV header has no intent column '{}'",
                    self.intent_column
                ))
            })?;

        let phrase = match &self.phrase_column {
            Some(name) => headers.iter().position(|h| h == name).ok_or_else(|| {
                UtterscopeError::parse(format!("CSV header has no phrase column '{name}'"))
            })?,
            None => (0..headers.len()).find(|&i| i != intent).ok_or_else(|| {
                UtterscopeError::parse("CSV header needs a phrase column besides the intent")
            })?,
        };

        Ok((intent, phrase))
    }
}

impl DatasetConverter for CsvDatasetConverter {
    fn convert(&self, input: &str) -> Result<PhraseDataset> {
        let trim = if self.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(trim)
            .flexible(self.flexible)
            .from_reader(input.as_bytes());

        let headers = reader.headers()?.clone();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(UtterscopeError::parse("CSV header is empty"));
        }

        let (intent_pos, phrase_pos) = self.column_positions(&headers)?;
        let mut dataset = PhraseDataset::new();

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            // Header is line 1.
            let line = row + 2;

            let intent = record.get(intent_pos).unwrap_or_default();
            if intent.trim().is_empty() {
                return Err(UtterscopeError::parse(format!(
                    "CSV line {line}: intent is empty"
                )));
            }
            let phrase = record.get(phrase_pos).unwrap_or_default();
            dataset.add_phrase(intent, phrase)?;
        }

        if dataset.is_empty() {
            return Err(UtterscopeError::parse(
                "CSV has only header, no data rows to convert",
            ));
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_basic_parsing() {
        let converter = CsvDatasetConverter::new();
        let csv = "id,phrase\ngreet,hi\nbye,goodbye now friend\ngreet,hello there";
        let dataset = converter.convert(csv).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("greet").unwrap(), ["hi", "hello there"]);
        assert_eq!(dataset.get("bye").unwrap(), ["goodbye now friend"]);
    }

    #[test]
    fn test_csv_phrase_column_defaults_to_first_other_column() {
        let converter = CsvDatasetConverter::new();
        let csv = "utterance,id,source\nhello,greet,web\nbye now,bye,app";
        let dataset = converter.convert(csv).unwrap();

        assert_eq!(dataset.get("greet").unwrap(), ["hello"]);
        assert_eq!(dataset.get("bye").unwrap(), ["bye now"]);
    }

    #[test]
    fn test_csv_named_columns() {
        let converter = CsvDatasetConverter::new()
            .with_intent_column("intent")
            .with_phrase_column("text");
        let csv = "lang,text,intent\nen,hi,greet\nen,order a pizza,order";
        let dataset = converter.convert(csv).unwrap();

        assert_eq!(dataset.get("order").unwrap(), ["order a pizza"]);
    }

    #[test]
    fn test_csv_quoted_fields() {
        let converter = CsvDatasetConverter::new();
        let csv = r#"id,phrase
greet,"hi, how are you""#;
        let dataset = converter.convert(csv).unwrap();

        assert_eq!(dataset.get("greet").unwrap(), ["hi, how are you"]);
    }

    #[test]
    fn test_csv_empty_phrase_kept() {
        let converter = CsvDatasetConverter::new();
        let dataset = converter.convert("id,phrase\ngreet,\ngreet,hi").unwrap();
        assert_eq!(dataset.get("greet").unwrap(), ["", "hi"]);
    }

    #[test]
    fn test_csv_custom_delimiter() {
        let converter = CsvDatasetConverter::new().with_delimiter('\t');
        let dataset = converter.convert("id\tphrase\ngreet\thello there").unwrap();
        assert_eq!(dataset.get("greet").unwrap(), ["hello there"]);
    }

    #[test]
    fn test_csv_with_trim() {
        let converter = CsvDatasetConverter::new().with_trim(true);
        let dataset = converter.convert("id, phrase\n  greet  ,  hello  ").unwrap();
        assert_eq!(dataset.get("greet").unwrap(), ["hello"]);
    }

    #[test]
    fn test_csv_missing_intent_column() {
        let converter = CsvDatasetConverter::new();
        let result = converter.convert("intent,phrase\ngreet,hi");
        assert!(matches!(result, Err(UtterscopeError::Parse(_))));
    }

    #[test]
    fn test_csv_missing_phrase_column() {
        let converter = CsvDatasetConverter::new();
        assert!(converter.convert("id\ngreet").is_err());

        let converter = CsvDatasetConverter::new().with_phrase_column("text");
        assert!(converter.convert("id,phrase\ngreet,hi").is_err());
    }

    #[test]
    fn test_csv_empty_intent_rejected() {
        let converter = CsvDatasetConverter::new();
        let err = converter.convert("id,phrase\ngreet,hi\n,orphan").unwrap_err();
        assert_eq!(err.to_string(), "Parse error: CSV line 3: intent is empty");
    }

    #[test]
    fn test_csv_empty_input() {
        let converter = CsvDatasetConverter::new();
        assert!(converter.convert("").is_err());
    }

    #[test]
    fn test_csv_header_only() {
        let converter = CsvDatasetConverter::new();
        assert!(converter.convert("id,phrase").is_err());
    }

    #[test]
    fn test_csv_field_count_mismatch() {
        let converter = CsvDatasetConverter::new();
        let result = converter.convert("id,phrase,source\ngreet,hi");
        assert!(matches!(result, Err(UtterscopeError::Csv(_))));

        let converter = CsvDatasetConverter::new().with_flexible(true);
        let dataset = converter.convert("id,phrase,source\ngreet,hi").unwrap();
        assert_eq!(dataset.phrase_count(), 1);
    }
}
