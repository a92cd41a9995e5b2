//! Dataset converters for creating phrase datasets from uploaded files.
//!
//! Ingestion sits outside the analysis core: a converter turns raw file
//! contents into a [`PhraseDataset`] and the analyzers only ever see the
//! dataset.

use std::path::Path;

use crate::dataset::PhraseDataset;
use crate::error::Result;

pub mod csv;
pub mod qna;

pub use self::csv::CsvDatasetConverter;
pub use self::qna::QnaDatasetConverter;

/// A trait for converting file formats into phrase datasets.
///
/// # Example
///
/// ```no_run
/// use utterscope::document::{CsvDatasetConverter, DatasetConverter};
///
/// let converter = CsvDatasetConverter::new();
/// let dataset = converter.convert_file("training.csv").unwrap();
/// println!("{} intents", dataset.len());
/// ```
pub trait DatasetConverter {
    /// Convert in-memory file contents into a dataset.
    fn convert(&self, input: &str) -> Result<PhraseDataset>;

    /// Read a file and convert its contents.
    fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<PhraseDataset> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let dataset = self.convert(&content)?;
        log::info!(
            "loaded {} phrases across {} intents from {}",
            dataset.phrase_count(),
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }
}
