//! # Utterscope
//!
//! Data-quality statistics for chatbot intent-classification training data.
//!
//! ## Features
//!
//! - Phrase counts per intent with mean, median, standard deviation, a density
//!   histogram and a fitted normal curve
//! - Keyword / natural language / fluff length bias per intent
//! - Polar embedding of length bias for visualization
//! - Pass/fail table against configurable bias ranges
//! - CSV and Botpress QnA ingestion, and a command line front end

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod document;
pub mod error;

pub mod prelude {
    pub use crate::analysis::{
        AnalysisReport, BiasMap, BiasVector, ComplianceRow, DatasetAnalyzer, LengthCategory,
        LengthClassifier, PolarPoint, ThresholdConfig, analyze,
    };
    pub use crate::dataset::PhraseDataset;
    pub use crate::document::{CsvDatasetConverter, DatasetConverter, QnaDatasetConverter};
    pub use crate::error::{Result, UtterscopeError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
