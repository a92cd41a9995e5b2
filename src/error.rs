//! Error types for the Utterscope library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`UtterscopeError`] enum. Analysis functions never hand back NaN or infinite
//! values in place of an error: an empty dataset, an intent without phrases, or
//! an out-of-range threshold each have their own variant.
//!
//! # Examples
//!
//! ```
//! use utterscope::error::{Result, UtterscopeError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(UtterscopeError::empty_dataset("no intents were supplied"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Utterscope operations.
#[derive(Error, Debug)]
pub enum UtterscopeError {
    /// The dataset has no intents, or no phrases at all.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// An intent has zero phrases, so its bias fractions are undefined.
    #[error("Degenerate intent '{intent}': no phrases to compute a bias from")]
    DegenerateIntent { intent: String },

    /// A threshold bound is outside [0, 1] or a minimum exceeds its maximum.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Input could not be turned into a dataset.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors (reading input files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reader errors (unreadable records, field count mismatches)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors raised by the command line layer with attached context
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with UtterscopeError.
pub type Result<T> = std::result::Result<T, UtterscopeError>;

impl UtterscopeError {
    /// Create a new empty dataset error.
    pub fn empty_dataset<S: Into<String>>(msg: S) -> Self {
        UtterscopeError::EmptyDataset(msg.into())
    }

    /// Create a new degenerate intent error.
    pub fn degenerate_intent<S: Into<String>>(intent: S) -> Self {
        UtterscopeError::DegenerateIntent {
            intent: intent.into(),
        }
    }

    /// Create a new invalid threshold error.
    pub fn invalid_threshold<S: Into<String>>(msg: S) -> Self {
        UtterscopeError::InvalidThreshold(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        UtterscopeError::Parse(msg.into())
    }
}
