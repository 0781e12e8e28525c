//! Error types for the analyzer.
//!
//! Every variant is fatal to a run: the binary reports it and exits without
//! printing a partial report. An extraction that finds nothing is not an
//! error and never shows up here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Leak file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read leak file {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to load password lists from {}: {source}", path.display())]
    DictionaryLoadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AnalyzerError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AnalyzerError::Configuration {
            message: message.into(),
        }
    }

    /// Short machine-friendly tag, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzerError::InputNotFound { .. } => "input_not_found",
            AnalyzerError::InputUnreadable { .. } => "input_unreadable",
            AnalyzerError::DictionaryLoadFailure { .. } => "dictionary_load_failure",
            AnalyzerError::Configuration { .. } => "configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
