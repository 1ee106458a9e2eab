//! Error types for data loading and validation.

use std::path::PathBuf;

/// Input-shape errors raised at the estimation boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "symmetry scores and coherence times must have the same length (got {symmetry} and {coherence})"
    )]
    LengthMismatch { symmetry: usize, coherence: usize },

    #[error("quantum bundle is empty: at least one processor sample is required")]
    EmptySample,
}

/// Errors reading an input file that exists but is unusable.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}:{line}: cannot parse '{value}' as a number")]
    Parse {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}
