//! Error types for training and model loading.

use std::io;
use std::path::PathBuf;

/// Errors raised while loading and preparing the training dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("cannot read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown personality label: {0:?}")]
    UnknownLabel(String),

    #[error("value {value:?} in column {column} was not seen when the encoder was fitted")]
    UnseenCategory { column: String, value: String },

    #[error("dataset is empty after dropping incomplete rows")]
    Empty,

    #[error("not enough records to split: {0}")]
    TooFewRecords(usize),
}

/// Errors raised while reading or writing the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("model artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt model artifact {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact {} contains malformed trees", .0.display())]
    Malformed(PathBuf),

    #[error("model artifact expects {got} features, predictor provides {expected}")]
    Shape { expected: usize, got: usize },
}
