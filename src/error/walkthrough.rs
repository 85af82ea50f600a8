use std::path::PathBuf;
/// Walkthrough error types
use thiserror::Error;

use crate::error::PipelineError;

#[derive(Error, Debug)]
pub enum WalkthroughError {
    #[error("Error creating/accessing folder '{}': {source}", .path.display())]
    FolderCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error creating file '{file}': {source}")]
    RecordsFile {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Input closed before {expected} names were entered (got {received})")]
    InputClosed { expected: usize, received: usize },
    #[error("Error reading file info: {0}")]
    Inspect(#[source] std::io::Error),
    #[error("Error during backup/archive: {0}")]
    Archive(#[source] std::io::Error),
    #[error("Error during advanced file operations: {0}")]
    Removal(#[source] std::io::Error),
    #[error(transparent)]
    Pipeline(PipelineError),
}

impl WalkthroughError {
    pub fn folder_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FolderCreate {
            path: path.into(),
            source,
        }
    }

    pub fn records_file(file: impl Into<String>, source: std::io::Error) -> Self {
        Self::RecordsFile {
            file: file.into(),
            source,
        }
    }
}

impl From<PipelineError> for WalkthroughError {
    fn from(err: PipelineError) -> Self {
        match err.into_node_error::<WalkthroughError>() {
            Ok(walk_err) => walk_err,
            Err(other) => Self::Pipeline(other),
        }
    }
}

/// Result type alias for walkthrough operations
pub type WalkthroughResult<T> = Result<T, WalkthroughError>;
