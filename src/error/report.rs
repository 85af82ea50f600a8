use std::fmt;
use std::path::PathBuf;
/// Report pipeline error types
use thiserror::Error;

use crate::error::PipelineError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("'{}' not found. Please ensure the file exists.", .path.display())]
    InputMissing { path: PathBuf },
    #[error("Failed to read '{}': {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing JSON in '{}': {source}", .path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Error writing CSV to '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Pipeline(PipelineError),
}

impl ReportError {
    /// Classify a failed read of the input file
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::InputMissing { path }
        } else {
            Self::InputUnreadable { path, source }
        }
    }

    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

impl From<PipelineError> for ReportError {
    fn from(err: PipelineError) -> Self {
        match err.into_node_error::<ReportError>() {
            Ok(report_err) => report_err,
            Err(other) => Self::Pipeline(other),
        }
    }
}

/// Problems the report recovers from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWarning {
    /// Top-level JSON value was not an array; the record list is treated as empty
    UnexpectedShape { found: &'static str },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedShape { found } => write!(
                f,
                "Unexpected JSON structure: expected a list of student objects, found {found}"
            ),
        }
    }
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
