/// Pipeline processing error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing required input '{required}' for node '{node}'")]
    MissingInput { node: String, required: String },
    #[error("Missing required output '{required}' for node '{node}'")]
    MissingOutput { node: String, required: String },
    #[error("Pipeline configuration error: {message}")]
    ConfigError { message: String },
    #[error("Node processing error: {0}")]
    NodeError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl PipelineError {
    /// Create a new ConfigError
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError {
            message: msg.into(),
        }
    }

    /// Take the boxed node error back as `E`, if that is what the node failed with
    pub fn into_node_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::NodeError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(inner) => Err(Self::NodeError(inner)),
            },
            other => Err(other),
        }
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
