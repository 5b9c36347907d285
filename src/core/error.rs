//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The ordered worker thread could not be started
    #[error("Failed to spawn log worker '{name}': {source}")]
    WorkerSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The worker has exited and no longer accepts work
    #[error("Log worker is no longer running")]
    WorkerUnavailable,

    /// A blocking call was issued from the worker thread itself
    #[error("Blocking call '{operation}' issued from the log worker thread")]
    ReentrantCall { operation: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A transport rejected a line
    #[error("Transport '{name}' failed: {message}")]
    TransportError { name: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a worker spawn error
    pub fn worker_spawn(name: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::WorkerSpawn {
            name: name.into(),
            source,
        }
    }

    /// Create a reentrant call error
    pub fn reentrant(operation: impl Into<String>) -> Self {
        LoggerError::ReentrantCall {
            operation: operation.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportError {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
