//! Error types for Trueno-Ensemble
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of entity owning a directory in the experiment tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Parameterized model instance inside an ensemble
    Model,
    /// Group of models sharing a parameter sweep
    Ensemble,
    /// Standalone node
    Node,
    /// Data store orchestrator
    Orchestrator,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Model => "Model",
            Self::Ensemble => "Ensemble",
            Self::Node => "Node",
            Self::Orchestrator => "Orchestrator",
        };
        f.write_str(label)
    }
}

/// Trueno-Ensemble error types
#[derive(Error, Debug)]
pub enum Error {
    /// Unsupported strategy, malformed tag, or invalid entity setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Parameter set or strategy output failed shape validation
    #[error("Generation error: {0}")]
    Generation(String),

    /// Target directory exists and overwrite is disabled
    #[error("{kind} directory for {name} already exists at {}\nEnable overwrite to replace it", path.display())]
    Collision {
        /// Entity kind owning the directory
        kind: EntityKind,
        /// Entity name
        name: String,
        /// Existing directory
        path: PathBuf,
    },

    /// Model name already registered within an ensemble
    #[error("Model {model} already exists in ensemble {ensemble}\nEnable overwrite to replace it")]
    ModelExists {
        /// Ensemble name
        ensemble: String,
        /// Colliding model name
        model: String,
    },

    /// Tag regex failed to compile
    #[error("Invalid tag pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// IO error with the operation and path that failed
    #[error("IO error: {context}: {source}")]
    Io {
        /// Operation and path
        context: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error during recursive copy
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key never appeared while polling a data store
    #[error("Timed out after {waited_ms}ms waiting for key {key}")]
    Timeout {
        /// Prefixed key that was polled
        key: String,
        /// Total time spent polling
        waited_ms: u128,
    },
}

impl Error {
    /// Wrap an IO error with the operation and path it came from.
    pub fn io(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            context: format!("{action} {}", path.display()),
            source,
        }
    }
}

/// Attach operation/path context to `std::io::Result`
pub(crate) trait IoContext<T> {
    fn io_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|e| Error::io(action, path, e))
    }
}
