//! Error taxonomy for registry and shell operations

use std::fmt;
use std::io;

/// Result type for toggle operations
pub type ToggleResult<T> = Result<T, ToggleError>;

/// Registry operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryOp {
    Read,
    Write,
    Delete,
}

impl fmt::Display for RegistryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistryOp::Read => "read",
            RegistryOp::Write => "write",
            RegistryOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while toggling the context menu
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    /// The OS refused to create a key, usually a permission problem
    #[error("Could not create registry key '{path}': {source}")]
    KeyCreation { path: String, source: io::Error },

    #[error("Registry {op} failed for '{path}': {source}")]
    Registry {
        op: RegistryOp,
        path: String,
        source: io::Error,
    },

    #[error("Failed to launch {program}: {source}")]
    Launch { program: String, source: io::Error },

    #[error("Console I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ToggleError {
    pub fn registry(op: RegistryOp, path: &str, source: io::Error) -> Self {
        ToggleError::Registry {
            op,
            path: path.to_string(),
            source,
        }
    }

    pub fn key_creation(path: &str, source: io::Error) -> Self {
        ToggleError::KeyCreation {
            path: path.to_string(),
            source,
        }
    }

    /// Report a key that could not be opened for a value write as a write failure
    pub fn into_write_failure(self) -> Self {
        match self {
            ToggleError::KeyCreation { path, source } => ToggleError::Registry {
                op: RegistryOp::Write,
                path,
                source,
            },
            other => other,
        }
    }
}
