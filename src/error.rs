//! Error types for the editing core.
//!
//! Only allocation failure is fatal. IO failures are reported and the
//! session continues; invalid input is rejected as a no-op. Out-of-range
//! addressing never produces an error: the cursor clamps and buffer
//! accessors return `Option`/`bool`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the editing core.
#[derive(Error, Debug)]
pub enum EditError {
    /// The buffer could not grow to hold the requested number of bytes.
    #[error("could not allocate {requested} bytes")]
    Allocation {
        /// Capacity that was being requested.
        requested: usize,
    },

    /// A file could not be opened, read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A command received input it cannot act on.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EditError {
    /// Build an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build an invalid-input error from a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the session must stop after this error.
    ///
    /// The buffer may be inconsistent after a failed allocation, so that is
    /// the only fatal class.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Allocation { .. })
    }
}

/// Result alias for editing operations.
pub type Result<T, E = EditError> = std::result::Result<T, E>;
