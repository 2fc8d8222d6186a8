//! Error types for the accelerator subsystem.
//!
//! Most accelerator operations report expected negative outcomes through
//! their return value (`false`, `None`, an empty key). The errors here cover
//! the accelerator map and the checked parsing entry points.

use accelkit_core::ObjectError;

/// Result type alias for accelerator operations.
pub type Result<T> = std::result::Result<T, AccelError>;

/// Errors that can occur in the accelerator subsystem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccelError {
    /// The accelerator string was empty.
    #[error("empty accelerator")]
    Empty,

    /// The accelerator string had modifiers but no key.
    #[error("accelerator '{accelerator}' has no key")]
    NoKey { accelerator: String },

    /// The key name is not a known key value.
    #[error("unknown key '{name}' in accelerator '{accelerator}'")]
    UnknownKey { accelerator: String, name: String },

    /// The string is not a well-formed accelerator path.
    #[error("invalid accelerator path '{path}'")]
    InvalidPath { path: String },

    /// No entry exists for the path in the accelerator map.
    #[error("no accelerator map entry for '{path}'")]
    UnknownPath { path: String },

    /// The path, or a group tracking it, is locked.
    #[error("accelerator path '{path}' is locked")]
    PathLocked { path: String },

    /// Another path already uses the accelerator.
    #[error("accelerator for '{path}' conflicts with '{other}'")]
    Conflict { path: String, other: String },

    /// The object is not registered or was destroyed.
    #[error(transparent)]
    Object(#[from] ObjectError),
}

impl AccelError {
    /// Create a missing-key error.
    pub fn no_key(accelerator: impl Into<String>) -> Self {
        Self::NoKey { accelerator: accelerator.into() }
    }

    /// Create an unknown-key error.
    pub fn unknown_key(accelerator: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownKey {
            accelerator: accelerator.into(),
            name: name.into(),
        }
    }

    /// Create an invalid-path error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create an unknown-path error.
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownPath { path: path.into() }
    }

    /// Create a locked-path error.
    pub fn path_locked(path: impl Into<String>) -> Self {
        Self::PathLocked { path: path.into() }
    }

    /// Create a conflict error.
    pub fn conflict(path: impl Into<String>, other: impl Into<String>) -> Self {
        Self::Conflict {
            path: path.into(),
            other: other.into(),
        }
    }
}
