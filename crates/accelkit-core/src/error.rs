//! Error types for accelkit-core.

use std::fmt;

use crate::object::ObjectError;

/// The main error type for accelkit-core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Object-related error.
    Object(ObjectError),
    /// Signal-related error.
    Signal(SignalError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(err) => write!(f, "Object error: {err}"),
            Self::Signal(err) => write!(f, "Signal error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Object(err) => Some(err),
            Self::Signal(err) => Some(err),
        }
    }
}

impl From<ObjectError> for CoreError {
    fn from(err: ObjectError) -> Self {
        Self::Object(err)
    }
}

impl From<SignalError> for CoreError {
    fn from(err: SignalError) -> Self {
        Self::Signal(err)
    }
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    InvalidConnection,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConnection => write!(f, "Invalid or disconnected connection ID"),
        }
    }
}

impl std::error::Error for SignalError {}

/// A specialized Result type for accelkit-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
