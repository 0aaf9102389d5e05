//! Unified error type for the CatPoint controller.
//!
//! Collaborator faults are wrapped, never reinterpreted: a repository or
//! detection failure reaches the caller with its variant intact.
//! The remaining variants are the few conditions the controller itself
//! rejects.

use core::fmt;

use crate::app::ports::{DetectionError, RepositoryError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible library operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The persistence collaborator failed.
    Repository(RepositoryError),
    /// The detection collaborator failed.
    Detection(DetectionError),
    /// A sensor operation named a sensor that is not registered.
    SensorNotFound(String),
    /// Registering another sensor would exceed the configured cap.
    SensorLimitReached(usize),
    /// Configuration is invalid or could not be loaded.
    Config(String),
    /// A thread panicked while holding the shared controller lock.
    LockPoisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository(e) => write!(f, "repository: {e}"),
            Self::Detection(e) => write!(f, "detection: {e}"),
            Self::SensorNotFound(name) => write!(f, "sensor not registered: {name}"),
            Self::SensorLimitReached(limit) => {
                write!(f, "sensor limit reached ({limit} registered)")
            }
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::LockPoisoned => write!(f, "controller lock poisoned"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Repository(e) => Some(e),
            Self::Detection(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(e: RepositoryError) -> Self {
        Self::Repository(e)
    }
}

impl From<DetectionError> for Error {
    fn from(e: DetectionError) -> Self {
        Self::Detection(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
