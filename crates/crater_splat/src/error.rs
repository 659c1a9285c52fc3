//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, malformed plans, scene-graph failures (with the step at which an
//! apply was abandoned), and generic errors. Scene-graph failures themselves are categorized by
//! [`crate::scene::SceneError`].
use thiserror::Error;

use crate::scene::SceneError;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("{source} (apply aborted at step {step} of {total})")]
    Aborted {
        /// Zero-based index of the operation that failed.
        step: usize,
        /// Number of operations in the plan.
        total: usize,
        #[source]
        source: SceneError,
    },

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns the underlying scene-graph error, if this error originated at the scene boundary.
    pub fn scene_error(&self) -> Option<&SceneError> {
        match self {
            Error::Aborted { source, .. } => Some(source),
            Error::Scene(e) => Some(e),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
