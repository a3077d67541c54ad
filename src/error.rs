// error.rs - Error taxonomy for a coevolution run

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs, computing matrices or emitting artifacts.
///
/// `Input`, `Computation` and `Write` abort the run. `PlottingUnavailable` and
/// `Render` only affect figure output and are downgraded to warnings by the driver.
#[derive(Debug, Error)]
pub enum CoevolError {
    #[error("invalid input: {0}")]
    Input(String),

    #[error("computation failed: {0}")]
    Computation(String),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("plotting unavailable: {0}")]
    PlottingUnavailable(String),

    #[error("failed to render figure '{}': {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl CoevolError {
    pub fn input(message: impl Into<String>) -> Self {
        CoevolError::Input(message.into())
    }

    pub fn computation(message: impl Into<String>) -> Self {
        CoevolError::Computation(message.into())
    }

    /// Whether this error stops the run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoevolError::Input(_) | CoevolError::Computation(_) | CoevolError::Write { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CoevolError>;
