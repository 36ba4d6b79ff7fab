//! Build errors for configuration builders.

use crate::core::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(label) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
