//! Machine errors.

use crate::core::ConfigError;
use thiserror::Error;

/// Errors raised by [`FiniteStateMachine`](super::FiniteStateMachine).
///
/// Construction failures are fatal; `UnknownState` and `UnknownTransition`
/// leave the machine untouched and the caller may simply try again.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("No configuration supplied")]
    MissingConfig,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("There is no state '{state}' in the machine")]
    UnknownState { state: String },

    #[error("Event '{event}' is not defined for state '{state}'")]
    UnknownTransition { event: String, state: String },
}
