//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading, validating or encoding a [`Configuration`](super::Configuration).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not a well-formed configuration document
    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration could not be encoded: {0}")]
    Encode(serde_json::Error),

    #[error("Configuration declares no states")]
    NoStates,

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("Initial state '{initial}' is not declared")]
    UnknownInitial { initial: String },

    /// A transition points at a state that is not declared
    #[error("Transition '{event}' from '{state}' targets undeclared state '{target}'")]
    DanglingTransition {
        state: String,
        event: String,
        target: String,
    },
}
