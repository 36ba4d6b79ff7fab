//! Checkpoint error types.

use thiserror::Error;

/// Errors raised while encoding, decoding or restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint encoding failed: {0}")]
    Encode(String),

    #[error("Checkpoint decoding failed: {0}")]
    Decode(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint was taken from a configuration with another initial state
    #[error("Checkpoint initial state '{found}' does not match configuration initial '{expected}'")]
    InitialMismatch { found: String, expected: String },

    #[error("Checkpoint references undeclared state '{state}'")]
    UnknownState { state: String },

    /// The target machine's stack is bounded below the checkpoint's depth
    #[error("Checkpoint {stack} history holds {len} entries, machine keeps at most {limit}")]
    HistoryTooLong {
        stack: &'static str,
        len: usize,
        limit: usize,
    },
}
