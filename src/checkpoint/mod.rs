//! Checkpoint and resume of a machine's runtime state.
//!
//! A checkpoint captures the active state and both history stacks so a
//! session can be resumed later. The configuration itself is not part of
//! the checkpoint; it is restored onto a machine built from the same
//! configuration, and every label is checked against it.

use crate::core::Configuration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's runtime state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the configuration the checkpoint was taken from
    pub initial: String,

    /// Active state at capture time
    pub active: String,

    /// Undo stack, oldest first
    pub history: Vec<String>,

    /// Redo stack, oldest first
    pub redo_history: Vec<String>,
}

impl Checkpoint {
    pub(crate) fn capture<'a>(
        initial: &str,
        active: &str,
        history: impl Iterator<Item = &'a str>,
        redo_history: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial: initial.to_string(),
            active: active.to_string(),
            history: history.map(str::to_string).collect(),
            redo_history: redo_history.map(str::to_string).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Check that every label in the checkpoint belongs to `config`.
    pub fn validate(&self, config: &Configuration) -> Result<(), CheckpointError> {
        self.check_version()?;

        if self.initial != config.initial() {
            return Err(CheckpointError::InitialMismatch {
                found: self.initial.clone(),
                expected: config.initial().to_string(),
            });
        }

        let labels = std::iter::once(&self.active)
            .chain(&self.history)
            .chain(&self.redo_history);
        for label in labels {
            if !config.contains(label) {
                return Err(CheckpointError::UnknownState {
                    state: label.clone(),
                });
            }
        }

        Ok(())
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}
