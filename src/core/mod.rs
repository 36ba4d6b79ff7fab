//! Core definition and history types.
//!
//! This module contains the data a machine is built from:
//! - Validated state/transition definitions via `Configuration`
//! - Label history via `HistoryStack`
//!
//! Nothing here performs I/O; every operation is synchronous and in-memory.

mod definition;
mod error;
mod history;

pub use definition::{Configuration, StateDefinition};
pub use error::ConfigError;
pub use history::{EmptyHistoryError, HistoryStack};
