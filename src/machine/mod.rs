//! The state machine itself.
//!
//! [`FiniteStateMachine`] owns a validated [`Configuration`](crate::core::Configuration)
//! and two [`HistoryStack`](crate::core::HistoryStack)s. All operations are
//! synchronous; mutation goes through `&mut self`, so callers that share a
//! machine must bring their own lock.

mod error;
mod fsm;

pub use error::FsmError;
pub use fsm::{FiniteStateMachine, MachineOptions};
