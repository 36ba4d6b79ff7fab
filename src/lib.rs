//! Undoable FSM: a label-driven finite state machine with undo/redo
//!
//! A machine is built from a declarative configuration: an initial state and,
//! for every state, a map from event labels to target state labels. The
//! machine tracks the active state, applies transitions, and keeps undo and
//! redo stacks of previously active states.
//!
//! # Core Concepts
//!
//! - **Configuration**: Validated state/transition table, loadable from JSON
//! - **History**: Last-in-first-out stacks of state labels
//! - **Machine**: Transition dispatch plus undo/redo bookkeeping
//! - **Checkpoints**: Serializable snapshots of a machine's runtime state
//!
//! Misuse (unknown states, undefined events, missing configuration) is an
//! error. Running out of history is not: `undo` and `redo` simply return
//! `false`.
//!
//! # Example
//!
//! ```rust
//! use undoable_fsm::{fsm_config, FiniteStateMachine};
//!
//! let config = fsm_config! {
//!     initial: normal,
//!     states: {
//!         normal => { study => busy },
//!         busy => { get_tired => sleeping, get_hungry => hungry },
//!         hungry => { eat => normal },
//!         sleeping => { get_hungry => hungry, get_up => normal },
//!     }
//! }
//! .unwrap();
//!
//! let mut machine = FiniteStateMachine::new(config);
//! machine.trigger("study").unwrap();
//! assert_eq!(machine.state(), "busy");
//!
//! assert!(machine.undo());
//! assert_eq!(machine.state(), "normal");
//! assert!(machine.redo());
//! assert_eq!(machine.state(), "busy");
//!
//! assert_eq!(machine.states(Some("eat")), vec!["hungry"]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, ConfigurationBuilder};
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{
    ConfigError, Configuration, EmptyHistoryError, HistoryStack, StateDefinition,
};
pub use crate::machine::{FiniteStateMachine, FsmError, MachineOptions};
