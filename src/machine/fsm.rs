//! Finite state machine with undo/redo history.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{Configuration, HistoryStack};
use crate::machine::error::FsmError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::debug;

/// Tunables for a machine's history stacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineOptions {
    /// Maximum entries kept on each of the undo and redo stacks.
    /// `None` keeps everything; a limit of zero is not representable.
    #[serde(default)]
    pub history_limit: Option<NonZeroUsize>,
}

/// State machine driven by a label-to-label transition table.
///
/// Every forward move (`change_state`, `trigger`) records the previous state
/// for `undo` and discards anything that could have been redone.
///
/// # Example
///
/// ```rust
/// use undoable_fsm::core::{Configuration, StateDefinition};
/// use undoable_fsm::FiniteStateMachine;
///
/// let config = Configuration::new(
///     "normal",
///     vec![
///         StateDefinition::new("normal").on("study", "busy"),
///         StateDefinition::new("busy").on("rest", "normal"),
///     ],
/// )
/// .unwrap();
///
/// let mut machine = FiniteStateMachine::new(config);
/// machine.trigger("study").unwrap();
/// assert_eq!(machine.state(), "busy");
///
/// assert!(machine.undo());
/// assert_eq!(machine.state(), "normal");
/// assert!(!machine.undo());
/// ```
#[derive(Clone, Debug)]
pub struct FiniteStateMachine {
    config: Configuration,
    active: String,
    history: HistoryStack,
    redo_history: HistoryStack,
}

impl FiniteStateMachine {
    /// Create a machine in the configuration's initial state with empty history.
    pub fn new(config: Configuration) -> Self {
        Self::with_options(config, MachineOptions::default())
    }

    pub fn with_options(config: Configuration, options: MachineOptions) -> Self {
        let stack = || match options.history_limit {
            Some(limit) => HistoryStack::with_limit(limit.get()),
            None => HistoryStack::new(),
        };

        Self {
            active: config.initial().to_string(),
            history: stack(),
            redo_history: stack(),
            config,
        }
    }

    /// Create a machine from a configuration that may be absent.
    pub fn from_config(config: Option<Configuration>) -> Result<Self, FsmError> {
        config.map(Self::new).ok_or(FsmError::MissingConfig)
    }

    /// Create a machine from a JSON configuration document.
    ///
    /// Blank input and `null` are reported as [`FsmError::MissingConfig`];
    /// anything else that fails to load is [`FsmError::InvalidConfig`].
    pub fn from_json(json: &str) -> Result<Self, FsmError> {
        Self::from_config(Configuration::from_json_optional(json)?)
    }

    /// Active state label.
    pub fn state(&self) -> &str {
        &self.active
    }

    pub fn initial(&self) -> &str {
        self.config.initial()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Jump directly to `target`, regardless of the transition table.
    pub fn change_state(&mut self, target: &str) -> Result<(), FsmError> {
        if !self.config.contains(target) {
            debug!(state = %target, "rejected change to undeclared state");
            return Err(FsmError::UnknownState {
                state: target.to_string(),
            });
        }

        self.advance(target.to_string());
        Ok(())
    }

    /// Follow the transition for `event` out of the active state.
    pub fn trigger(&mut self, event: &str) -> Result<(), FsmError> {
        let Some(target) = self
            .config
            .state(&self.active)
            .and_then(|state| state.target(event))
        else {
            debug!(event = %event, state = %self.active, "rejected undefined event");
            return Err(FsmError::UnknownTransition {
                event: event.to_string(),
                state: self.active.clone(),
            });
        };

        let target = target.to_string();
        self.advance(target);
        Ok(())
    }

    /// Return to the initial state.
    ///
    /// A reset is not recorded as a move and leaves the undo and redo stacks
    /// as they are; only [`clear_history`](Self::clear_history) empties them.
    pub fn reset(&mut self) {
        debug!(from = %self.active, to = %self.config.initial(), "reset");
        self.active = self.config.initial().to_string();
    }

    /// State labels in declaration order.
    ///
    /// With `Some(event)`, only states that define a transition for `event`.
    pub fn states(&self, event: Option<&str>) -> Vec<&str> {
        match event {
            None => self.config.labels().collect(),
            Some(event) => self
                .config
                .states()
                .iter()
                .filter(|state| state.handles(event))
                .map(|state| state.label())
                .collect(),
        }
    }

    /// Step back to the previous state. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        let Ok(previous) = self.history.pop() else {
            return false;
        };

        let current = std::mem::replace(&mut self.active, previous);
        debug!(from = %current, to = %self.active, "undo");
        self.redo_history.push(current);
        true
    }

    /// Re-apply the most recently undone state. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let Ok(next) = self.redo_history.pop() else {
            return false;
        };

        let current = std::mem::replace(&mut self.active, next);
        debug!(from = %current, to = %self.active, "redo");
        self.history.push(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }

    /// Empty both history stacks. The active state is unchanged.
    pub fn clear_history(&mut self) {
        debug!(
            undo = self.history.len(),
            redo = self.redo_history.len(),
            "clear history"
        );
        self.history.clear();
        self.redo_history.clear();
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn redo_history(&self) -> &HistoryStack {
        &self.redo_history
    }

    /// Capture the active state and both history stacks.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(
            self.config.initial(),
            &self.active,
            self.history.entries(),
            self.redo_history.entries(),
        )
    }

    /// Replace runtime state with a checkpoint taken from the same configuration.
    ///
    /// The machine is left untouched if the checkpoint does not validate or
    /// holds more history than this machine's stacks can keep.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        checkpoint.validate(&self.config)?;
        Self::check_fits(&self.history, "undo", checkpoint.history.len())?;
        Self::check_fits(&self.redo_history, "redo", checkpoint.redo_history.len())?;

        self.history.clear();
        for label in &checkpoint.history {
            self.history.push(label.as_str());
        }
        self.redo_history.clear();
        for label in &checkpoint.redo_history {
            self.redo_history.push(label.as_str());
        }
        self.active = checkpoint.active.clone();

        debug!(id = %checkpoint.id, state = %self.active, "restored checkpoint");
        Ok(())
    }

    fn check_fits(
        stack: &HistoryStack,
        name: &'static str,
        len: usize,
    ) -> Result<(), CheckpointError> {
        match stack.limit() {
            Some(limit) if len > limit => Err(CheckpointError::HistoryTooLong {
                stack: name,
                len,
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn advance(&mut self, target: String) {
        let previous = std::mem::replace(&mut self.active, target);
        debug!(from = %previous, to = %self.active, "state changed");
        self.history.push(previous);
        self.redo_history.clear();
    }
}
