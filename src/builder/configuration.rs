//! Builder for constructing machine configurations.

use crate::builder::error::BuildError;
use crate::core::{Configuration, StateDefinition};
use crate::machine::{FiniteStateMachine, MachineOptions};

/// Builder for constructing configurations with a fluent API.
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    initial: Option<String>,
    states: Vec<StateDefinition>,
}

impl ConfigurationBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, label: impl Into<String>) -> Self {
        self.initial = Some(label.into());
        self
    }

    /// Add a state. States keep the order they are added in.
    pub fn state(mut self, state: StateDefinition) -> Self {
        self.states.push(state);
        self
    }

    /// Add a state from `(event, target)` pairs.
    pub fn state_with<I, E, T>(self, label: impl Into<String>, transitions: I) -> Self
    where
        I: IntoIterator<Item = (E, T)>,
        E: Into<String>,
        T: Into<String>,
    {
        let state = transitions
            .into_iter()
            .fold(StateDefinition::new(label), |state, (event, target)| {
                state.on(event, target)
            });
        self.state(state)
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: Vec<StateDefinition>) -> Self {
        self.states.extend(states);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<Configuration, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        Ok(Configuration::new(initial, self.states)?)
    }

    /// Build the configuration and a machine running on it.
    pub fn build_machine(self, options: MachineOptions) -> Result<FiniteStateMachine, BuildError> {
        let config = self.build()?;
        Ok(FiniteStateMachine::with_options(config, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigError;
    use std::num::NonZeroUsize;

    #[test]
    fn builder_validates_required_fields() {
        let result = ConfigurationBuilder::new().build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_states() {
        let result = ConfigurationBuilder::new().initial("normal").build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn builder_surfaces_validation_errors() {
        let result = ConfigurationBuilder::new()
            .initial("normal")
            .state_with("normal", [("study", "busy")])
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Invalid(ConfigError::DanglingTransition { .. }))
        ));
    }

    #[test]
    fn fluent_api_builds_configuration() {
        let config = ConfigurationBuilder::new()
            .initial("normal")
            .state(StateDefinition::new("normal").on("study", "busy"))
            .state_with("busy", [("get_tired", "sleeping")])
            .states(vec![StateDefinition::new("sleeping").on("get_up", "normal")])
            .build()
            .unwrap();

        assert_eq!(config.initial(), "normal");
        assert_eq!(
            config.labels().collect::<Vec<_>>(),
            vec!["normal", "busy", "sleeping"]
        );
    }

    #[test]
    fn build_machine_applies_options() {
        let mut machine = ConfigurationBuilder::new()
            .initial("a")
            .state_with("a", [("next", "b")])
            .state_with("b", [("next", "a")])
            .build_machine(MachineOptions {
                history_limit: NonZeroUsize::new(1),
            })
            .unwrap();

        machine.trigger("next").unwrap();
        machine.trigger("next").unwrap();
        assert!(machine.undo());
        assert!(!machine.undo());
    }
}
