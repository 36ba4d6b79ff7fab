//! Declarative state and transition definitions.
//!
//! A [`Configuration`] is the immutable description a machine runs on: an
//! initial state label plus an ordered table of [`StateDefinition`]s. Every
//! `Configuration` value is validated on construction, so a machine built
//! from one never has to re-check its labels.

use super::error::ConfigError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single state and the events it reacts to.
///
/// # Example
///
/// ```rust
/// use undoable_fsm::core::StateDefinition;
///
/// let busy = StateDefinition::new("busy")
///     .on("get_tired", "sleeping")
///     .on("get_hungry", "hungry");
///
/// assert_eq!(busy.label(), "busy");
/// assert_eq!(busy.target("get_tired"), Some("sleeping"));
/// assert!(!busy.handles("eat"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDefinition {
    label: String,
    transitions: BTreeMap<String, String>,
}

impl StateDefinition {
    /// Create a state with no outgoing transitions.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            transitions: BTreeMap::new(),
        }
    }

    /// Add a transition taken when `event` is triggered in this state.
    ///
    /// Declaring the same event twice keeps the last target.
    pub fn on(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.transitions.insert(event.into(), target.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Target state for `event`, if this state defines it.
    pub fn target(&self, event: &str) -> Option<&str> {
        self.transitions.get(event).map(String::as_str)
    }

    pub fn handles(&self, event: &str) -> bool {
        self.transitions.contains_key(event)
    }

    /// `(event, target)` pairs, ordered by event label.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.transitions
            .iter()
            .map(|(event, target)| (event.as_str(), target.as_str()))
    }
}

/// Validated machine definition.
///
/// Serializes to and from the document shape
/// `{ "initial": .., "states": { label: { "transitions": { event: target } } } }`,
/// keeping the order in which states are declared.
///
/// # Example
///
/// ```rust
/// use undoable_fsm::core::Configuration;
///
/// let config = Configuration::from_json(r#"{
///     "initial": "normal",
///     "states": {
///         "normal": { "transitions": { "study": "busy" } },
///         "busy": { "transitions": { "rest": "normal" } }
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.initial(), "normal");
/// assert_eq!(config.labels().collect::<Vec<_>>(), vec!["normal", "busy"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    initial: String,
    states: Vec<StateDefinition>,
    index: HashMap<String, usize>,
}

impl Configuration {
    /// Build a configuration, rejecting anything a machine could not run on.
    ///
    /// Fails when there are no states, a label is declared twice, the
    /// initial state is undeclared, or a transition targets an undeclared
    /// state.
    pub fn new(
        initial: impl Into<String>,
        states: impl IntoIterator<Item = StateDefinition>,
    ) -> Result<Self, ConfigError> {
        let initial = initial.into();
        let states: Vec<StateDefinition> = states.into_iter().collect();

        if states.is_empty() {
            return Err(ConfigError::NoStates);
        }

        let mut index = HashMap::with_capacity(states.len());
        for (position, state) in states.iter().enumerate() {
            if index.insert(state.label.clone(), position).is_some() {
                return Err(ConfigError::DuplicateState {
                    state: state.label.clone(),
                });
            }
        }

        if !index.contains_key(&initial) {
            return Err(ConfigError::UnknownInitial { initial });
        }

        for state in &states {
            for (event, target) in state.transitions() {
                if !index.contains_key(target) {
                    return Err(ConfigError::DanglingTransition {
                        state: state.label.clone(),
                        event: event.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            initial,
            states,
            index,
        })
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfiguration = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Like [`from_json`](Self::from_json), but treats blank input and a
    /// JSON `null` as "no configuration" rather than as a parse failure.
    pub fn from_json_optional(json: &str) -> Result<Option<Self>, ConfigError> {
        if json.trim().is_empty() {
            return Ok(None);
        }
        let raw: Option<RawConfiguration> = serde_json::from_str(json)?;
        raw.map(Self::from_raw).transpose()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Encode)
    }

    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// States in declaration order.
    pub fn states(&self) -> &[StateDefinition] {
        &self.states
    }

    pub fn state(&self, label: &str) -> Option<&StateDefinition> {
        self.index.get(label).map(|&position| &self.states[position])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// State labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(StateDefinition::label)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn from_raw(raw: RawConfiguration) -> Result<Self, ConfigError> {
        Configuration::new(raw.initial, raw.states.0)
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawConfigurationRef {
            initial: &self.initial,
            states: StateTableRef(&self.states),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Configuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawConfiguration::deserialize(deserializer)?;
        Configuration::from_raw(raw).map_err(de::Error::custom)
    }
}

/// Unvalidated wire form of a [`Configuration`].
#[derive(Deserialize)]
struct RawConfiguration {
    initial: String,
    states: StateTable,
}

#[derive(Serialize)]
struct RawConfigurationRef<'a> {
    initial: &'a str,
    states: StateTableRef<'a>,
}

/// Ordered `label -> { transitions }` map.
struct StateTable(Vec<StateDefinition>);

struct StateTableRef<'a>(&'a [StateDefinition]);

#[derive(Deserialize)]
struct TransitionTable {
    #[serde(default)]
    transitions: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct TransitionTableRef<'a> {
    transitions: &'a BTreeMap<String, String>,
}

impl Serialize for StateTableRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for state in self.0 {
            map.serialize_entry(
                &state.label,
                &TransitionTableRef {
                    transitions: &state.transitions,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StateTableVisitor;

        impl<'de> Visitor<'de> for StateTableVisitor {
            type Value = StateTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of state labels to state definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StateTable, A::Error> {
                let mut states = Vec::with_capacity(access.size_hint().unwrap_or(0));
                // Entries are kept in document order; duplicates are caught by validation.
                while let Some((label, table)) = access.next_entry::<String, TransitionTable>()? {
                    states.push(StateDefinition {
                        label,
                        transitions: table.transitions,
                    });
                }
                Ok(StateTable(states))
            }
        }

        deserializer.deserialize_map(StateTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily_routine() -> Vec<StateDefinition> {
        vec![
            StateDefinition::new("normal").on("study", "busy"),
            StateDefinition::new("busy")
                .on("get_tired", "sleeping")
                .on("get_hungry", "hungry"),
            StateDefinition::new("hungry").on("eat", "normal"),
            StateDefinition::new("sleeping")
                .on("get_hungry", "hungry")
                .on("get_up", "normal"),
        ]
    }

    #[test]
    fn new_keeps_declaration_order() {
        let config = Configuration::new("normal", daily_routine()).unwrap();

        assert_eq!(config.initial(), "normal");
        assert_eq!(
            config.labels().collect::<Vec<_>>(),
            vec!["normal", "busy", "hungry", "sleeping"]
        );
        assert_eq!(config.len(), 4);
    }

    #[test]
    fn state_lookup_by_label() {
        let config = Configuration::new("normal", daily_routine()).unwrap();

        let sleeping = config.state("sleeping").unwrap();
        assert_eq!(sleeping.target("get_up"), Some("normal"));
        assert!(config.state("dancing").is_none());
        assert!(config.contains("hungry"));
        assert!(!config.contains("dancing"));
    }

    #[test]
    fn rejects_empty_state_set() {
        let result = Configuration::new("normal", Vec::new());
        assert!(matches!(result, Err(ConfigError::NoStates)));
    }

    #[test]
    fn rejects_undeclared_initial() {
        let result = Configuration::new("dancing", daily_routine());
        assert!(matches!(
            result,
            Err(ConfigError::UnknownInitial { initial }) if initial == "dancing"
        ));
    }

    #[test]
    fn rejects_dangling_transition() {
        let states = vec![StateDefinition::new("normal").on("study", "library")];
        let result = Configuration::new("normal", states);

        assert!(matches!(
            result,
            Err(ConfigError::DanglingTransition { state, event, target })
                if state == "normal" && event == "study" && target == "library"
        ));
    }

    #[test]
    fn rejects_duplicate_state() {
        let states = vec![StateDefinition::new("normal"), StateDefinition::new("normal")];
        let result = Configuration::new("normal", states);

        assert!(matches!(
            result,
            Err(ConfigError::DuplicateState { state }) if state == "normal"
        ));
    }

    #[test]
    fn later_event_declaration_wins() {
        let state = StateDefinition::new("normal")
            .on("study", "busy")
            .on("study", "normal");
        assert_eq!(state.target("study"), Some("normal"));
        assert_eq!(state.transitions().count(), 1);
    }

    #[test]
    fn json_preserves_declaration_order() {
        let json = r#"{
            "initial": "zeta",
            "states": {
                "zeta": { "transitions": { "next": "alpha" } },
                "alpha": { "transitions": { "next": "mid" } },
                "mid": { "transitions": {} }
            }
        }"#;

        let config = Configuration::from_json(json).unwrap();
        assert_eq!(
            config.labels().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn json_transitions_default_to_empty() {
        let json = r#"{ "initial": "only", "states": { "only": {} } }"#;
        let config = Configuration::from_json(json).unwrap();

        assert_eq!(config.state("only").unwrap().transitions().count(), 0);
    }

    #[test]
    fn json_validation_errors_are_typed() {
        let json = r#"{ "initial": "a", "states": { "a": { "transitions": { "go": "b" } } } }"#;
        let result = Configuration::from_json(json);

        assert!(matches!(result, Err(ConfigError::DanglingTransition { .. })));
    }

    #[test]
    fn json_duplicate_state_is_rejected() {
        let json = r#"{ "initial": "a", "states": { "a": {}, "a": {} } }"#;
        let result = Configuration::from_json(json);

        assert!(matches!(result, Err(ConfigError::DuplicateState { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = Configuration::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = Configuration::from_json(r#"{ "states": {} }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn optional_json_treats_null_and_blank_as_absent() {
        assert!(Configuration::from_json_optional("").unwrap().is_none());
        assert!(Configuration::from_json_optional("  \n").unwrap().is_none());
        assert!(Configuration::from_json_optional("null").unwrap().is_none());

        let present =
            Configuration::from_json_optional(r#"{ "initial": "a", "states": { "a": {} } }"#)
                .unwrap();
        assert!(present.is_some());
    }

    #[test]
    fn encode_errors_are_reported_as_encoding() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let message = ConfigError::Encode(source).to_string();

        assert!(message.starts_with("Configuration could not be encoded"));
        assert!(!message.contains("parsed"));
    }

    #[test]
    fn configuration_serializes_in_document_shape() {
        let config = Configuration::new("normal", daily_routine()).unwrap();

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["initial"], "normal");
        assert_eq!(value["states"]["busy"]["transitions"]["get_hungry"], "hungry");

        let json = config.to_json().unwrap();
        let reloaded = Configuration::from_json(&json).unwrap();
        assert_eq!(config, reloaded);
    }
}
