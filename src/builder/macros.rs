//! Macros for ergonomic configuration construction.

/// Declare a configuration inline.
///
/// Expands to a [`ConfigurationBuilder`](crate::builder::ConfigurationBuilder)
/// chain and evaluates to `Result<Configuration, BuildError>`. Labels must be
/// plain identifiers; use the builder directly for anything else.
///
/// # Example
///
/// ```
/// use undoable_fsm::fsm_config;
///
/// let config = fsm_config! {
///     initial: normal,
///     states: {
///         normal => { study => busy },
///         busy => { get_tired => sleeping, get_hungry => hungry },
///         hungry => { eat => normal },
///         sleeping => { get_hungry => hungry, get_up => normal },
///     }
/// }
/// .unwrap();
///
/// assert_eq!(config.initial(), "normal");
/// assert_eq!(config.len(), 4);
/// ```
#[macro_export]
macro_rules! fsm_config {
    (
        initial: $initial:ident,
        states: {
            $(
                $state:ident => { $($event:ident => $target:ident),* $(,)? }
            ),* $(,)?
        } $(,)?
    ) => {
        $crate::builder::ConfigurationBuilder::new()
            .initial(stringify!($initial))
            $(
                .state(
                    $crate::core::StateDefinition::new(stringify!($state))
                        $(.on(stringify!($event), stringify!($target)))*
                )
            )*
            .build()
    };
}

#[cfg(test)]
mod tests {
    use crate::builder::BuildError;
    use crate::core::ConfigError;

    #[test]
    fn fsm_config_macro_builds_configuration() {
        let config = fsm_config! {
            initial: normal,
            states: {
                normal => { study => busy },
                busy => { get_hungry => hungry },
                hungry => { eat => normal },
            }
        }
        .unwrap();

        assert_eq!(
            config.labels().collect::<Vec<_>>(),
            vec!["normal", "busy", "hungry"]
        );
        assert_eq!(config.state("busy").unwrap().target("get_hungry"), Some("hungry"));
    }

    #[test]
    fn fsm_config_supports_terminal_states() {
        let config = fsm_config! {
            initial: start,
            states: {
                start => { finish => done },
                done => {},
            }
        }
        .unwrap();

        assert_eq!(config.state("done").unwrap().transitions().count(), 0);
    }

    #[test]
    fn fsm_config_reports_invalid_targets() {
        let result = fsm_config! {
            initial: start,
            states: {
                start => { finish => nowhere }
            }
        };

        assert!(matches!(
            result,
            Err(BuildError::Invalid(ConfigError::DanglingTransition { .. }))
        ));
    }
}
