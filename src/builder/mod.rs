//! Builder API for ergonomic configuration construction.
//!
//! This module provides a fluent builder and a macro for declaring
//! configurations with minimal boilerplate. Both validate exactly like
//! [`Configuration::new`](crate::core::Configuration::new).

pub mod configuration;
pub mod error;
pub mod macros;

pub use configuration::ConfigurationBuilder;
pub use error::BuildError;
