//! Unified operator capability surface for inbound adapters.

use super::config::ConfigurationOperator;
use super::runtime::RuntimeOperator;
use super::status::StatusOperator;

/// Everything the CLI can ask of the application.
pub trait OperatorPort: ConfigurationOperator + RuntimeOperator + StatusOperator {}

impl<T> OperatorPort for T where T: ConfigurationOperator + RuntimeOperator + StatusOperator {}
