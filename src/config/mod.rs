//! Commission rule configuration.
//!
//! This module provides the bracket-table types and the YAML loader for
//! commission rule configuration.

mod loader;
mod types;

pub use loader::{ConfigLoader, RuleFile};
pub use types::{CommissionBracket, CommissionRuleSet, MetricKind, RawRuleRow};
