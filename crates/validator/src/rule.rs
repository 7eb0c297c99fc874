//! Rule handler contract
//!
//! A rule receives the current value by mutable reference and a
//! [`RuleContext`] describing how it was invoked. It may rewrite the value
//! in place, and reports one of three outcomes:
//!
//! - [`RuleOutcome::Continue`]: run the next rule in the chain
//! - [`RuleOutcome::Stop`]: skip the rest of the chain without an error
//! - [`RuleOutcome::Fail`]: record a failure with the given template
//!
//! A rule that cannot make sense of its own options returns a
//! [`ConfigError`] instead; that aborts the whole run.
//!
//! # Examples
//!
//! ```
//! use serde_json::Value;
//! use sift_validator::{RuleContext, RuleOutcome, RuleResult};
//!
//! fn is_even(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
//!     let even = value.as_i64().is_some_and(|n| n % 2 == 0);
//!     Ok(RuleOutcome::check(even, "%s must be even."))
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::ConfigError;
use crate::expression::RuleCall;
use crate::registry::RuleRegistry;

/// What the engine should do after a rule ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Carry on with the next rule
    Continue,
    /// Stop this field's chain, recording nothing
    Stop,
    /// Stop this field's chain and record a failure.
    ///
    /// The template is interpolated with the label, options, rule name and
    /// input. An empty template means the configured default message.
    Fail(String),
}

impl RuleOutcome {
    /// Fail with `template`
    pub fn fail(template: impl Into<String>) -> Self {
        Self::Fail(template.into())
    }

    /// Fail with the configured default message
    pub fn invalid() -> Self {
        Self::Fail(String::new())
    }

    /// Continue when `ok`, otherwise fail with `template`
    pub fn check(ok: bool, template: impl Into<String>) -> Self {
        if ok { Self::Continue } else { Self::fail(template) }
    }
}

/// Result of a single rule application
pub type RuleResult = Result<RuleOutcome, ConfigError>;

/// A validation or filter rule.
pub trait Rule: Send + Sync {
    /// Judge and optionally rewrite `value`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the rule is misconfigured; a rejected value is
    /// an `Ok(RuleOutcome::Fail(_))`, not an error.
    fn apply(&self, value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult;
}

impl<F> Rule for F
where
    F: Fn(&mut Value, &RuleContext<'_>) -> RuleResult + Send + Sync,
{
    fn apply(&self, value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
        self(value, ctx)
    }
}

/// How a rule was invoked: its name and options as written, the engine
/// configuration and the registry it was resolved from.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    call: &'a RuleCall,
    config: &'a ValidatorConfig,
    registry: &'a Arc<RuleRegistry>,
}

impl<'a> RuleContext<'a> {
    /// Create a context for one invocation
    pub fn new(
        call: &'a RuleCall,
        config: &'a ValidatorConfig,
        registry: &'a Arc<RuleRegistry>,
    ) -> Self {
        Self {
            call,
            config,
            registry,
        }
    }

    /// Rule name as written in the chain
    pub fn name(&self) -> &'a str {
        &self.call.name
    }

    /// Raw option text
    pub fn options(&self) -> &'a str {
        &self.call.options
    }

    /// Whether any options were given
    pub fn has_options(&self) -> bool {
        !self.call.options.is_empty()
    }

    /// Engine configuration
    pub fn config(&self) -> &'a ValidatorConfig {
        self.config
    }

    /// Registry the rule was resolved from, for nested validation
    pub fn registry(&self) -> &'a Arc<RuleRegistry> {
        self.registry
    }

    /// Options split on the configured option delimiter and trimmed.
    ///
    /// Empty options give an empty list.
    pub fn option_list(&self) -> Vec<&'a str> {
        if self.call.options.is_empty() {
            return Vec::new();
        }
        self.call
            .options
            .split(self.config.default_option_delimiter.as_str())
            .map(str::trim)
            .collect()
    }

    /// Positional option at `index`
    pub fn option(&self, index: usize) -> Option<&'a str> {
        self.option_list().get(index).copied()
    }

    /// Positional option at `index`, which must be present.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidOption`] when it is missing or empty.
    pub fn require_option(&self, index: usize) -> Result<&'a str, ConfigError> {
        self.option(index)
            .filter(|option| !option.is_empty())
            .ok_or_else(|| self.invalid_option(format!("expected option #{}", index + 1)))
    }

    /// Positional option parsed as a number.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidOption`] when missing or not numeric.
    pub fn option_f64(&self, index: usize) -> Result<f64, ConfigError> {
        let raw = self.require_option(index)?;
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| self.invalid_option(format!("'{raw}' is not a number")))
    }

    /// Positional option parsed as a count.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidOption`] when missing or not a non-negative integer.
    pub fn option_usize(&self, index: usize) -> Result<usize, ConfigError> {
        let raw = self.require_option(index)?;
        raw.parse::<usize>()
            .map_err(|_| self.invalid_option(format!("'{raw}' is not a non-negative integer")))
    }

    /// Build an [`ConfigError::InvalidOption`] for this invocation
    pub fn invalid_option(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::invalid_option(self.name(), self.options(), reason)
    }
}
