//! Error types for the validation engine
//!
//! Three kinds of failure are kept apart:
//!
//! - [`ConfigError`]: the engine is misconfigured (unknown rule, bad rule
//!   options, empty delimiters). Always returned immediately.
//! - [`ValidationError`]: one rule rejected one value. Collected by the
//!   engine, never returned on its own.
//! - [`ValidationFailed`]: the aggregate raised after a full run when
//!   exception mode is on and at least one [`ValidationError`] was recorded.

use std::fmt;

use serde::Serialize;
use sift_notation::NotationError;
use thiserror::Error;

/// Default status code attached to [`ValidationFailed`]
pub const DEFAULT_EXCEPTION_CODE: u16 = 406;

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// The rule engine is misconfigured; the data was never judged.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No rule is registered under this name
    #[error("Unknown Rule or Filter \"{name}\".")]
    UnknownRule { name: String },

    /// The rule name resolves to a handler id with no handler behind it
    #[error("Unknown handler \"{handler}\" for rule \"{rule}\".")]
    UnknownHandler { rule: String, handler: String },

    /// A rule could not make sense of its options
    #[error("Invalid options \"{options}\" for rule \"{rule}\": {reason}")]
    InvalidOption {
        rule: String,
        options: String,
        reason: String,
    },

    /// A delimiter that must be non-empty was empty
    #[error("The {which} delimiter must not be an empty string.")]
    EmptyDelimiter { which: &'static str },

    /// A JSON rule expression is not of the form `rule(path)`
    #[error("Invalid rule expression \"{expression}\"")]
    InvalidExpression { expression: String },

    /// The configuration document could not be read
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A path could not be written
    #[error(transparent)]
    Notation(#[from] NotationError),
}

impl ConfigError {
    /// Create an unknown rule error
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    /// Create an unknown handler error
    pub fn unknown_handler(rule: impl Into<String>, handler: impl Into<String>) -> Self {
        Self::UnknownHandler {
            rule: rule.into(),
            handler: handler.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(
        rule: impl Into<String>,
        options: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            rule: rule.into(),
            options: options.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid expression error
    pub fn invalid_expression(expression: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
        }
    }
}

// ============================================================================
// RULE FAILURE
// ============================================================================

/// One rule rejecting one value.
///
/// `message` is already interpolated; the remaining fields keep the pieces
/// it was built from so callers can render their own text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Interpolated, human-readable message
    pub message: String,
    /// Field key (empty for single-value validation)
    pub key: String,
    /// Message template before interpolation
    pub template: String,
    /// Human label substituted into the template
    pub human: String,
    /// Rule options, formatted for display
    pub options: String,
    /// Rule name as written in the rule chain
    pub rule: String,
    /// String form of the value the rule rejected
    pub input: String,
}

impl ValidationError {
    /// Text to put in front of a user
    pub fn text(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// AGGREGATE FAILURE
// ============================================================================

/// Every rule failure from one run, raised in exception mode.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ValidationFailed {
    /// Newline-joined error texts
    pub message: String,
    /// Configured status code
    pub code: u16,
    /// Structured records, in the order they were recorded
    pub errors: Vec<ValidationError>,
}

impl ValidationFailed {
    /// Build the aggregate from recorded errors
    pub fn new(errors: Vec<ValidationError>, code: u16) -> Self {
        let message = errors
            .iter()
            .map(ValidationError::text)
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            message,
            code,
            errors,
        }
    }

    /// Returns the number of recorded failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the error texts.
    pub fn texts(&self) -> Vec<&str> {
        self.errors.iter().map(ValidationError::text).collect()
    }

    /// Converts to a JSON representation.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.message,
            "code": self.code,
            "errors": self.errors,
        })
    }
}

// ============================================================================
// TOP-LEVEL ERROR
// ============================================================================

/// Error returned by every engine, filter and JSON entry point.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// The engine is misconfigured
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The data failed validation in exception mode
    #[error(transparent)]
    Failed(#[from] ValidationFailed),
}

impl ValidateError {
    /// The aggregate failure, if this is one
    pub fn as_failed(&self) -> Option<&ValidationFailed> {
        match self {
            Self::Failed(failed) => Some(failed),
            Self::Config(_) => None,
        }
    }

    /// The configuration error, if this is one
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(config) => Some(config),
            Self::Failed(_) => None,
        }
    }

    /// Whether the data, not the engine, was at fault
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<NotationError> for ValidateError {
    fn from(err: NotationError) -> Self {
        Self::Config(ConfigError::Notation(err))
    }
}

/// Result alias for engine operations
pub type ValidateResult<T> = Result<T, ValidateError>;
