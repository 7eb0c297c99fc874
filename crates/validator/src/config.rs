//! Engine configuration
//!
//! Every recognised option has a default, so an empty JSON object is a
//! valid configuration:
//!
//! ```
//! use sift_validator::ValidatorConfig;
//!
//! let config = ValidatorConfig::from_json_str(r#"{"throwExceptionOnFailure": true}"#).unwrap();
//! assert!(config.throw_exception_on_failure);
//! assert_eq!(config.rule_delimiter, "|");
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, DEFAULT_EXCEPTION_CODE};

/// Message used when a rule fails without a template of its own
pub const DEFAULT_ERROR_MSG: &str = "%s is not valid.";

/// Engine options, loadable from camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Template used when a rule fails without naming its own
    pub default_error_msg: String,
    /// Path delimiter for field keys; empty reads keys flat
    pub notation_delimiter: String,
    /// Raise [`ValidationFailed`](crate::ValidationFailed) after a failing run
    pub throw_exception_on_failure: bool,
    /// Status code carried by the aggregate failure
    pub exception_code: u16,
    /// Separator between rules in a chain
    pub rule_delimiter: String,
    /// Opens a rule's option block
    #[serde(alias = "optionLeft")]
    pub option_left_delimiter: String,
    /// Closes a rule's option block
    #[serde(alias = "optionRight")]
    pub option_right_delimiter: String,
    /// Separator between positional options
    pub default_option_delimiter: String,
    /// Extra rule name to handler id mappings
    pub rules: BTreeMap<String, String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_error_msg: DEFAULT_ERROR_MSG.to_owned(),
            notation_delimiter: sift_notation::DEFAULT_DELIMITER.to_owned(),
            throw_exception_on_failure: false,
            exception_code: DEFAULT_EXCEPTION_CODE,
            rule_delimiter: "|".to_owned(),
            option_left_delimiter: "[".to_owned(),
            option_right_delimiter: "]".to_owned(),
            default_option_delimiter: ",".to_owned(),
            rules: BTreeMap::new(),
        }
    }
}

impl ValidatorConfig {
    /// Parse and check a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidConfig`] for malformed JSON or unknown keys,
    /// [`ConfigError::EmptyDelimiter`] for empty rule or option delimiters.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Parse and check an already decoded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`from_json_str`](Self::from_json_str).
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Reject delimiters the expression parser cannot work with.
    ///
    /// The notation delimiter may be empty; that switches to flat keys.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyDelimiter`] naming the first empty delimiter.
    pub fn check(&self) -> Result<(), ConfigError> {
        let required = [
            ("rule", &self.rule_delimiter),
            ("left option", &self.option_left_delimiter),
            ("right option", &self.option_right_delimiter),
            ("option", &self.default_option_delimiter),
        ];

        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((which, _)) => Err(ConfigError::EmptyDelimiter { which: *which }),
            None => Ok(()),
        }
    }

    // ==================== Builder ====================

    /// Set the fallback error template
    #[must_use]
    pub fn with_default_error_msg(mut self, template: impl Into<String>) -> Self {
        self.default_error_msg = template.into();
        self
    }

    /// Set the path delimiter; empty reads keys flat
    #[must_use]
    pub fn with_notation_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.notation_delimiter = delimiter.into();
        self
    }

    /// Raise the aggregate failure after failing runs
    #[must_use]
    pub fn with_throw_exception_on_failure(mut self, enabled: bool) -> Self {
        self.throw_exception_on_failure = enabled;
        self
    }

    /// Set the aggregate failure status code
    #[must_use]
    pub fn with_exception_code(mut self, code: u16) -> Self {
        self.exception_code = code;
        self
    }

    /// Set the rule separator
    #[must_use]
    pub fn with_rule_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.rule_delimiter = delimiter.into();
        self
    }

    /// Set the option block brackets
    #[must_use]
    pub fn with_option_delimiters(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.option_left_delimiter = left.into();
        self.option_right_delimiter = right.into();
        self
    }

    /// Set the positional option separator
    #[must_use]
    pub fn with_default_option_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.default_option_delimiter = delimiter.into();
        self
    }

    /// Map a rule name onto a handler id
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, handler: impl Into<String>) -> Self {
        self.rules.insert(name.into(), handler.into());
        self
    }
}
