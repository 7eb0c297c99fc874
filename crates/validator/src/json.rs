//! Rule checks over JSON documents
//!
//! Each rule expression names the value it applies to with a wildcard
//! path: `isString(person.children.*.name)`. When a path resolves to a
//! list and does not end in the wildcard, the rule runs on every element
//! instead of on the list.
//!
//! ```
//! use serde_json::json;
//! use sift_validator::{ValidJson, Validator, ValidatorConfig};
//!
//! let mut json = ValidJson::new(Validator::new(ValidatorConfig::default()).unwrap());
//! let doc = json!({"person": {"age": 33, "children": [{"name": "Ann"}, {"name": "Bo"}]}});
//!
//! assert!(json.check(&doc, "isInt(person.age)|isString(person.children.*.name)").is_ok());
//! assert!(json.check(&doc, "isCountLessThan(person.children.*),2").is_err());
//! ```

use serde_json::Value;
use sift_notation::WildNotation;
use tracing::trace;

use crate::engine::Validator;
use crate::error::ValidateResult;
use crate::expression::{PathRule, Rules};
use crate::message::{DEFAULT_HUMAN, value_repr};

/// Template used when the document is not a JSON object or array
pub const INVALID_JSON_MSG: &str = "%s is not a valid JSON";

/// Rule name recorded against document-level failures
const DOCUMENT_RULE: &str = "validateJson";

/// Path-addressed rule checks in exception mode.
#[derive(Debug, Clone)]
pub struct ValidJson {
    validator: Validator,
    wild: WildNotation,
}

impl ValidJson {
    /// Wrap `validator`, switching it to exception mode
    pub fn new(mut validator: Validator) -> Self {
        validator.throw_exception_on_failure(true);
        Self {
            validator,
            wild: WildNotation::default(),
        }
    }

    /// Use custom path delimiter and wildcard tokens
    #[must_use]
    pub fn with_notation(mut self, wild: WildNotation) -> Self {
        self.wild = wild;
        self
    }

    /// The wrapped engine, for inspecting the last failure
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Check a document given as JSON text
    ///
    /// # Errors
    ///
    /// As [`check`](Self::check).
    pub fn check_str(&mut self, json: &str, rules: impl Into<Rules>) -> ValidateResult<()> {
        self.check(&Value::String(json.to_owned()), rules)
    }

    /// Check `json` against path-addressed `rules`.
    ///
    /// A string document is decoded first. Anything that does not decode
    /// to an object or array fails with [`INVALID_JSON_MSG`].
    ///
    /// # Errors
    ///
    /// [`ValidateError::Failed`](crate::ValidateError::Failed) on the first
    /// failing rule; [`ValidateError::Config`](crate::ValidateError::Config)
    /// for a malformed expression or unknown rule.
    pub fn check(&mut self, json: &Value, rules: impl Into<Rules>) -> ValidateResult<()> {
        let decoded;
        let document = match json {
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(value) => {
                    decoded = value;
                    &decoded
                }
                Err(_) => return Err(self.reject(json).into()),
            },
            other => other,
        };

        if !document.is_array() && !document.is_object() {
            return Err(self.reject(json).into());
        }

        let rules = rules.into();
        let tokens: Vec<String> = match rules {
            Rules::Chain(chain) => chain
                .split(self.validator.config().rule_delimiter.as_str())
                .map(str::to_owned)
                .collect(),
            Rules::List(tokens) => tokens,
        };

        for token in tokens.iter().filter(|token| !token.trim().is_empty()) {
            let PathRule { path, rule } = PathRule::parse(token, self.validator.config())?;
            let found = self.wild.get(document, &path, Value::Null);
            trace!(%path, %rule, "checking json path");

            match found {
                Value::Array(items) if !self.wild.ends_with_wildcard(&path) => {
                    for item in items {
                        self.validator.value(item, vec![rule.clone()], None)?;
                    }
                }
                value => {
                    self.validator.value(value, vec![rule.clone()], None)?;
                }
            }
        }

        Ok(())
    }

    fn reject(&mut self, json: &Value) -> crate::ValidationFailed {
        self.validator
            .reset()
            .add_error(INVALID_JSON_MSG, DEFAULT_HUMAN, "", DOCUMENT_RULE, &value_repr(json));
        self.validator.failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidatorConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn checker() -> ValidJson {
        ValidJson::new(Validator::new(ValidatorConfig::default()).unwrap())
    }

    #[test]
    fn scalar_document_is_not_json() {
        let err = checker().check_str("42", "isInt(a)").unwrap_err();
        let failed = err.as_failed().unwrap();
        assert_eq!(failed.message, "input is not a valid JSON");
        assert_eq!(failed.errors[0].template, INVALID_JSON_MSG);
    }

    #[test]
    fn undecodable_text_is_not_json() {
        assert!(checker().check_str("{oops", "isInt(a)").unwrap_err().is_validation_failure());
    }

    #[test]
    fn list_values_are_checked_per_element() {
        let doc = json!({"scores": [3, 8, 12]});
        let mut json = checker();
        let err = json.check(&doc, "isLessThan(scores)[10]").unwrap_err();
        assert_eq!(err.as_failed().unwrap().errors[0].input, "12");
    }

    #[test]
    fn trailing_wildcard_checks_the_whole_list() {
        let doc = json!({"people": [{"name": "a"}, {"name": "b"}]});
        assert!(checker().check(&doc, "isArray(people.*)").is_ok());
    }
}
