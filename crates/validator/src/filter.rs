//! Filter façade
//!
//! Runs rule chains as filters: the rewritten value comes back, and any
//! failure is raised as [`ValidationFailed`](crate::ValidationFailed)
//! instead of being collected.
//!
//! Named data sets (`request`, `query`, or any other) are bound once and
//! then filtered key by key:
//!
//! ```
//! use serde_json::json;
//! use sift_validator::{Filter, Validator, ValidatorConfig};
//!
//! let validator = Validator::new(ValidatorConfig::default()).unwrap();
//! let mut filter = Filter::with_input(validator, json!({"age": " 42 "}), json!({}));
//!
//! let age = filter.request("age", "trim|toInteger", json!(0)).unwrap();
//! assert_eq!(age, json!(42));
//!
//! let page = filter.query("page", "toInteger", json!(1)).unwrap();
//! assert_eq!(page, json!(1));
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};
use sift_notation::Notation;

use crate::engine::Validator;
use crate::error::ValidateResult;
use crate::expression::Rules;

/// Data set name for request data
pub const REQUEST: &str = "request";
/// Data set name for query-string data
pub const QUERY: &str = "query";

/// Exception-mode wrapper around a [`Validator`].
#[derive(Debug, Clone)]
pub struct Filter {
    validator: Validator,
    sets: HashMap<String, Value>,
    keys: Notation,
}

impl Filter {
    /// Wrap `validator`, switching it to exception mode
    pub fn new(mut validator: Validator) -> Self {
        validator.throw_exception_on_failure(true);
        Self {
            validator,
            sets: HashMap::new(),
            keys: Notation::flat(),
        }
    }

    /// Wrap `validator` with the `request` and `query` data sets bound
    pub fn with_input(validator: Validator, request: Value, query: Value) -> Self {
        let mut filter = Self::new(validator);
        filter.set(REQUEST, request).set(QUERY, query);
        filter
    }

    /// Bind (or replace) a named data set
    pub fn set(&mut self, name: impl Into<String>, data: Value) -> &mut Self {
        self.sets.insert(name.into(), data);
        self
    }

    /// A bound data set
    pub fn data_set(&self, name: &str) -> Option<&Value> {
        self.sets.get(name)
    }

    /// The wrapped engine, for inspecting the last run's errors
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Filter one value.
    ///
    /// # Errors
    ///
    /// [`ValidateError::Failed`](crate::ValidateError::Failed) when a rule
    /// rejects the value; [`ValidateError::Config`](crate::ValidateError::Config)
    /// for an unknown rule.
    pub fn value(&mut self, value: Value, rules: impl Into<Rules>) -> ValidateResult<Value> {
        self.validator.throw_exception_on_failure(true);
        self.validator.value(value, rules, None)
    }

    /// Filter several keys of `values`; absent or `null` keys map to `null`.
    ///
    /// # Errors
    ///
    /// As [`value`](Self::value), on the first key that fails.
    pub fn values<I, K, R>(&mut self, values: &Value, keys_rules: I) -> ValidateResult<Map<String, Value>>
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<Rules>,
    {
        let mut filtered = Map::new();
        for (key, rules) in keys_rules {
            let key = key.into();
            let value = match self.present(values, &key) {
                Some(value) => self.value(value, rules)?,
                None => Value::Null,
            };
            filtered.insert(key, value);
        }
        Ok(filtered)
    }

    /// Filter `key` of the data set `set`.
    ///
    /// An unbound set, an absent key or a `null` value yields `default`
    /// without running any rule.
    ///
    /// # Errors
    ///
    /// As [`value`](Self::value).
    pub fn from_set(
        &mut self,
        set: &str,
        key: &str,
        rules: impl Into<Rules>,
        default: Value,
    ) -> ValidateResult<Value> {
        let found = self
            .sets
            .get(set)
            .and_then(|data| self.present(data, key));

        match found {
            Some(value) => self.value(value, rules),
            None => Ok(default),
        }
    }

    /// Filter `key` of the `request` data set
    ///
    /// # Errors
    ///
    /// As [`value`](Self::value).
    pub fn request(&mut self, key: &str, rules: impl Into<Rules>, default: Value) -> ValidateResult<Value> {
        self.from_set(REQUEST, key, rules, default)
    }

    /// Filter `key` of the `query` data set
    ///
    /// # Errors
    ///
    /// As [`value`](Self::value).
    pub fn query(&mut self, key: &str, rules: impl Into<Rules>, default: Value) -> ValidateResult<Value> {
        self.from_set(QUERY, key, rules, default)
    }

    fn present(&self, data: &Value, key: &str) -> Option<Value> {
        self.keys
            .lookup(data, key)
            .filter(|value| !value.is_null())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidatorConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn filter() -> Filter {
        Filter::new(Validator::new(ValidatorConfig::default()).unwrap())
    }

    #[test]
    fn exception_mode_is_forced() {
        let f = filter();
        assert!(f.validator().config().throw_exception_on_failure);
    }

    #[test]
    fn null_key_yields_default() {
        let mut f = filter();
        f.set("form", json!({"nickname": null}));
        let out = f.from_set("form", "nickname", "required", json!("anon")).unwrap();
        assert_eq!(out, json!("anon"));
    }

    #[test]
    fn unbound_set_yields_default() {
        let mut f = filter();
        assert_eq!(f.from_set("cookies", "id", "toInteger", json!(0)).unwrap(), json!(0));
    }

    #[test]
    fn values_maps_absent_keys_to_null() {
        let mut f = filter();
        let out = f
            .values(&json!({"name": " Bob "}), [("name", "trim"), ("email", "isEmail")])
            .unwrap();
        assert_eq!(Value::Object(out), json!({"name": "Bob", "email": null}));
    }
}
