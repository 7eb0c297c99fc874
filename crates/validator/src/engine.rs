//! The validation engine
//!
//! [`Validator`] runs rule chains against a single value
//! ([`Validator::value`]) or against keyed fields of a structured input
//! ([`Validator::values`]).
//!
//! Per field, rules run in order until one fails or asks to stop. Only the
//! first failure of a field is recorded; sibling fields are always
//! evaluated. A rule name that cannot be resolved is a [`ConfigError`]
//! and aborts the run without being recorded.
//!
//! ```
//! use serde_json::json;
//! use sift_validator::{Validator, ValidatorConfig};
//!
//! let mut validator = Validator::new(ValidatorConfig::default()).unwrap();
//!
//! let age = validator.value(json!("123"), "toInteger|isGreaterThan[100]", None).unwrap();
//! assert_eq!(age, json!(123));
//! assert!(validator.has_no_errors());
//!
//! let clean = validator
//!     .values(json!({"user": {"name": "  Alice "}, "age": "7"}))
//!     .field("user.name", "trim|required", None)
//!     .field("age", "toInteger|isGreaterThan[18]", Some("Your age"))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(clean, json!({"user": {"name": "Alice"}, "age": 7}));
//! assert_eq!(validator.errors(), vec!["Your age must be greater than 18."]);
//! ```

use std::sync::Arc;

use serde_json::Value;
use sift_notation::Notation;
use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::error::{ConfigError, ValidateResult, ValidationError, ValidationFailed};
use crate::expression::{RuleSpec, Rules};
use crate::message::{human_label, interpolate, nice_options, value_repr};
use crate::registry::RuleRegistry;
use crate::rule::{Rule, RuleContext, RuleOutcome};

/// The configured delimiters, by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters<'a> {
    /// Opens an option block
    pub left: &'a str,
    /// Closes an option block
    pub right: &'a str,
    /// Separates positional options
    pub options: &'a str,
    /// Separates rules in a chain
    pub rule: &'a str,
}

/// Rule-chain validation engine.
///
/// Not meant to be shared between concurrent runs: each run owns the
/// engine mutably. Clone it (cheap, the registry is shared) for another
/// thread.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    registry: Arc<RuleRegistry>,
    notation: Notation,
    errors: Vec<ValidationError>,
    current_key: String,
    current_input: Value,
}

impl Validator {
    /// Create an engine with the built-in rules plus the configured ones.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyDelimiter`] for an unusable configuration.
    pub fn new(config: ValidatorConfig) -> Result<Self, ConfigError> {
        Self::with_registry(config, Arc::new(RuleRegistry::with_builtins()))
    }

    /// Create an engine on a shared registry.
    ///
    /// Configured rule mappings are added copy-on-write, so the shared
    /// registry itself is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_registry(
        config: ValidatorConfig,
        mut registry: Arc<RuleRegistry>,
    ) -> Result<Self, ConfigError> {
        config.check()?;

        for (name, handler) in &config.rules {
            if registry.handler_id(name) != Some(handler.as_str()) {
                Arc::make_mut(&mut registry).add_rule(name, handler.clone());
            }
        }

        Ok(Self {
            notation: Notation::new(config.notation_delimiter.clone()),
            config,
            registry,
            errors: Vec::new(),
            current_key: String::new(),
            current_input: Value::Null,
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Rule registry
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Clear errors and per-run state
    pub fn reset(&mut self) -> &mut Self {
        self.errors.clear();
        self.current_key.clear();
        self.current_input = Value::Null;
        self
    }

    /// All configured delimiters
    pub fn delimiters(&self) -> Delimiters<'_> {
        Delimiters {
            left: &self.config.option_left_delimiter,
            right: &self.config.option_right_delimiter,
            options: &self.config.default_option_delimiter,
            rule: &self.config.rule_delimiter,
        }
    }

    /// One delimiter by role: `left`, `right`, `options` or `rule`
    pub fn delimiter(&self, needle: &str) -> Option<&str> {
        let delimiters = self.delimiters();
        match needle {
            "left" => Some(delimiters.left),
            "right" => Some(delimiters.right),
            "options" => Some(delimiters.options),
            "rule" => Some(delimiters.rule),
            _ => None,
        }
    }

    // ==================== Registry ====================

    /// Point rule `name` at handler id `handler`
    pub fn add_rule(&mut self, name: &str, handler: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.registry).add_rule(name, handler);
        self
    }

    /// Point several rule names at handler ids
    pub fn add_rules<I, N, H>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, H)>,
        N: AsRef<str>,
        H: Into<String>,
    {
        Arc::make_mut(&mut self.registry).add_rules(rules);
        self
    }

    /// Register a handler under `id`
    pub fn register_handler(&mut self, id: &str, rule: impl Rule + 'static) -> &mut Self {
        Arc::make_mut(&mut self.registry).register_handler(id, rule);
        self
    }

    // ==================== Modes ====================

    /// Raise [`ValidationFailed`] after runs that recorded errors
    pub fn throw_exception_on_failure(&mut self, enabled: bool) -> &mut Self {
        self.config.throw_exception_on_failure = enabled;
        self
    }

    /// Change the field path delimiter; empty reads keys flat
    pub fn change_notation_delimiter(&mut self, delimiter: &str) -> &mut Self {
        self.config.notation_delimiter = delimiter.to_owned();
        self.notation.change_delimiter(delimiter);
        self
    }

    /// Read field keys flat
    pub fn disable_notation(&mut self) -> &mut Self {
        self.change_notation_delimiter("")
    }

    // ==================== Running ====================

    /// Run `rules` against a single value and return the rewritten value.
    ///
    /// `human` labels the value in messages (default `input`).
    ///
    /// # Errors
    ///
    /// [`ValidateError::Config`](crate::ValidateError::Config) for an
    /// unresolvable rule; [`ValidateError::Failed`](crate::ValidateError::Failed)
    /// when exception mode is on and the value failed.
    pub fn value(
        &mut self,
        input: Value,
        rules: impl Into<Rules>,
        human: Option<&str>,
    ) -> ValidateResult<Value> {
        self.reset();

        let spec = rules.into().to_spec(&self.config);
        let human = human_label(human, "");
        self.current_input = self.apply_chain(input, &spec, &human)?;

        self.finish()
    }

    /// Start a keyed run over `input`
    pub fn values(&mut self, input: Value) -> FieldRun<'_> {
        FieldRun {
            validator: self,
            input,
            targets: Vec::new(),
        }
    }

    /// Value as left by the last run
    pub fn current_value(&self) -> &Value {
        &self.current_input
    }

    // ==================== Errors ====================

    /// Record a failure against the current field.
    ///
    /// `template` is interpolated with `human`, `options`, `rule` and
    /// `input`, in that order.
    pub fn add_error(
        &mut self,
        template: &str,
        human: &str,
        options: &str,
        rule: &str,
        input: &str,
    ) -> &mut Self {
        let message = interpolate(template, &[human, options, rule, input]);
        debug!(key = %self.current_key, rule, %message, "rule failed");

        self.errors.push(ValidationError {
            message,
            key: self.current_key.clone(),
            template: template.to_owned(),
            human: human.to_owned(),
            options: options.to_owned(),
            rule: rule.to_owned(),
            input: input.to_owned(),
        });
        self
    }

    /// Whether the last run recorded any failure
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Alias of [`has_error`](Self::has_error)
    pub fn has_errors(&self) -> bool {
        self.has_error()
    }

    pub fn has_no_errors(&self) -> bool {
        !self.has_error()
    }

    /// Text of the first failure, or an empty string
    pub fn error(&self) -> &str {
        self.errors.first().map_or("", ValidationError::text)
    }

    /// Texts of every failure, in the order recorded
    pub fn errors(&self) -> Vec<&str> {
        self.errors.iter().map(ValidationError::text).collect()
    }

    /// Structured failure records
    pub fn errors_raw(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Aggregate of the recorded failures
    pub fn failure(&self) -> ValidationFailed {
        ValidationFailed::new(self.errors.clone(), self.config.exception_code)
    }

    // ==================== Internals ====================

    fn run_fields(&mut self, input: Value, targets: Vec<FieldTarget>) -> ValidateResult<Value> {
        self.reset();
        self.current_input = input;

        for target in targets {
            self.run_field(target)?;
        }

        self.finish()
    }

    fn run_field(&mut self, target: FieldTarget) -> ValidateResult<()> {
        let FieldTarget { key, rules, human } = target;
        let human = human_label(human.as_deref(), &key);
        let spec = rules.to_spec(&self.config);

        let absent = if self.notation.is_flat() {
            Value::String(String::new())
        } else {
            Value::Null
        };
        let value = self.notation.get(&self.current_input, &key, absent);

        self.current_key = key;
        let result = self.apply_chain(value, &spec, &human);
        let key = std::mem::take(&mut self.current_key);

        self.notation.set(&mut self.current_input, &key, result?)?;
        Ok(())
    }

    fn apply_chain(
        &mut self,
        mut value: Value,
        spec: &RuleSpec,
        human: &str,
    ) -> Result<Value, ConfigError> {
        for call in spec.calls() {
            if call.is_blank() {
                continue;
            }

            let rule = Arc::clone(self.registry.resolve(&call.name)?);
            let before = value.clone();

            trace!(key = %self.current_key, rule = %call.name, options = %call.options, "applying rule");
            let outcome = {
                let ctx = RuleContext::new(call, &self.config, &self.registry);
                rule.apply(&mut value, &ctx)?
            };

            match outcome {
                RuleOutcome::Continue => {}
                RuleOutcome::Stop => {
                    debug!(key = %self.current_key, rule = %call.name, "rule stopped the chain");
                    break;
                }
                RuleOutcome::Fail(template) => {
                    let template = if template.is_empty() {
                        self.config.default_error_msg.clone()
                    } else {
                        template
                    };
                    let options = nice_options(&call.options, &self.config.default_option_delimiter);
                    self.add_error(&template, human, &options, &call.name, &value_repr(&before));
                    value = before;
                    break;
                }
            }
        }

        Ok(value)
    }

    fn finish(&mut self) -> ValidateResult<Value> {
        if self.config.throw_exception_on_failure && self.has_errors() {
            debug!(errors = self.errors.len(), code = self.config.exception_code, "validation failed");
            return Err(self.failure().into());
        }
        Ok(self.current_input.clone())
    }
}

// ============================================================================
// KEYED RUN
// ============================================================================

/// One field of a keyed run
#[derive(Debug, Clone)]
struct FieldTarget {
    key: String,
    rules: Rules,
    human: Option<String>,
}

/// Builder for a keyed run, created by [`Validator::values`].
///
/// Fields run in the order they were added.
#[must_use = "a keyed run does nothing until `run` is called"]
#[derive(Debug)]
pub struct FieldRun<'v> {
    validator: &'v mut Validator,
    input: Value,
    targets: Vec<FieldTarget>,
}

impl FieldRun<'_> {
    /// Validate `key` (a path when notation is on) with `rules`
    pub fn field(mut self, key: impl Into<String>, rules: impl Into<Rules>, human: Option<&str>) -> Self {
        self.targets.push(FieldTarget {
            key: key.into(),
            rules: rules.into(),
            human: human.map(str::to_owned),
        });
        self
    }

    /// Validate every `(key, rules)` pair with derived labels
    pub fn for_each<I, K, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<Rules>,
    {
        self.targets
            .extend(targets.into_iter().map(|(key, rules)| FieldTarget {
                key: key.into(),
                rules: rules.into(),
                human: None,
            }));
        self
    }

    /// Run every field and return the rewritten input.
    ///
    /// # Errors
    ///
    /// As [`Validator::value`]; additionally a
    /// [`ConfigError::Notation`] when a result cannot be written back.
    pub fn run(self) -> ValidateResult<Value> {
        self.validator.run_fields(self.input, self.targets)
    }
}
