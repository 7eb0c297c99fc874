//! # sift-validator
//!
//! Rule-chain validation and filtering over nested `serde_json::Value`
//! data.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use sift_validator::prelude::*;
//!
//! let mut validator = Validator::new(ValidatorConfig::default())?;
//!
//! let n = validator.value(json!("123"), "toInteger|isGreaterThan[100]|isLessThan[999]", None)?;
//! assert_eq!(n, json!(123));
//!
//! validator.throw_exception_on_failure(true);
//! let err = validator.value(json!("50"), "isGreaterThan[100]", None).unwrap_err();
//! assert_eq!(err.as_failed().unwrap().errors[0].rule, "isGreaterThan");
//! # Ok::<(), ValidateError>(())
//! ```
//!
//! ## Rule chains
//!
//! A chain is `rule|rule[options]|...`. Names are case-insensitive and
//! resolve through a [`RuleRegistry`]; see [`builtins`] for the catalog.
//! Custom rules implement [`Rule`], or are plain functions:
//!
//! ```
//! use serde_json::{Value, json};
//! use sift_validator::prelude::*;
//!
//! fn is_even(value: &mut Value, _: &RuleContext<'_>) -> RuleResult {
//!     Ok(RuleOutcome::check(value.as_i64().is_some_and(|n| n % 2 == 0), "%s must be even."))
//! }
//!
//! let mut validator = Validator::new(ValidatorConfig::default())?;
//! validator.register_handler("custom::even", is_even).add_rule("isEven", "custom::even");
//!
//! validator.value(json!(3), "isEven", Some("Seats"))?;
//! assert_eq!(validator.error(), "Seats must be even.");
//! # Ok::<(), ValidateError>(())
//! ```
//!
//! ## Entry points
//!
//! - [`Validator`]: collects failures, or raises them in exception mode
//! - [`Filter`]: always raises, returns the filtered value
//! - [`ValidJson`]: path-addressed checks over JSON documents

pub mod builtins;
pub mod config;
pub mod engine;
pub mod error;
pub mod expression;
pub mod filter;
pub mod json;
pub mod message;
pub mod prelude;
pub mod registry;
pub mod rule;
pub mod value_utils;

pub use config::ValidatorConfig;
pub use engine::{Delimiters, FieldRun, Validator};
pub use error::{
    ConfigError, DEFAULT_EXCEPTION_CODE, ValidateError, ValidateResult, ValidationError,
    ValidationFailed,
};
pub use expression::{PathRule, RuleCall, RuleSpec, Rules};
pub use filter::Filter;
pub use json::ValidJson;
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleContext, RuleOutcome, RuleResult};
