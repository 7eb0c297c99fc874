//! Prelude module for convenient imports.
//!
//! ```
//! use sift_validator::prelude::*;
//! ```

pub use crate::config::ValidatorConfig;
pub use crate::engine::Validator;
pub use crate::error::{ConfigError, ValidateError, ValidateResult, ValidationError, ValidationFailed};
pub use crate::filter::Filter;
pub use crate::json::ValidJson;
pub use crate::registry::RuleRegistry;
pub use crate::rule::{Rule, RuleContext, RuleOutcome, RuleResult};
