//! `validateJson[...]`: path-addressed checks on the current value

use std::sync::Arc;

use serde_json::Value;

use crate::engine::Validator;
use crate::error::ValidateError;
use crate::json::ValidJson;
use crate::rule::{RuleContext, RuleOutcome, RuleResult};

/// Run the option text as a [`ValidJson`] rule list against the value.
///
/// The first nested failure becomes this rule's failure message.
pub fn validate_json(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    if !ctx.has_options() {
        return Err(ctx.invalid_option("expected rule(path) expressions"));
    }

    let nested = Validator::with_registry(ctx.config().clone(), Arc::clone(ctx.registry()))?;
    let mut json = ValidJson::new(nested);

    match json.check(value, vec![ctx.options().to_owned()]) {
        Ok(()) => Ok(RuleOutcome::Continue),
        Err(ValidateError::Failed(failed)) => {
            let text = failed.errors.first().map_or(failed.message.as_str(), |e| e.text());
            Ok(RuleOutcome::fail(text.replace('%', "%%")))
        }
        Err(ValidateError::Config(err)) => Err(err),
    }
}
