//! Type checks

use serde_json::Value;

use crate::rule::{RuleContext, RuleOutcome, RuleResult};
use crate::value_utils;

/// Integral numbers and integer strings
pub fn is_integer(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    Ok(RuleOutcome::check(
        value_utils::to_integer(value).is_some(),
        "%s must be an integer.",
    ))
}

/// Any number or numeric string
pub fn is_float(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    Ok(RuleOutcome::check(
        value_utils::to_float(value).is_some(),
        "%s must be a number.",
    ))
}

pub fn is_string(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    Ok(RuleOutcome::check(value.is_string(), "%s must be text."))
}

pub fn is_bool(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    Ok(RuleOutcome::check(value.is_boolean(), "%s must be true or false."))
}

/// Lists and maps
pub fn is_array(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    Ok(RuleOutcome::check(
        value.is_array() || value.is_object(),
        "%s must be an array.",
    ))
}
