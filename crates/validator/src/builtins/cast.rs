//! Casting and normalising filters
//!
//! These rewrite the value in place. Only the strict casts can fail.

use serde_json::{Number, Value};

use crate::message::value_repr;
use crate::rule::{RuleContext, RuleOutcome, RuleResult};
use crate::value_utils;

/// Strict integer cast: integral numbers and integer strings
pub fn to_integer(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    match value_utils::to_integer(value) {
        Some(i) => {
            *value = Value::from(i);
            Ok(RuleOutcome::Continue)
        }
        None => Ok(RuleOutcome::fail("%s must be an integer.")),
    }
}

/// Lenient integer cast; anything unreadable becomes `0`
pub fn cast_integer(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    *value = Value::from(value_utils::cast_integer(value));
    Ok(RuleOutcome::Continue)
}

/// Numeric cast to a float
pub fn to_float(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    match value_utils::to_float(value).and_then(Number::from_f64) {
        Some(n) => {
            *value = Value::Number(n);
            Ok(RuleOutcome::Continue)
        }
        None => Ok(RuleOutcome::fail("%s must be a number.")),
    }
}

/// Scalar to its text form; containers are rejected
pub fn to_string(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    if value.is_array() || value.is_object() {
        return Ok(RuleOutcome::fail("%s cannot be converted to text."));
    }
    *value = Value::String(value_repr(value));
    Ok(RuleOutcome::Continue)
}

/// Truthiness cast
pub fn to_boolean(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    *value = Value::Bool(value_utils::is_truthy(value));
    Ok(RuleOutcome::Continue)
}

/// Trim whitespace, or the characters given as options
pub fn trim(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    if let Value::String(s) = value {
        let trimmed = if ctx.has_options() {
            let chars: Vec<char> = ctx.options().chars().collect();
            s.trim_matches(chars.as_slice())
        } else {
            s.trim()
        };
        *s = trimmed.to_owned();
    }
    Ok(RuleOutcome::Continue)
}

/// Lowercase strings; other values pass through
pub fn to_lowercase(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    if let Value::String(s) = value {
        *s = s.to_lowercase();
    }
    Ok(RuleOutcome::Continue)
}

/// Uppercase strings; other values pass through
pub fn to_uppercase(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    if let Value::String(s) = value {
        *s = s.to_uppercase();
    }
    Ok(RuleOutcome::Continue)
}

/// Replace an empty value with the option text
pub fn default(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    if value_utils::is_blank(value) {
        *value = Value::String(ctx.options().to_owned());
    }
    Ok(RuleOutcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::tests::run;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("toInteger", json!("42"), json!(42))]
    #[case("castInteger", json!("42abc"), json!(42))]
    #[case("toFloat", json!("2.5"), json!(2.5))]
    #[case("toString", json!(7), json!("7"))]
    #[case("toBoolean", json!("yes"), json!(true))]
    #[case("trim", json!("  padded "), json!("padded"))]
    #[case("trim[-]", json!("--dashed--"), json!("dashed"))]
    #[case("toLowercase", json!("MiXeD"), json!("mixed"))]
    #[case("toUppercase", json!("MiXeD"), json!("MIXED"))]
    #[case("default[guest]", json!(""), json!("guest"))]
    #[case("default[guest]", json!("alice"), json!("alice"))]
    fn casts(#[case] rule: &str, #[case] input: Value, #[case] expected: Value) {
        let (outcome, value) = run(rule, input);
        assert_eq!(outcome, RuleOutcome::Continue);
        assert_eq!(value, expected);
    }

    #[rstest]
    #[case("toInteger", json!("12abc"))]
    #[case("toFloat", json!("abc"))]
    #[case("toString", json!([1]))]
    fn failed_casts_leave_value_alone(#[case] rule: &str, #[case] input: Value) {
        let (outcome, value) = run(rule, input.clone());
        assert!(matches!(outcome, RuleOutcome::Fail(_)));
        assert_eq!(value, input);
    }
}
