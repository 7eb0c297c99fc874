//! Text length and content rules

use std::sync::LazyLock;

use serde_json::Value;

use crate::rule::{RuleContext, RuleOutcome, RuleResult};
use crate::value_utils::text_length;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

/// `minLength[n]`: at least `n` characters
pub fn min_length(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let min = ctx.option_usize(0)?;
    let ok = text_length(value).is_some_and(|len| len >= min);
    Ok(RuleOutcome::check(ok, "%s must be at least %s characters long."))
}

/// `maxLength[n]`: at most `n` characters
pub fn max_length(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let max = ctx.option_usize(0)?;
    let ok = text_length(value).is_some_and(|len| len <= max);
    Ok(RuleOutcome::check(ok, "%s must be no more than %s characters long."))
}

/// `exactLength[n]`: exactly `n` characters
pub fn exact_length(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let exact = ctx.option_usize(0)?;
    let ok = text_length(value) == Some(exact);
    Ok(RuleOutcome::check(ok, "%s must be exactly %s characters long."))
}

pub fn is_email(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    let ok = value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s));
    Ok(RuleOutcome::check(ok, "%s must be a valid email address."))
}

pub fn is_alpha(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    let ok = value
        .as_str()
        .is_some_and(|s| !s.is_empty() && s.chars().all(char::is_alphabetic));
    Ok(RuleOutcome::check(ok, "%s may only contain letters."))
}

pub fn is_alpha_numeric(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    let ok = match value {
        Value::String(s) => !s.is_empty() && s.chars().all(char::is_alphanumeric),
        Value::Number(n) => n.is_u64(),
        _ => false,
    };
    Ok(RuleOutcome::check(ok, "%s may only contain letters and numbers."))
}
