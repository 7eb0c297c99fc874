//! Numeric, membership and size comparisons
//!
//! Bounds come from the rule options and are required; a missing or
//! non-numeric bound is a configuration error, not a failed value.

use serde_json::Value;

use crate::message::value_repr;
use crate::rule::{RuleContext, RuleOutcome, RuleResult};
use crate::value_utils;

/// `isGreaterThan[n]`: strictly greater than `n`
pub fn greater_than(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let limit = ctx.option_f64(0)?;
    let ok = value_utils::to_float(value).is_some_and(|n| n > limit);
    Ok(RuleOutcome::check(ok, "%s must be greater than %s."))
}

/// `isLessThan[n]`: strictly less than `n`
pub fn less_than(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let limit = ctx.option_f64(0)?;
    let ok = value_utils::to_float(value).is_some_and(|n| n < limit);
    Ok(RuleOutcome::check(ok, "%s must be less than %s."))
}

/// `isBetween[min,max]`: inclusive on both ends
pub fn between(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let min = ctx.option_f64(0)?;
    let max = ctx.option_f64(1)?;
    if min > max {
        return Err(ctx.invalid_option("lower bound exceeds upper bound"));
    }

    let ok = value_utils::to_float(value).is_some_and(|n| (min..=max).contains(&n));
    let template = format!(
        "%s must be between {} and {}.",
        ctx.require_option(0)?,
        ctx.require_option(1)?
    );
    Ok(RuleOutcome::check(ok, template))
}

/// `isOneOf[a,b,...]`: text form equals one of the options
pub fn one_of(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let allowed = ctx.option_list();
    if allowed.is_empty() {
        return Err(ctx.invalid_option("expected at least one allowed value"));
    }

    let ok = !value.is_array() && !value.is_object() && allowed.contains(&value_repr(value).as_str());
    Ok(RuleOutcome::check(ok, "%s must be one of %s."))
}

/// `isCountLessThan[n]`: fewer than `n` elements
pub fn count_less_than(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let limit = ctx.option_usize(0)?;
    let ok = value_utils::count(value).is_some_and(|count| count < limit);
    Ok(RuleOutcome::check(ok, "%s must contain fewer than %s items."))
}

/// `isCountGreaterThan[n]`: more than `n` elements
pub fn count_greater_than(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    let limit = ctx.option_usize(0)?;
    let ok = value_utils::count(value).is_some_and(|count| count > limit);
    Ok(RuleOutcome::check(ok, "%s must contain more than %s items."))
}
