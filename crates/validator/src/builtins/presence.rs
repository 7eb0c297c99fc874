//! Presence rules

use serde_json::Value;

use crate::rule::{RuleContext, RuleOutcome, RuleResult};
use crate::value_utils::{is_blank, number_as_f64};

/// Fails on `null`, blank text and empty containers
pub fn required(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    Ok(RuleOutcome::check(!is_blank(value), "%s is required."))
}

/// Like [`required`], and also rejects `false`, zero and `"0"`
pub fn not_empty(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    let empty = is_blank(value)
        || match value {
            Value::Bool(b) => !*b,
            Value::Number(n) => number_as_f64(n).is_some_and(|f| f == 0.0),
            Value::String(s) => s.trim() == "0",
            _ => false,
        };
    Ok(RuleOutcome::check(!empty, "%s must not be empty."))
}

/// Ends the chain quietly when the value is empty
pub fn allow_empty(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    if is_blank(value) {
        Ok(RuleOutcome::Stop)
    } else {
        Ok(RuleOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::tests::run;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("required", json!("x"), RuleOutcome::Continue)]
    #[case("required", json!(0), RuleOutcome::Continue)]
    #[case("required", json!(" "), RuleOutcome::fail("%s is required."))]
    #[case("required", json!(null), RuleOutcome::fail("%s is required."))]
    #[case("notEmpty", json!(0), RuleOutcome::fail("%s must not be empty."))]
    #[case("notEmpty", json!("0"), RuleOutcome::fail("%s must not be empty."))]
    #[case("notEmpty", json!([0]), RuleOutcome::Continue)]
    #[case("notEmpty", json!(false), RuleOutcome::fail("%s must not be empty."))]
    #[case("notEmpty", json!(true), RuleOutcome::Continue)]
    #[case("allowEmpty", json!(""), RuleOutcome::Stop)]
    #[case("allowEmpty", json!("x"), RuleOutcome::Continue)]
    fn presence(#[case] rule: &str, #[case] input: Value, #[case] expected: RuleOutcome) {
        assert_eq!(run(rule, input).0, expected);
    }
}
