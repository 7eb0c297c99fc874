//! Integration tests for rule registration and resolution.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use sift_validator::prelude::*;

struct MultipleOf {
    fallback: i64,
}

impl Rule for MultipleOf {
    fn apply(&self, value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
        let divisor = match ctx.option(0) {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| ctx.invalid_option("divisor must be an integer"))?,
            None => self.fallback,
        };
        let ok = value.as_i64().is_some_and(|n| n.checked_rem(divisor) == Some(0));
        Ok(RuleOutcome::check(ok, "%s must be a multiple of %s."))
    }
}

fn validator() -> Validator {
    let mut v = Validator::new(ValidatorConfig::default()).unwrap();
    v.register_handler("math::multiple_of", MultipleOf { fallback: 2 })
        .add_rules([("isMultipleOf", "math::multiple_of"), ("isEven", "math::multiple_of")]);
    v
}

#[rstest]
#[case(json!(9), "isMultipleOf[3]", None)]
#[case(json!(10), "isMultipleOf[3]", Some("input must be a multiple of 3."))]
#[case(json!(4), "ISEVEN", None)]
#[case(json!(5), "isEven", Some("input must be a multiple of ."))]
fn struct_rules(#[case] input: Value, #[case] rules: &str, #[case] error: Option<&str>) {
    let mut v = validator();
    v.value(input, rules, None).unwrap();
    assert_eq!(v.errors().first().copied(), error);
}

#[test]
fn bad_rule_options_surface_as_config_errors() {
    let mut v = validator();
    let err = v.value(json!(4), "isMultipleOf[two]", None).unwrap_err();
    assert!(matches!(err.as_config(), Some(ConfigError::InvalidOption { .. })));
}

#[test]
fn dangling_handler_is_reported() {
    let mut v = validator();
    v.add_rule("isPrime", "math::prime");
    let err = v.value(json!(7), "isPrime", None).unwrap_err();
    assert_eq!(
        err.as_config(),
        Some(&ConfigError::UnknownHandler {
            rule: "isprime".to_owned(),
            handler: "math::prime".to_owned()
        })
    );
}

#[test]
fn config_document_maps_aliases_onto_builtins() {
    let config = ValidatorConfig::from_json_str(
        r#"{"rules": {"atLeastOne": "compare::count_greater_than"}, "throwExceptionOnFailure": true}"#,
    )
    .unwrap();
    let mut v = Validator::new(config).unwrap();

    assert!(v.value(json!([1, 2]), "atLeastOne[1]", None).is_ok());
    assert!(v.value(json!([]), "atLeastOne[0]", None).is_err());
}

#[test]
fn closures_are_rules() {
    let minimum = 10;
    let mut v = validator();
    v.register_handler("test::at_least", move |value: &mut Value, _: &RuleContext<'_>| -> RuleResult {
        Ok(RuleOutcome::check(value.as_i64().is_some_and(|n| n >= minimum), "%s is too small."))
    })
    .add_rule("atLeastTen", "test::at_least");

    v.value(json!(3), "atLeastTen", Some("Stock")).unwrap();
    assert_eq!(v.error(), "Stock is too small.");
}

#[test]
fn builtin_names_are_listed() {
    let registry = RuleRegistry::with_builtins();
    let names = registry.rule_names();
    assert!(names.contains(&"isgreaterthan"));
    assert!(names.contains(&"passwordverify"));
    assert_eq!(registry.handler_id("isInt"), registry.handler_id("isInteger"));
}
