//! Built-in rule catalog
//!
//! Every rule is a plain function; this module wires them into a
//! [`RuleRegistry`] under a handler id (`category::function`) and one or
//! more case-insensitive rule names.

pub mod cast;
pub mod compare;
pub mod json;
pub mod password;
pub mod presence;
pub mod string;
pub mod types;

use crate::registry::RuleRegistry;

/// Register every built-in rule
pub(crate) fn register_all(registry: &mut RuleRegistry) {
    register_cast_rules(registry);
    register_type_rules(registry);
    register_compare_rules(registry);
    register_string_rules(registry);
    register_presence_rules(registry);
    register_password_rules(registry);
    register_json_rules(registry);
}

// Registration methods for each category

fn register_cast_rules(registry: &mut RuleRegistry) {
    registry
        .register("cast::to_integer", &["toInteger", "toInt"], cast::to_integer)
        .register("cast::cast_integer", &["castInteger", "castInt"], cast::cast_integer)
        .register("cast::to_float", &["toFloat", "toNumber"], cast::to_float)
        .register("cast::to_string", &["toString"], cast::to_string)
        .register("cast::to_boolean", &["toBoolean", "toBool"], cast::to_boolean)
        .register("cast::trim", &["trim"], cast::trim)
        .register("cast::to_lowercase", &["toLowercase"], cast::to_lowercase)
        .register("cast::to_uppercase", &["toUppercase"], cast::to_uppercase)
        .register("cast::default", &["default"], cast::default);
}

fn register_type_rules(registry: &mut RuleRegistry) {
    registry
        .register("types::is_integer", &["isInteger", "isInt"], types::is_integer)
        .register("types::is_float", &["isFloat", "isNumber"], types::is_float)
        .register("types::is_string", &["isString"], types::is_string)
        .register("types::is_bool", &["isBool", "isBoolean"], types::is_bool)
        .register("types::is_array", &["isArray"], types::is_array);
}

fn register_compare_rules(registry: &mut RuleRegistry) {
    registry
        .register("compare::greater_than", &["isGreaterThan"], compare::greater_than)
        .register("compare::less_than", &["isLessThan"], compare::less_than)
        .register("compare::between", &["isBetween", "between"], compare::between)
        .register("compare::one_of", &["isOneOf"], compare::one_of)
        .register("compare::count_less_than", &["isCountLessThan"], compare::count_less_than)
        .register(
            "compare::count_greater_than",
            &["isCountGreaterThan"],
            compare::count_greater_than,
        );
}

fn register_string_rules(registry: &mut RuleRegistry) {
    registry
        .register("string::min_length", &["minLength"], string::min_length)
        .register("string::max_length", &["maxLength"], string::max_length)
        .register("string::exact_length", &["exactLength"], string::exact_length)
        .register("string::is_email", &["isEmail"], string::is_email)
        .register("string::is_alpha", &["isAlpha"], string::is_alpha)
        .register("string::is_alpha_numeric", &["isAlphaNumeric"], string::is_alpha_numeric);
}

fn register_presence_rules(registry: &mut RuleRegistry) {
    registry
        .register("presence::required", &["required"], presence::required)
        .register("presence::not_empty", &["notEmpty"], presence::not_empty)
        .register("presence::allow_empty", &["allowEmpty"], presence::allow_empty);
}

fn register_password_rules(registry: &mut RuleRegistry) {
    registry
        .register("password::hash", &["toPasswordHash"], password::to_password_hash)
        .register("password::verify", &["passwordVerify"], password::password_verify);
}

fn register_json_rules(registry: &mut RuleRegistry) {
    registry.register("json::validate", &["validateJson"], json::validate_json);
}
