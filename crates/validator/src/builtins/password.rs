//! Password hashing rules
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$...`) with a random
//! salt, so hashing the same password twice gives different strings.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde_json::Value;
use tracing::debug;

use crate::message::value_repr;
use crate::rule::{RuleContext, RuleOutcome, RuleResult};

/// Replace a password with its Argon2id hash
pub fn to_password_hash(value: &mut Value, _ctx: &RuleContext<'_>) -> RuleResult {
    if value.is_array() || value.is_object() || value.is_null() {
        return Ok(RuleOutcome::fail("%s must be a password."));
    }

    let password = value_repr(value);
    let salt = SaltString::generate(&mut OsRng);

    match Argon2::default().hash_password(password.as_bytes(), &salt) {
        Ok(hash) => {
            *value = Value::String(hash.to_string());
            Ok(RuleOutcome::Continue)
        }
        Err(err) => {
            debug!(error = %err, "password hashing failed");
            Ok(RuleOutcome::fail("%s could not be hashed."))
        }
    }
}

/// `passwordVerify[hash]`: the value must match `hash`; it is left as-is.
///
/// The whole option text is the hash, since PHC strings contain commas.
pub fn password_verify(value: &mut Value, ctx: &RuleContext<'_>) -> RuleResult {
    if !ctx.has_options() {
        return Err(ctx.invalid_option("expected a password hash"));
    }
    let hash = PasswordHash::new(ctx.options())
        .map_err(|err| ctx.invalid_option(format!("malformed password hash: {err}")))?;

    let ok = value.as_str().is_some_and(|password| {
        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    });
    Ok(RuleOutcome::check(ok, "%s does not match."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::tests::run;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn hash_then_verify() {
        let (outcome, hashed) = run("toPasswordHash", json!("DefaultPassword#1"));
        assert_eq!(outcome, RuleOutcome::Continue);

        let hash = hashed.as_str().unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let (outcome, value) = run(&format!("passwordVerify[{hash}]"), json!("DefaultPassword#1"));
        assert_eq!(outcome, RuleOutcome::Continue);
        assert_eq!(value, json!("DefaultPassword#1"));

        let (outcome, _) = run(&format!("passwordVerify[{hash}]"), json!("wrong"));
        assert_eq!(outcome, RuleOutcome::fail("%s does not match."));
    }

    #[test]
    fn salts_differ() {
        let (_, first) = run("toPasswordHash", json!("secret"));
        let (_, second) = run("toPasswordHash", json!("secret"));
        assert_ne!(first, second);
    }
}
