//! Error message rendering
//!
//! Templates are printf-style and receive four positional arguments, in
//! order: the human label, the formatted options, the rule name and the
//! rejected input.
//!
//! | directive | meaning |
//! |---|---|
//! | `%s` | next argument |
//! | `%d` | next argument as an integer (leading digits, else `0`) |
//! | `%2$s` | argument 2 |
//! | `%%` | a literal `%` |

use serde_json::Value;

/// Label used when neither a label nor a key is available
pub const DEFAULT_HUMAN: &str = "input";

/// Interpolate `template` with positional `args`.
///
/// Missing arguments render as an empty string; unknown directives are
/// copied through untouched.
pub fn interpolate(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut next = 0usize;
    let mut rest = template;

    while let Some(percent) = rest.find('%') {
        out.push_str(&rest[..percent]);
        let directive = &rest[percent + 1..];

        if let Some(after) = directive.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }

        let digits = directive.bytes().take_while(u8::is_ascii_digit).count();
        let (position, spec) = if digits > 0 && directive[digits..].starts_with('$') {
            let index = directive[..digits].parse::<usize>().unwrap_or(0);
            (Some(index), &directive[digits + 1..])
        } else {
            (None, directive)
        };

        let conversion = spec.chars().next();
        let argument = |index: usize| args.get(index).copied().unwrap_or("");

        match conversion {
            Some(kind @ ('s' | 'd')) => {
                let index = match position {
                    Some(position) => position.saturating_sub(1),
                    None => {
                        next += 1;
                        next - 1
                    }
                };
                let text = argument(index);
                if kind == 's' {
                    out.push_str(text);
                } else {
                    out.push_str(&leading_integer(text).to_string());
                }
                rest = &spec[1..];
            }
            _ => {
                out.push('%');
                rest = directive;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Render raw options for a message: `a,b,c` becomes `a, b or c`.
pub fn nice_options(options: &str, delimiter: &str) -> String {
    if delimiter.is_empty() || !options.contains(delimiter) {
        return options.to_owned();
    }

    let joiner = format!("{delimiter} ");
    let spaced = options.replace(delimiter, &joiner);

    match spaced.rfind(&joiner) {
        Some(pos) => format!("{} or {}", &spaced[..pos], &spaced[pos + joiner.len()..]),
        None => spaced,
    }
}

/// Label for a field: the explicit label, else the key with underscores
/// as spaces, lowercased.
pub fn human_label(human: Option<&str>, key: &str) -> String {
    match human {
        Some(human) => human.to_owned(),
        None if key.is_empty() => DEFAULT_HUMAN.to_owned(),
        None => key.replace('_', " ").to_lowercase(),
    }
}

/// String form of a value for the input slot of a message.
///
/// Strings are used as-is, `null` is empty, containers are compact JSON.
pub fn value_repr(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    trimmed[..sign_len + digits].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    const ARGS: [&str; 4] = ["age", "100", "isGreaterThan", "50"];

    #[rstest]
    #[case("%s is not valid.", "age is not valid.")]
    #[case("%s must be greater than %s.", "age must be greater than 100.")]
    #[case("%4$s is not %3$s", "50 is not isGreaterThan")]
    #[case("%1$s at 100%%", "age at 100%")]
    #[case("%d", "0")]
    #[case("%4$d items", "50 items")]
    #[case("%s %s %s %s %s", "age 100 isGreaterThan 50 ")]
    #[case("50%", "50%")]
    #[case("%x stays", "%x stays")]
    fn interpolation(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(interpolate(template, &ARGS), expected);
    }

    #[rstest]
    #[case("", "")]
    #[case("100", "100")]
    #[case("a,b", "a or b")]
    #[case("red,green,blue", "red, green or blue")]
    fn options_read_naturally(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(nice_options(raw, ","), expected);
    }

    #[rstest]
    #[case(Some("Your Age"), "age", "Your Age")]
    #[case(None, "first_name", "first name")]
    #[case(None, "User_ID", "user id")]
    #[case(None, "", "input")]
    fn labels(#[case] human: Option<&str>, #[case] key: &str, #[case] expected: &str) {
        assert_eq!(human_label(human, key), expected);
    }

    #[test]
    fn value_representation() {
        assert_eq!(value_repr(&json!(null)), "");
        assert_eq!(value_repr(&json!("abc")), "abc");
        assert_eq!(value_repr(&json!(12)), "12");
        assert_eq!(value_repr(&json!(false)), "false");
        assert_eq!(value_repr(&json!([1, 2])), "[1,2]");
    }
}
