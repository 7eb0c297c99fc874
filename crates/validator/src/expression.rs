//! Rule-chain parsing
//!
//! A chain is a delimited list of rule tokens, each `name` or
//! `name[options]`:
//!
//! ```text
//! trim|toInteger|isBetween[1,10]
//! ```
//!
//! Options stay a raw string here; splitting them into positional values
//! is up to the rule that reads them (see [`RuleContext`](crate::RuleContext)).
//!
//! The JSON variant addresses values by path inside the token instead:
//!
//! ```text
//! isString(person.name.first)
//! isOneOf(person.color)[red,green]
//! isOneOf(person.color),red,green
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ValidatorConfig;
use crate::error::ConfigError;

static PATH_RULE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?<rule>[^(]+)\((?<path>[^)]+)\)(?<options>.*)$").unwrap());

// ============================================================================
// RULE CALL
// ============================================================================

/// One parsed rule token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCall {
    /// Name as written, used in error messages
    pub name: String,
    /// Raw option text between the option brackets
    pub options: String,
    /// The token exactly as it appeared in the chain
    pub raw: String,
}

impl RuleCall {
    /// Split a token into name and options.
    ///
    /// The name runs up to the first `left` bracket and the options up to
    /// the last `right` bracket, so options may themselves contain
    /// brackets. A token without a closing bracket is all name.
    pub fn parse(token: &str, left: &str, right: &str) -> Self {
        let bracketed = token.find(left).and_then(|open| {
            let start = open + left.len();
            token[start..]
                .rfind(right)
                .map(|close| (open, start, start + close))
        });

        let (name, options) = match bracketed {
            Some((open, start, end)) => (&token[..open], &token[start..end]),
            None => (token, ""),
        };

        Self {
            name: name.trim().to_owned(),
            options: options.to_owned(),
            raw: token.to_owned(),
        }
    }

    /// Whether the token named no rule at all
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }
}

// ============================================================================
// RULE SPEC
// ============================================================================

/// An ordered, parsed rule chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSpec {
    calls: Vec<RuleCall>,
}

impl RuleSpec {
    /// Parse a delimited chain using the configured delimiters.
    pub fn parse(chain: &str, config: &ValidatorConfig) -> Self {
        Self::from_tokens(chain.split(config.rule_delimiter.as_str()), config)
    }

    /// Accept a pre-split chain; tokens are not split again.
    pub fn from_tokens<I, S>(tokens: I, config: &ValidatorConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let calls = tokens
            .into_iter()
            .map(|token| {
                RuleCall::parse(
                    token.as_ref(),
                    &config.option_left_delimiter,
                    &config.option_right_delimiter,
                )
            })
            .collect();

        Self { calls }
    }

    /// Parsed calls in chain order
    pub fn calls(&self) -> &[RuleCall] {
        &self.calls
    }

    /// Returns the number of tokens, blanks included.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Returns true if the chain holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Anything the engine accepts as a rule chain.
///
/// A string is split on the rule delimiter; a list is taken as already
/// split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rules {
    /// A delimited chain such as `"trim|required"`
    Chain(String),
    /// Pre-split tokens such as `["trim", "required"]`
    List(Vec<String>),
}

impl Rules {
    /// Parse with the configured delimiters
    pub fn to_spec(&self, config: &ValidatorConfig) -> RuleSpec {
        match self {
            Self::Chain(chain) => RuleSpec::parse(chain, config),
            Self::List(tokens) => RuleSpec::from_tokens(tokens, config),
        }
    }
}

impl From<&str> for Rules {
    fn from(chain: &str) -> Self {
        Self::Chain(chain.to_owned())
    }
}

impl From<String> for Rules {
    fn from(chain: String) -> Self {
        Self::Chain(chain)
    }
}

impl From<&String> for Rules {
    fn from(chain: &String) -> Self {
        Self::Chain(chain.clone())
    }
}

impl From<Vec<String>> for Rules {
    fn from(tokens: Vec<String>) -> Self {
        Self::List(tokens)
    }
}

impl From<Vec<&str>> for Rules {
    fn from(tokens: Vec<&str>) -> Self {
        Self::List(tokens.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Rules {
    fn from(tokens: [&str; N]) -> Self {
        Self::List(tokens.into_iter().map(str::to_owned).collect())
    }
}

// ============================================================================
// PATH RULE (JSON VARIANT)
// ============================================================================

/// A `rule(path)` expression from the JSON variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRule {
    /// Wildcard path to resolve
    pub path: String,
    /// Rule token to apply to the resolved value, in `name[options]` form
    pub rule: String,
}

impl PathRule {
    /// Parse `name(path)`, `name(path)[options]` or `name(path),options`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidExpression`] when no `(path)` group is present.
    pub fn parse(expression: &str, config: &ValidatorConfig) -> Result<Self, ConfigError> {
        let captures = PATH_RULE_REGEX
            .captures(expression.trim())
            .ok_or_else(|| ConfigError::invalid_expression(expression))?;

        let name = captures["rule"].trim();
        let path = captures["path"].trim();
        let trailing = captures["options"].trim();

        let option_delimiter = config.default_option_delimiter.as_str();
        let rule = if trailing.is_empty() {
            name.to_owned()
        } else if let Some(options) = trailing.strip_prefix(option_delimiter) {
            format!(
                "{name}{}{options}{}",
                config.option_left_delimiter, config.option_right_delimiter
            )
        } else {
            format!("{name}{trailing}")
        };

        Ok(Self {
            path: path.to_owned(),
            rule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("required", "required", "")]
    #[case("isGreaterThan[100]", "isGreaterThan", "100")]
    #[case("isBetween[1,10]", "isBetween", "1,10")]
    #[case("default[[]]", "default", "[]")]
    #[case("isOneOf[a]trailing", "isOneOf", "a")]
    #[case("unclosed[abc", "unclosed[abc", "")]
    #[case(" trim ", "trim", "")]
    fn splits_name_and_options(#[case] token: &str, #[case] name: &str, #[case] options: &str) {
        let call = RuleCall::parse(token, "[", "]");
        assert_eq!(call.name, name);
        assert_eq!(call.options, options);
        assert_eq!(call.raw, token);
    }

    #[test]
    fn chain_splits_on_configured_delimiter() {
        let config = ValidatorConfig::default().with_rule_delimiter(";");
        let spec = RuleSpec::parse("trim;isBetween[1|2]", &config);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.calls()[1].options, "1|2");
        assert_eq!(spec.calls()[0].raw, "trim");
    }

    #[test]
    fn pre_split_tokens_are_not_split_again() {
        let config = ValidatorConfig::default();
        let spec = Rules::from(["isOneOf[a|b]", "required"]).to_spec(&config);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.calls()[0].options, "a|b");
    }

    #[test]
    fn custom_option_brackets() {
        let config = ValidatorConfig::default().with_option_delimiters("<", ">");
        let spec = RuleSpec::parse("isLessThan<5>", &config);
        assert_eq!(spec.calls()[0].name, "isLessThan");
        assert_eq!(spec.calls()[0].options, "5");
    }

    #[rstest]
    #[case("isString(person.name.first)", "person.name.first", "isString")]
    #[case("isGreaterThan(a.b)[5]", "a.b", "isGreaterThan[5]")]
    #[case("isOneOf(person.color),red,green", "person.color", "isOneOf[red,green]")]
    #[case("isArray(people.*)", "people.*", "isArray")]
    fn path_rules(#[case] expression: &str, #[case] path: &str, #[case] rule: &str) {
        let parsed = PathRule::parse(expression, &ValidatorConfig::default()).unwrap();
        assert_eq!(parsed.path, path);
        assert_eq!(parsed.rule, rule);
    }

    #[test]
    fn path_rule_without_path_is_invalid() {
        let err = PathRule::parse("isString", &ValidatorConfig::default()).unwrap_err();
        assert_eq!(err, ConfigError::invalid_expression("isString"));
    }
}
