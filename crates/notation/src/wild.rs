//! Wildcard path reads
//!
//! `users.*.name` walks every child of `users` and collects the `name` of
//! each. Matches are gathered in depth-first document order; a single match
//! is returned as-is rather than wrapped in a list.

use serde_json::Value;

use crate::error::{NotationError, NotationResult};

/// Default wildcard token
pub const DEFAULT_WILDCARD: &str = "*";

/// Key of a child inside its parent container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathKey<'a> {
    Name(&'a str),
    Index(usize),
}

/// Read-only resolver for paths containing wildcard segments.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sift_notation::WildNotation;
///
/// let data = json!({"users": [{"name": "Alice"}, {"name": "Bob"}]});
/// let wild = WildNotation::default();
///
/// assert_eq!(wild.get(&data, "users.*.name", json!(null)), json!(["Alice", "Bob"]));
/// assert_eq!(wild.get(&data, "users.1.name", json!(null)), json!("Bob"));
/// assert_eq!(wild.get(&data, "users.*.email", json!("not found")), json!("not found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildNotation {
    delimiter: String,
    wildcard: String,
}

impl WildNotation {
    /// Create a resolver with the default `.` delimiter and `*` wildcard.
    pub fn new() -> Self {
        Self {
            delimiter: crate::notation::DEFAULT_DELIMITER.to_owned(),
            wildcard: DEFAULT_WILDCARD.to_owned(),
        }
    }

    /// The segment delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// The wildcard token
    pub fn wildcard(&self) -> &str {
        &self.wildcard
    }

    /// Set the segment delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`NotationError::EmptyDelimiter`] for an empty string.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> NotationResult<&mut Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(NotationError::EmptyDelimiter);
        }
        self.delimiter = delimiter;
        Ok(self)
    }

    /// Set the wildcard token.
    ///
    /// # Errors
    ///
    /// Returns [`NotationError::EmptyWildcard`] for an empty string.
    pub fn set_wildcard(&mut self, wildcard: impl Into<String>) -> NotationResult<&mut Self> {
        let wildcard = wildcard.into();
        if wildcard.is_empty() {
            return Err(NotationError::EmptyWildcard);
        }
        self.wildcard = wildcard;
        Ok(self)
    }

    /// Resolve `path` against `data`.
    ///
    /// Resolution order:
    /// 1. a root key spelled exactly like `path` wins, delimiters and all;
    /// 2. a lone wildcard returns the whole structure;
    /// 3. otherwise every node at depth `segments.len()` whose pathway
    ///    matches segment-by-segment is collected. No match yields
    ///    `default`, one match yields that value, several yield a list.
    pub fn get(&self, data: &Value, path: &str, default: Value) -> Value {
        if let Some(exact) = root_child(data, path) {
            return exact.clone();
        }

        if path == self.wildcard {
            return data.clone();
        }

        let segments: Vec<&str> = path.split(self.delimiter.as_str()).collect();
        let mut found = Vec::new();
        self.collect(data, &segments, &mut found);

        match found.len() {
            0 => default,
            1 => found[0].clone(),
            _ => Value::Array(found.into_iter().cloned().collect()),
        }
    }

    /// Whether `path` ends in the wildcard token
    pub fn ends_with_wildcard(&self, path: &str) -> bool {
        path.ends_with(self.wildcard.as_str())
    }

    fn collect<'a>(&self, node: &'a Value, segments: &[&str], found: &mut Vec<&'a Value>) {
        let Some((segment, rest)) = segments.split_first() else {
            return;
        };

        for (key, child) in children(node) {
            if !self.segment_matches(segment, key) {
                continue;
            }
            if rest.is_empty() {
                found.push(child);
            } else {
                self.collect(child, rest, found);
            }
        }
    }

    fn segment_matches(&self, segment: &str, key: PathKey<'_>) -> bool {
        if segment == self.wildcard {
            return true;
        }

        match key {
            PathKey::Name(name) => name == segment,
            PathKey::Index(index) => is_digits(segment) && segment.parse::<usize>() == Ok(index),
        }
    }
}

impl Default for WildNotation {
    fn default() -> Self {
        Self::new()
    }
}

fn is_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn root_child<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    match data {
        Value::Object(map) => map.get(key),
        Value::Array(items) if is_digits(key) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn children(node: &Value) -> Vec<(PathKey<'_>, &Value)> {
    match node {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (PathKey::Name(key.as_str()), value))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| (PathKey::Index(index), value))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn people() -> Value {
        json!({
            "users": [
                {"name": "Alice", "age": 30},
                {"name": "Bob", "age": 25}
            ],
            "settings": {"theme": "dark", "notifications": true}
        })
    }

    #[test]
    fn wildcard_collects_in_document_order() {
        let wild = WildNotation::default();
        assert_eq!(wild.get(&people(), "users.*.age", Value::Null), json!([30, 25]));
    }

    #[test]
    fn plain_path_without_wildcard() {
        let wild = WildNotation::default();
        assert_eq!(wild.get(&people(), "settings.theme", Value::Null), json!("dark"));
    }

    #[test]
    fn lone_wildcard_returns_root() {
        let wild = WildNotation::default();
        assert_eq!(wild.get(&people(), "*", Value::Null), people());
    }

    #[test]
    fn exact_root_key_wins_over_traversal() {
        let wild = WildNotation::default();
        let data = json!({"a.b": "literal", "a": {"b": "nested"}});
        assert_eq!(wild.get(&data, "a.b", Value::Null), json!("literal"));
    }

    #[test]
    fn wildcard_in_final_position_collects_containers() {
        let wild = WildNotation::default();
        assert_eq!(
            wild.get(&people(), "users.*", Value::Null),
            json!([{"name": "Alice", "age": 30}, {"name": "Bob", "age": 25}])
        );
    }

    #[test]
    fn numeric_segment_does_not_match_signed_text() {
        let wild = WildNotation::default();
        assert_eq!(wild.get(&people(), "users.+1.name", json!("none")), json!("none"));
    }

    #[test]
    fn wildcard_matches_object_members() {
        let wild = WildNotation::default();
        let data = json!({"teams": {"red": {"size": 3}, "blue": {"size": 5}}});
        assert_eq!(wild.get(&data, "teams.*.size", Value::Null), json!([3, 5]));
    }

    #[test]
    fn empty_configuration_is_rejected() {
        let mut wild = WildNotation::default();
        assert_eq!(wild.set_delimiter("").unwrap_err(), NotationError::EmptyDelimiter);
        assert_eq!(wild.set_wildcard("").unwrap_err(), NotationError::EmptyWildcard);
        assert_eq!(wild.delimiter(), ".");
        assert_eq!(wild.wildcard(), "*");
    }

    #[test]
    fn custom_tokens() {
        let mut wild = WildNotation::default();
        wild.set_delimiter("/").unwrap().set_wildcard("?").unwrap();
        assert_eq!(wild.get(&people(), "users/?/name", Value::Null), json!(["Alice", "Bob"]));
        assert!(wild.ends_with_wildcard("users/?"));
    }
}
