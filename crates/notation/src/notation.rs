//! Strict dot-notation access into nested values
//!
//! Paths are split on a configurable delimiter (`.` by default) and walked
//! segment by segment: object members are addressed by key, list items by
//! their numeric index. An empty delimiter turns path drilling off so every
//! key is treated as a flat, top-level key.

use serde_json::{Map, Value};

use crate::error::{NotationError, NotationResult};
use crate::value_type_name;

/// Default segment delimiter
pub const DEFAULT_DELIMITER: &str = ".";

/// Dot-notation resolver over `serde_json::Value` trees.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sift_notation::Notation;
///
/// let notation = Notation::default();
/// let mut data = json!({});
///
/// notation.set(&mut data, "user.name", json!("Alice")).unwrap();
/// assert_eq!(notation.get(&data, "user.name", json!(null)), json!("Alice"));
/// assert!(notation.isset(&data, "user"));
/// assert!(!notation.isset(&data, "user.email"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notation {
    delimiter: String,
}

impl Notation {
    /// Create a resolver splitting paths on `delimiter`.
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Create a resolver with path drilling disabled.
    pub fn flat() -> Self {
        Self::new("")
    }

    /// The current delimiter (empty when drilling is disabled)
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Whether keys are treated as flat, top-level keys
    pub fn is_flat(&self) -> bool {
        self.delimiter.is_empty()
    }

    /// Change the delimiter. An empty delimiter disables path drilling.
    pub fn change_delimiter(&mut self, delimiter: impl Into<String>) -> &mut Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Split a path into segments. A path without the delimiter is a
    /// single segment.
    pub fn segments<'p>(&self, path: &'p str) -> Vec<&'p str> {
        if self.is_flat() || !path.contains(self.delimiter.as_str()) {
            vec![path]
        } else {
            path.split(self.delimiter.as_str()).collect()
        }
    }

    /// Borrow the value at `path`, or `None` when any segment is absent.
    ///
    /// A present `null` is still `Some(&Value::Null)`.
    pub fn lookup<'a>(&self, data: &'a Value, path: &str) -> Option<&'a Value> {
        self.segments(path)
            .into_iter()
            .try_fold(data, |node, segment| child(node, segment))
    }

    /// Get a copy of the value at `path`, or `default` when it is absent.
    pub fn get(&self, data: &Value, path: &str, default: Value) -> Value {
        self.lookup(data, path).cloned().unwrap_or(default)
    }

    /// Whether `path` resolves to a value, including a present `null`.
    pub fn isset(&self, data: &Value, path: &str) -> bool {
        self.lookup(data, path).is_some()
    }

    /// Assign `value` at `path`, creating empty objects for every missing
    /// (or `null`) intermediate segment.
    ///
    /// # Errors
    ///
    /// Fails when the walk has to pass through a scalar, or when a
    /// non-numeric segment addresses a list.
    pub fn set(&self, data: &mut Value, path: &str, value: Value) -> NotationResult<()> {
        let segments = self.segments(path);
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut node = data;
        for segment in parents {
            node = child_or_insert(node, segment)?;
        }

        assign(node, last, value)
    }

    /// Remove the value at `path`.
    ///
    /// The walk mirrors [`set`](Self::set): missing intermediates are
    /// created on the way down, so unsetting an absent nested path leaves
    /// empty objects behind.
    ///
    /// # Errors
    ///
    /// Same conditions as [`set`](Self::set).
    pub fn unset(&self, data: &mut Value, path: &str) -> NotationResult<()> {
        let segments = self.segments(path);
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut node = data;
        for segment in parents {
            node = child_or_insert(node, segment)?;
        }

        remove(node, last)
    }

    /// Flatten nested containers into a single-level map whose keys are the
    /// delimiter-joined paths. Empty containers and scalars are leaves.
    ///
    /// ```
    /// use serde_json::json;
    /// use sift_notation::Notation;
    ///
    /// let flat = Notation::default().flatten(&json!({"a": {"b": 1, "c": []}}), "");
    /// assert_eq!(flat.get("a.b"), Some(&json!(1)));
    /// assert_eq!(flat.get("a.c"), Some(&json!([])));
    /// ```
    pub fn flatten(&self, data: &Value, prefix: &str) -> Map<String, Value> {
        let mut flat = Map::new();
        self.flatten_into(data, prefix, &mut flat);
        flat
    }

    fn flatten_into(&self, data: &Value, prefix: &str, flat: &mut Map<String, Value>) {
        let mut visit = |key: &str, value: &Value| {
            if is_non_empty_container(value) {
                let nested = format!("{prefix}{key}{}", self.delimiter);
                self.flatten_into(value, &nested, flat);
            } else {
                flat.insert(format!("{prefix}{key}"), value.clone());
            }
        };

        match data {
            Value::Object(map) => map.iter().for_each(|(key, value)| visit(key.as_str(), value)),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .for_each(|(index, value)| visit(&index.to_string(), value)),
            _ => {}
        }
    }

    /// Rebuild a nested object from a flat map produced by
    /// [`flatten`](Self::flatten).
    ///
    /// # Errors
    ///
    /// Fails when one key addresses a path below another key's scalar
    /// value (e.g. both `a` and `a.b` are present, in that order).
    pub fn expand(&self, flat: &Map<String, Value>) -> NotationResult<Value> {
        let mut nested = Value::Object(Map::new());
        for (key, value) in flat {
            self.set(&mut nested, key, value.clone())?;
        }
        Ok(nested)
    }
}

impl Default for Notation {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

fn is_non_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn parse_index(segment: &str) -> NotationResult<usize> {
    segment
        .parse::<usize>()
        .map_err(|_| NotationError::invalid_index(segment))
}

/// Index addressed by `segment` for a write: an existing element, or the
/// slot one past the end. Lists never grow gaps.
fn list_slot(items: &[Value], segment: &str) -> NotationResult<usize> {
    let index = parse_index(segment)?;
    if index > items.len() {
        return Err(NotationError::index_out_of_range(segment, items.len()));
    }
    Ok(index)
}

/// Step into `segment`, creating an empty object when it is missing or null.
fn child_or_insert<'a>(node: &'a mut Value, segment: &str) -> NotationResult<&'a mut Value> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }

    let slot = match node {
        Value::Object(map) => map.entry(segment).or_insert(Value::Null),
        Value::Array(items) => {
            let index = list_slot(items, segment)?;
            if index == items.len() {
                items.push(Value::Null);
            }
            &mut items[index]
        }
        other => return Err(NotationError::not_a_container(segment, value_type_name(other))),
    };

    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    Ok(slot)
}

fn assign(node: &mut Value, segment: &str, value: Value) -> NotationResult<()> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }

    match node {
        Value::Object(map) => {
            map.insert(segment.to_owned(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = list_slot(items, segment)?;
            if index == items.len() {
                items.push(value);
            } else {
                items[index] = value;
            }
            Ok(())
        }
        other => Err(NotationError::not_a_container(segment, value_type_name(other))),
    }
}

fn remove(node: &mut Value, segment: &str) -> NotationResult<()> {
    match node {
        Value::Object(map) => {
            map.shift_remove(segment);
            Ok(())
        }
        Value::Array(items) => {
            // list keys are indices; anything else names nothing to remove
            if let Ok(index) = segment.parse::<usize>()
                && index < items.len()
            {
                items.remove(index);
            }
            Ok(())
        }
        Value::Null => Ok(()),
        other => Err(NotationError::not_a_container(segment, value_type_name(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn flat_key_fast_path_ignores_nesting() {
        let notation = Notation::default();
        let data = json!({"name": "Alice", "user": {"name": "Bob"}});
        assert_eq!(notation.get(&data, "name", Value::Null), json!("Alice"));
    }

    #[test]
    fn empty_delimiter_treats_dotted_keys_as_flat() {
        let notation = Notation::flat();
        let mut data = json!({"a.b": 1, "a": {"b": 2}});
        assert_eq!(notation.get(&data, "a.b", Value::Null), json!(1));

        notation.set(&mut data, "x.y", json!(3)).unwrap();
        assert_eq!(data["x.y"], json!(3));
        assert!(data.get("x").is_none());
    }

    #[test]
    fn list_segments_are_indices() {
        let notation = Notation::default();
        let data = json!({"items": [{"id": 10}, {"id": 20}]});
        assert_eq!(notation.get(&data, "items.1.id", Value::Null), json!(20));
        assert_eq!(notation.get(&data, "items.x.id", json!("none")), json!("none"));
        assert_eq!(notation.get(&data, "items.5.id", json!("none")), json!("none"));
    }

    #[test]
    fn scalar_in_the_middle_short_circuits_to_default() {
        let notation = Notation::default();
        let data = json!({"a": "text"});
        assert_eq!(notation.get(&data, "a.b", json!(false)), json!(false));
    }

    #[test]
    fn set_creates_intermediates() {
        let notation = Notation::default();
        let mut data = json!({"keep": true});
        notation.set(&mut data, "a.b.c", json!(42)).unwrap();
        assert_eq!(data, json!({"keep": true, "a": {"b": {"c": 42}}}));
    }

    #[test]
    fn set_replaces_null_intermediates() {
        let notation = Notation::default();
        let mut data = json!({"a": null});
        notation.set(&mut data, "a.b", json!(1)).unwrap();
        assert_eq!(data, json!({"a": {"b": 1}}));
    }

    #[test]
    fn set_into_list_replaces_and_appends() {
        let notation = Notation::default();
        let mut data = json!({"list": [1]});
        notation.set(&mut data, "list.0", json!(9)).unwrap();
        notation.set(&mut data, "list.1", json!(7)).unwrap();
        notation.set(&mut data, "list.2.name", json!("x")).unwrap();
        assert_eq!(data, json!({"list": [9, 7, {"name": "x"}]}));
    }

    #[test]
    fn set_past_the_end_of_a_list_leaves_no_gap() {
        let notation = Notation::default();
        let mut data = json!({"list": [1]});

        let err = notation.set(&mut data, "list.3", json!(7)).unwrap_err();
        assert_eq!(err, NotationError::index_out_of_range("3", 1));
        assert_eq!(data, json!({"list": [1]}));
        assert!(!notation.isset(&data, "list.2"));
        assert!(!notation.isset(&data, "list.3"));
    }

    #[test]
    fn huge_list_index_is_an_error() {
        let notation = Notation::default();
        let mut data = json!({"list": [1]});

        let err = notation
            .set(&mut data, "list.18446744073709551615", json!(2))
            .unwrap_err();
        assert_eq!(err, NotationError::index_out_of_range("18446744073709551615", 1));

        let err = notation.set(&mut data, "list.4000000000.a", json!(2)).unwrap_err();
        assert_eq!(err, NotationError::index_out_of_range("4000000000", 1));
        assert_eq!(data, json!({"list": [1]}));
    }

    #[test]
    fn unset_list_element_shifts_later_indices() {
        let notation = Notation::default();
        let mut data = json!({"items": ["a", "b", "c"]});

        notation.unset(&mut data, "items.0").unwrap();
        assert_eq!(data, json!({"items": ["b", "c"]}));
        assert_eq!(notation.get(&data, "items.0", Value::Null), json!("b"));
        assert!(!notation.isset(&data, "items.2"));

        notation.unset(&mut data, "items.9").unwrap();
        assert_eq!(data, json!({"items": ["b", "c"]}));
    }

    #[test]
    fn set_through_scalar_fails() {
        let notation = Notation::default();
        let mut data = json!({"a": 5});
        let err = notation.set(&mut data, "a.b", json!(1)).unwrap_err();
        assert_eq!(err, NotationError::not_a_container("b", "number"));
    }

    #[test]
    fn set_on_null_root_vivifies_an_object() {
        let notation = Notation::default();
        let mut data = Value::Null;
        notation.set(&mut data, "name", json!("x")).unwrap();
        assert_eq!(data, json!({"name": "x"}));
    }

    #[test]
    fn unset_removes_leaf_and_keeps_siblings_in_order() {
        let notation = Notation::default();
        let mut data = json!({"a": {"x": 1, "y": 2, "z": 3}});
        notation.unset(&mut data, "a.y").unwrap();
        assert_eq!(data, json!({"a": {"x": 1, "z": 3}}));
        let keys: Vec<_> = data["a"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["x", "z"]);
    }

    #[test]
    fn unset_absent_path_creates_intermediates() {
        let notation = Notation::default();
        let mut data = json!({});
        notation.unset(&mut data, "a.b.c").unwrap();
        assert_eq!(data, json!({"a": {"b": {}}}));
    }

    #[test]
    fn unset_single_segment_does_not_create_anything() {
        let notation = Notation::default();
        let mut data = json!({"a": 1});
        notation.unset(&mut data, "missing").unwrap();
        assert_eq!(data, json!({"a": 1}));
    }

    #[test]
    fn flatten_uses_prefix_and_keeps_empty_containers() {
        let notation = Notation::default();
        let flat = notation.flatten(&json!({"a": {"b": [1, 2], "c": {}}, "d": null}), "root.");
        assert_eq!(
            Value::Object(flat),
            json!({"root.a.b.0": 1, "root.a.b.1": 2, "root.a.c": {}, "root.d": null})
        );
    }

    #[test]
    fn expand_rebuilds_nesting() {
        let notation = Notation::default();
        let mut flat = Map::new();
        flat.insert("a.b".into(), json!(1));
        flat.insert("a.c".into(), json!(2));
        flat.insert("d".into(), json!("x"));
        assert_eq!(
            notation.expand(&flat).unwrap(),
            json!({"a": {"b": 1, "c": 2}, "d": "x"})
        );
    }

    #[test]
    fn custom_delimiter() {
        let mut notation = Notation::default();
        notation.change_delimiter("/");
        let data = json!({"a": {"b": 1}});
        assert_eq!(notation.get(&data, "a/b", Value::Null), json!(1));
        assert_eq!(notation.get(&data, "a.b", json!("none")), json!("none"));
    }
}
