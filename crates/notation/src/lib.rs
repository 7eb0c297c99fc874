//! # sift-notation
//!
//! Path addressing over nested `serde_json::Value` trees.
//!
//! - [`Notation`] reads and writes through strict dot-notation paths
//!   (`user.address.city`, `items.0.id`), and converts between nested and
//!   flat representations with [`Notation::flatten`] / [`Notation::expand`].
//! - [`WildNotation`] reads through paths containing a wildcard segment
//!   (`users.*.email`), collecting every match.
//!
//! ```
//! use serde_json::json;
//! use sift_notation::{Notation, WildNotation};
//!
//! let mut data = json!({"users": [{"name": "Alice"}, {"name": "Bob"}]});
//!
//! Notation::default()
//!     .set(&mut data, "users.1.name", json!("Robert"))
//!     .unwrap();
//!
//! let names = WildNotation::default().get(&data, "users.*.name", json!([]));
//! assert_eq!(names, json!(["Alice", "Robert"]));
//! ```

pub mod error;
pub mod notation;
pub mod wild;

pub use error::{NotationError, NotationResult};
pub use notation::{DEFAULT_DELIMITER, Notation};
pub use wild::{DEFAULT_WILDCARD, WildNotation};

use serde_json::Value;

/// Get the type name of a Value for error messages
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
