//! Notation error types.

use thiserror::Error;

/// Errors raised while configuring a resolver or writing through a path.
///
/// Reads never fail: a path that cannot be followed resolves to the
/// caller's default instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// The wildcard resolver was given an empty segment delimiter.
    #[error("The delimiter must not be an empty string.")]
    EmptyDelimiter,

    /// The wildcard resolver was given an empty wildcard token.
    #[error("The wildcard must not be an empty string.")]
    EmptyWildcard,

    /// A write had to descend through a value that holds no children.
    #[error("Cannot descend into {found} at segment '{segment}'")]
    NotAContainer { segment: String, found: &'static str },

    /// A non-numeric segment addressed a list.
    #[error("Segment '{segment}' is not a valid list index")]
    InvalidIndex { segment: String },

    /// A write addressed a list index past its end.
    #[error("Index '{segment}' is out of range for a list of {len} items")]
    IndexOutOfRange { segment: String, len: usize },
}

impl NotationError {
    /// Create a not-a-container error
    pub fn not_a_container(segment: impl Into<String>, found: &'static str) -> Self {
        Self::NotAContainer {
            segment: segment.into(),
            found,
        }
    }

    /// Create an invalid index error
    pub fn invalid_index(segment: impl Into<String>) -> Self {
        Self::InvalidIndex {
            segment: segment.into(),
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(segment: impl Into<String>, len: usize) -> Self {
        Self::IndexOutOfRange {
            segment: segment.into(),
            len,
        }
    }
}

/// Result alias for notation writes
pub type NotationResult<T> = Result<T, NotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_segment() {
        let err = NotationError::not_a_container("name", "string");
        assert_eq!(err.to_string(), "Cannot descend into string at segment 'name'");

        let err = NotationError::invalid_index("first");
        assert_eq!(err.to_string(), "Segment 'first' is not a valid list index");

        let err = NotationError::index_out_of_range("9", 2);
        assert_eq!(err.to_string(), "Index '9' is out of range for a list of 2 items");
    }
}
