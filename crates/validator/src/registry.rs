//! Rule registry
//!
//! Resolution is two-level. A rule name (case-insensitive) maps to a
//! handler id such as `compare::greater_than`, and the handler id maps to
//! the [`Rule`] that runs. Several names may share one handler
//! (`isInt` and `isInteger`), and a name can be re-pointed at another
//! handler without touching the handler table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::builtins;
use crate::error::ConfigError;
use crate::rule::Rule;

/// Name and handler tables for rule lookup.
///
/// Cloning is cheap: handlers are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    names: HashMap<String, String>,
    handlers: HashMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in rule catalog
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register_all(&mut registry);
        registry
    }

    /// Point rule `name` at handler id `handler`
    pub fn add_rule(&mut self, name: impl AsRef<str>, handler: impl Into<String>) -> &mut Self {
        let name = name.as_ref().to_lowercase();
        let handler = handler.into();
        debug!(rule = %name, handler = %handler, "rule mapped");
        self.names.insert(name, handler);
        self
    }

    /// Point several rule names at their handler ids
    pub fn add_rules<I, N, H>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, H)>,
        N: AsRef<str>,
        H: Into<String>,
    {
        for (name, handler) in rules {
            self.add_rule(name, handler);
        }
        self
    }

    /// Register a handler under `id`
    pub fn register_handler(&mut self, id: impl Into<String>, rule: impl Rule + 'static) -> &mut Self {
        let id = id.into();
        debug!(handler = %id, "handler registered");
        self.handlers.insert(id, Arc::new(rule));
        self
    }

    /// Register a handler under `id` and point `names` at it
    pub fn register<R>(&mut self, id: &str, names: &[&str], rule: R) -> &mut Self
    where
        R: Rule + 'static,
    {
        self.register_handler(id, rule);
        for name in names {
            self.add_rule(name, id);
        }
        self
    }

    /// Resolve a rule name to its handler.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownRule`] for an unmapped name,
    /// [`ConfigError::UnknownHandler`] when the mapped id has no handler.
    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn Rule>, ConfigError> {
        let key = name.to_lowercase();
        let handler = self
            .names
            .get(&key)
            .ok_or_else(|| ConfigError::unknown_rule(&key))?;

        self.handlers
            .get(handler)
            .ok_or_else(|| ConfigError::unknown_handler(&key, handler))
    }

    /// Check if a rule name is mapped
    pub fn has_rule(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_lowercase())
    }

    /// Check if a handler id is registered
    pub fn has_handler(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Handler id a rule name maps to
    pub fn handler_id(&self, name: &str) -> Option<&str> {
        self.names.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get all rule names, sorted
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        handlers.sort_unstable();
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rule_names())
            .field("handlers", &handlers)
            .finish()
    }
}
