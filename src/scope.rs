//! Scope access for lookups.

use std::collections::{BTreeMap, HashMap};

/// Name of the scope variable that selects the key prefix.
pub const ENVIRONMENT_VAR: &str = "environment";

/// Variables a lookup is resolved against.
///
/// The backend only ever asks for [`ENVIRONMENT_VAR`] plus whatever the
/// `env` template references. Plain maps implement this directly; hosts with
/// their own scope object implement `lookup_var`.
pub trait Scope: Send + Sync {
    /// Returns the value of `name`, or `None` if it is not set.
    fn lookup_var(&self, name: &str) -> Option<String>;

    /// Returns the environment, treating an empty value as unset.
    fn environment(&self) -> Option<String> {
        self.lookup_var(ENVIRONMENT_VAR).filter(|env| !env.is_empty())
    }
}

impl Scope for HashMap<String, String> {
    fn lookup_var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Scope for BTreeMap<String, String> {
    fn lookup_var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Scope for serde_json::Map<String, serde_json::Value> {
    fn lookup_var(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
