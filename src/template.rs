//! Interpolation of the `env` prefix template.

use crate::Scope;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref INTERPOLATION_REGEX: Regex = Regex::new(r"%\{\s*(?:::)?([A-Za-z0-9_]+)\s*\}")
        .expect("interpolation regex is valid");
}

/// Substitutes `%{var}` and `%{::var}` in `template` with scope values.
///
/// Variables missing from the scope become the empty string.
///
/// ```
/// use std::collections::HashMap;
/// use secrets_lookup::template::interpolate;
///
/// let mut scope = HashMap::new();
/// scope.insert("environment".to_string(), "prod".to_string());
/// scope.insert("role".to_string(), "web".to_string());
///
/// assert_eq!(interpolate("%{::environment}/%{role}", &scope), "prod/web");
/// assert_eq!(interpolate("%{missing}-x", &scope), "-x");
/// ```
pub fn interpolate(template: &str, scope: &dyn Scope) -> String {
    INTERPOLATION_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            scope.lookup_var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scope() -> HashMap<String, String> {
        let mut scope = HashMap::new();
        scope.insert("environment".to_string(), "env1".to_string());
        scope
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(interpolate("static-prefix", &scope()), "static-prefix");
    }

    #[test]
    fn test_repeated_and_spaced_variables() {
        assert_eq!(
            interpolate("%{ environment }/%{::environment}", &scope()),
            "env1/env1"
        );
    }

    #[test]
    fn test_malformed_placeholder_left_alone() {
        assert_eq!(interpolate("%{environment", &scope()), "%{environment");
    }
}
