//! Key confinement from `confine_to_keys`.

use regex::Regex;

/// Allow-list of key patterns.
///
/// Patterns that fail to compile are logged and skipped; the remaining ones
/// still apply. A key is permitted when it fully matches any compiled
/// pattern, so an allow-list with nothing usable in it permits no key.
#[derive(Debug, Clone)]
pub struct KeyConfinement {
    patterns: Vec<Regex>,
}

impl KeyConfinement {
    /// Compiles `patterns`, skipping invalid ones with a warning.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .map(|pattern| pattern.as_ref())
            .filter_map(|pattern| match Regex::new(&format!("^(?:{})$", pattern)) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!(
                        pattern,
                        error = %e,
                        "ignoring confine_to_keys pattern that does not compile"
                    );
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    /// Returns true if `key` fully matches one of the patterns.
    pub fn permits(&self, key: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(key))
    }

    /// Number of patterns that compiled.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no pattern compiled.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
