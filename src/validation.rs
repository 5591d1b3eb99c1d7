//! Key validation against the secret store's naming rules.

use crate::{LookupError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Secrets Manager names allow alphanumerics and `/_+=.@-`. Colon is
    /// accepted too because `key::field` selects a field inside a secret.
    static ref SECRET_KEY_REGEX: Regex = Regex::new(r"^[A-Za-z0-9/_+=.@:\-]+$")
        .expect("secret key regex is valid");
}

/// Validates a lookup key before it is sent to the store.
///
/// # Errors
///
/// Returns [`LookupError::IllegalKey`] if the key is empty or contains a
/// character outside `[A-Za-z0-9/_+=.@:-]`.
///
/// # Example
///
/// ```
/// use secrets_lookup::validation::validate_key;
///
/// assert!(validate_key("db_password").is_ok());
/// assert!(validate_key("app/db::password").is_ok());
///
/// assert!(validate_key("").is_err());
/// assert!(validate_key("my secret").is_err());
/// assert!(validate_key("name$(whoami)").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<()> {
    if SECRET_KEY_REGEX.is_match(key) {
        Ok(())
    } else {
        Err(LookupError::IllegalKey(key.to_string()))
    }
}
