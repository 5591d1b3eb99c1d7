//! Configuration for the secrets lookup backend.

use crate::{LookupError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Configuration section for [`SecretLookupBackend`](crate::SecretLookupBackend).
///
/// Hosts usually deserialize this from their own configuration file; every
/// field is optional at the serde level and checked by [`Config::validate`].
///
/// ```
/// use secrets_lookup::Config;
///
/// let config = Config::new("us-west-2")
///     .with_credentials("AKIDEXAMPLE", "wJalrXUtnFEMI")
///     .with_environment("env1", "production")
///     .with_confine_to_keys(["^db_.*"]);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AWS region (required)
    pub region: Option<String>,

    /// Access key, required unless ambient credentials are used
    pub access_key_id: Option<String>,

    /// Secret key, required unless ambient credentials are used
    pub secret_access_key: Option<String>,

    /// Use the SDK's ambient credential chain (environment, profile, IAM role)
    #[serde(alias = "use_iam_role")]
    pub use_ambient_credentials: bool,

    /// Scope environment name to key prefix
    pub environments: HashMap<String, String>,

    /// Prefix template interpolated against the scope; overrides `environments`
    pub env: Option<String>,

    /// Patterns a key must fully match for this backend to answer it
    pub confine_to_keys: Option<Vec<String>>,

    /// Custom endpoint URL (for LocalStack testing)
    pub endpoint: Option<String>,
}

impl Config {
    /// Creates a configuration for the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Default::default()
        }
    }

    /// Deserializes a configuration section from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Sets explicit access-key credentials.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Uses ambient credentials instead of explicit keys.
    ///
    /// Only `region` is required in this mode.
    pub fn with_ambient_credentials(mut self) -> Self {
        self.use_ambient_credentials = true;
        self
    }

    /// Maps a scope environment name to a key prefix.
    pub fn with_environment(mut self, name: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.environments.insert(name.into(), prefix.into());
        self
    }

    /// Sets the prefix template, e.g. `"%{environment}-secrets"`.
    pub fn with_env_template(mut self, template: impl Into<String>) -> Self {
        self.env = Some(template.into());
        self
    }

    /// Restricts the backend to keys matching one of `patterns`.
    pub fn with_confine_to_keys<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.confine_to_keys = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a custom endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns the names of required fields that are absent or empty.
    ///
    /// Fields are checked in the fixed order `region`, `access_key_id`,
    /// `secret_access_key`. With ambient credentials only `region` is checked.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut required = vec![("region", &self.region)];
        if !self.use_ambient_credentials {
            required.push(("access_key_id", &self.access_key_id));
            required.push(("secret_access_key", &self.secret_access_key));
        }

        required
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| name)
            .collect()
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MissingFields`] naming all missing fields at once.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LookupError::MissingFields(missing))
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("use_ambient_credentials", &self.use_ambient_credentials)
            .field("environments", &self.environments)
            .field("env", &self.env)
            .field("confine_to_keys", &self.confine_to_keys)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_builder() {
        let config = Config::new("us-west-2")
            .with_credentials("id", "secret")
            .with_environment("env1", "production")
            .with_env_template("%{environment}")
            .with_endpoint("http://localhost:4566");

        assert_eq!(config.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.environments.get("env1").map(String::as_str), Some("production"));
        assert_eq!(config.env.as_deref(), Some("%{environment}"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_reported_together_in_order() {
        let config = Config::default();
        assert_eq!(
            config.missing_fields(),
            vec!["region", "access_key_id", "secret_access_key"]
        );

        let config = Config::new("eu-west-1");
        match config.validate() {
            Err(LookupError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["access_key_id", "secret_access_key"]);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let config = Config::new("").with_credentials("id", "");
        assert_eq!(config.missing_fields(), vec!["region", "secret_access_key"]);
    }

    #[test]
    fn test_ambient_credentials_only_need_region() {
        assert!(Config::new("us-east-1").with_ambient_credentials().validate().is_ok());

        let config = Config::default().with_ambient_credentials();
        assert_eq!(config.missing_fields(), vec!["region"]);
    }

    #[test]
    fn test_deserialize_section() {
        let config = Config::from_value(json!({
            "region": "us-east-1",
            "use_iam_role": true,
            "environments": { "env1": "production", "env2": "staging" },
            "confine_to_keys": ["^app::.*"]
        }))
        .unwrap();

        assert!(config.use_ambient_credentials);
        assert_eq!(config.environments.len(), 2);
        assert_eq!(config.confine_to_keys, Some(vec!["^app::.*".to_string()]));
        assert!(config.env.is_none());
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let config = Config::new("us-east-1").with_credentials("AKID", "hunter2");
        let rendered = format!("{:?}", config);

        assert!(rendered.contains("AKID"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
