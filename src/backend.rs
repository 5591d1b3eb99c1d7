//! Lookup backend answering configuration keys from a secret store.
//!
//! This module defines the [`LookupBackend`] trait a host resolution engine
//! calls, and [`SecretLookupBackend`], which answers it from a
//! [`SecretClient`]. A lookup runs through these steps:
//!
//! 1. Short-circuit if construction failed (the backend is disabled).
//! 2. Skip keys outside `confine_to_keys`.
//! 3. Skip keys the store cannot name.
//! 4. Prefix the key with the scope's environment.
//! 5. Fetch and shape the secret for the requested [`ResolutionType`].
//!
//! Any failure ends the lookup with `None`, which tells the host to fall
//! through to its next backend.

use crate::confine::KeyConfinement;
use crate::template::interpolate;
use crate::validation::validate_key;
use crate::{
    Config, LookupError, ResolutionType, Result, Scope, SecretClient, SecretValue,
};
use async_trait::async_trait;
use serde_json::Value;

/// Separates a secret name from a field inside its JSON value.
pub const SUB_KEY_SEPARATOR: &str = "::";

/// A pluggable lookup source in a host engine's backend chain.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use secrets_lookup::backends::mock::MockClient;
/// use secrets_lookup::{Config, LookupBackend, ResolutionType, SecretLookupBackend};
///
/// #[tokio::main]
/// async fn main() {
///     let client = MockClient::new();
///     client.set_secret("production/api_key", "sk-secret123").await;
///
///     let config = Config::new("us-east-1")
///         .with_credentials("id", "secret")
///         .with_environment("env1", "production");
///     let backend = SecretLookupBackend::with_client(Some(config), client);
///
///     let mut scope = HashMap::new();
///     scope.insert("environment".to_string(), "env1".to_string());
///
///     let answer = backend.lookup("api_key", &scope, ResolutionType::Plain).await;
///     assert_eq!(answer, Some("sk-secret123".into()));
/// }
/// ```
#[async_trait]
pub trait LookupBackend: Send + Sync {
    /// Returns the backend name.
    fn name(&self) -> &str;

    /// Answers `key` for `scope`, or returns `None` if this backend has no
    /// answer.
    ///
    /// Never fails: every error is logged and reported as `None`.
    async fn lookup(
        &self,
        key: &str,
        scope: &dyn Scope,
        resolution: ResolutionType,
    ) -> Option<Value>;
}

/// Backend state, fixed at construction.
enum State {
    Ready(Box<dyn SecretClient>),
    Disabled,
}

/// Secret-store backed [`LookupBackend`].
pub struct SecretLookupBackend {
    state: State,
    config: Config,
    confinement: Option<KeyConfinement>,
}

impl SecretLookupBackend {
    /// Creates a backend around `client`.
    ///
    /// The configuration is validated eagerly. If the section is absent or a
    /// required field is missing, the client is dropped and the backend is
    /// permanently disabled.
    pub fn with_client(config: Option<Config>, client: impl SecretClient + 'static) -> Self {
        match Self::validated(config) {
            Ok(config) => Self::ready(config, Box::new(client)),
            Err((config, e)) => Self::disabled(config, e),
        }
    }

    /// Creates a backend talking to AWS Secrets Manager.
    ///
    /// Validation failures and client construction failures both leave the
    /// backend disabled rather than returning an error.
    #[cfg(feature = "aws")]
    pub async fn connect(config: Option<Config>) -> Self {
        let config = match Self::validated(config) {
            Ok(config) => config,
            Err((config, e)) => return Self::disabled(config, e),
        };

        match crate::backends::aws::AwsSecretsClient::connect(&config).await {
            Ok(client) => Self::ready(config, Box::new(client)),
            Err(e) => Self::disabled(config, e),
        }
    }

    /// Returns true if the backend has a client and will answer lookups.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    fn validated(config: Option<Config>) -> std::result::Result<Config, (Config, LookupError)> {
        let config = match config {
            Some(config) => config,
            None => return Err((Config::default(), LookupError::MissingConfiguration)),
        };

        match config.validate() {
            Ok(()) => Ok(config),
            Err(e) => Err((config, e)),
        }
    }

    fn ready(config: Config, client: Box<dyn SecretClient>) -> Self {
        let confinement = config
            .confine_to_keys
            .as_deref()
            .map(KeyConfinement::compile);

        tracing::debug!(
            region = config.region.as_deref().unwrap_or_default(),
            ambient_credentials = config.use_ambient_credentials,
            "AWS Secrets Manager backend starting"
        );

        Self {
            state: State::Ready(client),
            config,
            confinement,
        }
    }

    fn disabled(config: Config, err: LookupError) -> Self {
        tracing::warn!(error = %err, "AWS Secrets Manager backend disabled");

        Self {
            state: State::Disabled,
            config,
            confinement: None,
        }
    }

    /// Computes the identifier actually sent to the store.
    ///
    /// Without an environment in scope the key is used unchanged. Otherwise
    /// the prefix comes from the `env` template, then the `environments`
    /// mapping, then the raw environment value, in that order.
    pub fn qualified_key(&self, key: &str, scope: &dyn Scope) -> String {
        let Some(environment) = scope.environment() else {
            return key.to_string();
        };

        let prefix = match (&self.config.env, self.config.environments.get(&environment)) {
            (Some(template), _) => interpolate(template, scope),
            (None, Some(mapped)) => mapped.clone(),
            (None, None) => environment,
        };

        format!("{}/{}", prefix, key)
    }

    async fn resolve(
        &self,
        key: &str,
        scope: &dyn Scope,
        resolution: ResolutionType,
    ) -> Result<Value> {
        let client = match self.state {
            State::Ready(ref client) => client,
            State::Disabled => return Err(LookupError::Disabled),
        };

        if let Some(ref confinement) = self.confinement {
            if !confinement.permits(key) {
                return Err(LookupError::OutsideConfinement(key.to_string()));
            }
        }

        validate_key(key)?;

        let qualified = self.qualified_key(key, scope);

        match resolution {
            ResolutionType::Array => Err(LookupError::UnsupportedResolution(resolution)),
            ResolutionType::Hash => {
                let secret = fetch(&**client, &qualified).await?;
                parse_object(&qualified, &secret)
            }
            ResolutionType::Plain => {
                let (secret_id, field) = match qualified.split_once(SUB_KEY_SEPARATOR) {
                    Some((secret_id, field)) => (secret_id, Some(field)),
                    None => (qualified.as_str(), None),
                };

                let secret = fetch(&**client, secret_id).await?;
                match field {
                    Some(field) => extract_field(secret_id, field, &secret),
                    None => Ok(Value::String(secret)),
                }
            }
        }
    }
}

#[async_trait]
impl LookupBackend for SecretLookupBackend {
    fn name(&self) -> &str {
        "secrets_manager"
    }

    async fn lookup(
        &self,
        key: &str,
        scope: &dyn Scope,
        resolution: ResolutionType,
    ) -> Option<Value> {
        match self.resolve(key, scope, resolution).await {
            Ok(value) => Some(value),
            Err(LookupError::OutsideConfinement(_)) => None,
            Err(LookupError::Disabled) => {
                tracing::debug!(key, "backend is disabled, skipping lookup");
                None
            }
            Err(e @ LookupError::IllegalKey(_)) => {
                tracing::debug!("{}. Skipping lookup.", e);
                None
            }
            Err(e @ LookupError::UnsupportedResolution(_)) => {
                tracing::warn!(key, "{}", e);
                None
            }
            Err(e @ LookupError::SecretNotFound { .. }) => {
                tracing::debug!("{}", e);
                None
            }
            Err(e) => {
                tracing::debug!(key, "secrets manager backend error: {}", e);
                None
            }
        }
    }
}

/// Fetches the secret text for `secret_id`, logging its version.
async fn fetch(client: &dyn SecretClient, secret_id: &str) -> Result<String> {
    let SecretValue {
        secret_string,
        version_id,
        created,
    } = client
        .get_secret_value(secret_id)
        .await
        .map_err(|e| LookupError::from_client(secret_id, e))?;

    let secret = secret_string.ok_or_else(|| LookupError::NoSecretString(secret_id.to_string()))?;

    tracing::debug!(
        secret_id,
        version_id = version_id.as_deref().unwrap_or("unknown"),
        created = ?created,
        "retrieved secret"
    );

    Ok(secret)
}

fn parse_object(secret_id: &str, secret: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(secret)? {
        object @ Value::Object(_) => Ok(object),
        _ => Err(LookupError::NotAnObject(secret_id.to_string())),
    }
}

fn extract_field(secret_id: &str, field: &str, secret: &str) -> Result<Value> {
    let mut object = match parse_object(secret_id, secret)? {
        Value::Object(object) => object,
        _ => return Err(LookupError::NotAnObject(secret_id.to_string())),
    };

    object
        .remove(field)
        .ok_or_else(|| LookupError::MissingSubKey {
            secret: secret_id.to_string(),
            field: field.to_string(),
        })
}
