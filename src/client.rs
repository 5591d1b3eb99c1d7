//! Secret-store client abstraction.
//!
//! The backend never talks to the network itself. It hands the qualified key
//! to a [`SecretClient`] and interprets the result. Connection handling, auth,
//! retries and timeouts all belong to the client implementation.

use crate::ClientError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A secret as returned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecretValue {
    /// Secret text, absent for binary-only secrets
    pub secret_string: Option<String>,

    /// Version identifier of the returned value, if the store exposes one
    pub version_id: Option<String>,

    /// When this version was created
    pub created: Option<DateTime<Utc>>,
}

impl SecretValue {
    /// Creates a secret holding `secret_string`.
    pub fn new(secret_string: impl Into<String>) -> Self {
        Self {
            secret_string: Some(secret_string.into()),
            ..Default::default()
        }
    }

    /// Sets the version identifier.
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }
}

/// Client for a remote secret store.
///
/// Implementations must be `Send + Sync`; a host that looks keys up from
/// several threads shares one client through the backend.
#[async_trait]
pub trait SecretClient: Send + Sync {
    /// Fetches the current value of the secret named `secret_id`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`]: the store has no such secret
    /// - [`ClientError::Other`]: any other failure
    async fn get_secret_value(&self, secret_id: &str) -> Result<SecretValue, ClientError>;
}
