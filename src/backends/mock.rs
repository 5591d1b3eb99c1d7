//! Mock secret client for testing.
//!
//! This client keeps secrets in memory, records every identifier it is asked
//! for, and can be told to fail, which is enough to exercise every branch of
//! the lookup pipeline without a network.

use crate::{ClientError, SecretClient, SecretValue};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory [`SecretClient`].
///
/// Clones share storage, so a test can hand one clone to the backend and
/// inspect [`MockClient::requests`] through another.
///
/// # Example
///
/// ```
/// use secrets_lookup::backends::mock::MockClient;
/// use secrets_lookup::SecretClient;
///
/// #[tokio::main]
/// async fn main() {
///     let client = MockClient::new();
///     client.set_secret("production/db", "hunter2").await;
///
///     let value = client.get_secret_value("production/db").await.unwrap();
///     assert_eq!(value.secret_string.as_deref(), Some("hunter2"));
///
///     // Simulate a store outage
///     client.fail_with("connection reset").await;
///     assert!(client.get_secret_value("production/db").await.is_err());
///
///     assert_eq!(client.requests().await.len(), 2);
/// }
/// ```
#[derive(Clone, Default)]
pub struct MockClient {
    secrets: Arc<RwLock<HashMap<String, SecretValue>>>,
    requests: Arc<RwLock<Vec<String>>>,
    get_error: Arc<RwLock<Option<String>>>,
}

impl MockClient {
    /// Creates a client with empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a text secret under `secret_id` with a fresh version id.
    pub async fn set_secret(&self, secret_id: impl Into<String>, secret_string: impl Into<String>) {
        let value = SecretValue {
            secret_string: Some(secret_string.into()),
            version_id: Some(uuid::Uuid::new_v4().to_string()),
            created: Some(Utc::now()),
        };
        self.set_value(secret_id, value).await;
    }

    /// Stores an arbitrary value, e.g. one without a secret string.
    pub async fn set_value(&self, secret_id: impl Into<String>, value: SecretValue) {
        let mut secrets = self.secrets.write().await;
        secrets.insert(secret_id.into(), value);
    }

    /// Makes every subsequent request fail with a non-"not found" error.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.get_error.write().await = Some(message.into());
    }

    /// Identifiers requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl SecretClient for MockClient {
    async fn get_secret_value(&self, secret_id: &str) -> Result<SecretValue, ClientError> {
        self.requests.write().await.push(secret_id.to_string());

        if let Some(ref err) = *self.get_error.read().await {
            return Err(ClientError::Other(anyhow::anyhow!("{}", err)));
        }

        let secrets = self.secrets.read().await;
        secrets.get(secret_id).cloned().ok_or_else(|| {
            ClientError::NotFound("Secrets Manager can't find the specified secret.".to_string())
        })
    }
}
