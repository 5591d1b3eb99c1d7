//! Error types for secret lookups.
//!
//! None of these ever leave [`LookupBackend::lookup`](crate::LookupBackend::lookup):
//! the backend converts every variant into "not applicable" after logging it.
//! They exist so the pipeline can be written with `?` and so each failure
//! category keeps its own log level.

use crate::ResolutionType;
use thiserror::Error;

/// Result type alias using [`LookupError`].
pub type Result<T> = std::result::Result<T, LookupError>;

/// Errors that can occur while answering a lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No configuration section was supplied for the backend.
    #[error("secrets manager configuration section is missing")]
    MissingConfiguration,

    /// Required configuration fields are absent or empty.
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The backend failed construction and answers nothing.
    #[error("backend is disabled")]
    Disabled,

    /// Key is not covered by `confine_to_keys`. Expected; never logged.
    #[error("key is outside the configured confinement: {0}")]
    OutsideConfinement(String),

    /// Key contains characters the secret store does not accept.
    #[error("{0} contains illegal characters")]
    IllegalKey(String),

    /// Resolution type this backend cannot answer.
    #[error("resolution type {0} is not supported")]
    UnsupportedResolution(ResolutionType),

    /// The store has no secret under the qualified key.
    #[error("{key} not found: {message}")]
    SecretNotFound {
        /// Qualified key that was queried
        key: String,
        /// Message reported by the store
        message: String,
    },

    /// The secret exists but only carries binary data.
    #[error("secret {0} has no string value")]
    NoSecretString(String),

    /// The secret decoded to JSON that is not an object.
    #[error("secret {0} is not a JSON object")]
    NotAnObject(String),

    /// The requested sub-key is absent from the decoded secret.
    #[error("secret {secret} has no field {field}")]
    MissingSubKey {
        /// Secret identifier
        secret: String,
        /// Requested field
        field: String,
    },

    /// Secret-store client failure other than "not found".
    #[error("secret store error: {0}")]
    Client(#[source] ClientError),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    /// Maps a client failure for `key` onto the lookup taxonomy.
    ///
    /// # Example
    ///
    /// ```
    /// use secrets_lookup::{ClientError, LookupError};
    ///
    /// let err = LookupError::from_client(
    ///     "production/db",
    ///     ClientError::NotFound("no such secret".to_string()),
    /// );
    ///
    /// assert_eq!(err.to_string(), "production/db not found: no such secret");
    /// ```
    pub fn from_client(key: impl Into<String>, err: ClientError) -> Self {
        match err {
            ClientError::NotFound(message) => Self::SecretNotFound {
                key: key.into(),
                message,
            },
            other => Self::Client(other),
        }
    }
}

/// Errors a [`SecretClient`](crate::SecretClient) reports.
///
/// The store distinguishes exactly one failure, a missing identifier.
/// Everything else (auth, network, throttling) is opaque.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The identifier does not exist in the store.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Any other failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
