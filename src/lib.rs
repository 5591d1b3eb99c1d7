//! Secrets lookup - answer configuration keys from AWS Secrets Manager.
//!
//! This crate provides a lookup backend for hierarchical configuration
//! engines. Given a key, a scope and a resolution type, it qualifies the key
//! with the scope's environment, fetches the secret, and returns it as text,
//! as a decoded JSON mapping, or as one field of a JSON secret.
//!
//! # Features
//!
//! - **Environment prefixes**: `environments` mapping, `env` template, or the raw environment
//! - **Sub-keys**: `secret::field` returns one field of a JSON secret
//! - **Confinement**: `confine_to_keys` limits the keys this backend answers
//! - **Fail-soft**: a lookup never errors; failures log and return `None`
//!   so the host falls through to its next backend
//! - **Feature Flags**: the AWS SDK is only compiled with the `aws` feature
//!
//! # Quick Start
//!
//! ```no_run
//! use std::collections::HashMap;
//! use secrets_lookup::{Config, LookupBackend, ResolutionType, SecretLookupBackend};
//!
//! # #[cfg(not(feature = "aws"))] fn main() {}
//! # #[cfg(feature = "aws")]
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::new("us-west-2")
//!         .with_ambient_credentials()
//!         .with_environment("env1", "production");
//!
//!     let backend = SecretLookupBackend::connect(Some(config)).await;
//!
//!     let mut scope = HashMap::new();
//!     scope.insert("environment".to_string(), "env1".to_string());
//!
//!     // Fetches "production/database" and returns its "password" field
//!     if let Some(password) = backend
//!         .lookup("database::password", &scope, ResolutionType::Plain)
//!         .await
//!     {
//!         println!("password: {}", password);
//!     }
//! }
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Provides |
//! |---------|---------|----------|
//! | `mock` | yes | In-memory [`SecretClient`] for tests |
//! | `aws` | no | AWS SDK client and [`SecretLookupBackend::connect`] |
//!
//! ```toml
//! [dependencies]
//! secrets-lookup = { version = "0.1", features = ["aws"] }
//! ```

pub mod backend;
pub mod backends;
pub mod blocking;
pub mod client;
pub mod config;
pub mod confine;
pub mod error;
pub mod resolution;
pub mod scope;
pub mod template;
pub mod validation;

pub use backend::{LookupBackend, SecretLookupBackend};
pub use client::{SecretClient, SecretValue};
pub use config::Config;
pub use error::{ClientError, LookupError, Result};
pub use resolution::ResolutionType;
pub use scope::Scope;
