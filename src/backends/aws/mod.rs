//! AWS Secrets Manager client.
//!
//! Wraps the official AWS SDK client behind [`SecretClient`](crate::SecretClient).
//!
//! # Credentials
//!
//! - Explicit keys from `access_key_id` / `secret_access_key` in [`Config`](crate::Config)
//! - With `use_ambient_credentials`, the SDK default chain:
//!   - Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
//!   - Shared credentials file (`~/.aws/credentials`)
//!   - IAM instance role (for EC2/ECS)
//!
//! # Example
//!
//! ```no_run
//! use secrets_lookup::{Config, SecretLookupBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::new("us-west-2")
//!         .with_ambient_credentials()
//!         .with_environment("env1", "production");
//!
//!     let backend = SecretLookupBackend::connect(Some(config)).await;
//!     assert!(backend.is_ready());
//! }
//! ```

mod client;

pub use client::AwsSecretsClient;
