//! AWS Secrets Manager integration tests using LocalStack.
//!
//! These tests require LocalStack to be running on localhost:4566.
//!
//! Run with:
//!   docker run -d -p 4566:4566 localstack/localstack
//!   cargo test --test integration_aws --features aws -- --ignored
//!
//! Secrets are seeded with the SDK directly; the backend only ever reads.

#![cfg(feature = "aws")]

use secrets_lookup::{Config, LookupBackend, ResolutionType, SecretLookupBackend};
use serde_json::json;
use std::collections::HashMap;

fn endpoint() -> String {
    std::env::var("LOCALSTACK_ENDPOINT").unwrap_or_else(|_| "http://localhost:4566".to_string())
}

fn backend_config() -> Config {
    Config::new("us-east-1")
        .with_credentials("test", "test")
        .with_endpoint(endpoint())
        .with_environment("env1", "it-production")
}

fn scope(environment: &str) -> HashMap<String, String> {
    let mut scope = HashMap::new();
    scope.insert("environment".to_string(), environment.to_string());
    scope
}

async fn seed(name: &str, value: &str) -> aws_sdk_secretsmanager::Client {
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .credentials_provider(aws_sdk_secretsmanager::config::Credentials::new(
            "test", "test", None, None, "test",
        ))
        .endpoint_url(endpoint())
        .load()
        .await;
    let client = aws_sdk_secretsmanager::Client::new(&sdk_config);

    client
        .create_secret()
        .name(name)
        .secret_string(value)
        .send()
        .await
        .expect("Failed to seed secret");

    client
}

async fn cleanup(client: &aws_sdk_secretsmanager::Client, name: &str) {
    client
        .delete_secret()
        .secret_id(name)
        .force_delete_without_recovery(true)
        .send()
        .await
        .ok();
}

#[tokio::test]
#[ignore] // Run only when LocalStack is available
async fn test_aws_plain_lookup() {
    let name = "it-production/plain-secret";
    let client = seed(name, "my-secret-value").await;

    let backend = SecretLookupBackend::connect(Some(backend_config())).await;
    assert!(backend.is_ready());

    let answer = backend
        .lookup("plain-secret", &scope("env1"), ResolutionType::Plain)
        .await;
    assert_eq!(answer, Some(json!("my-secret-value")));

    cleanup(&client, name).await;
}

#[tokio::test]
#[ignore]
async fn test_aws_hash_and_sub_key() {
    let name = "it-production/database";
    let client = seed(name, r#"{"user":"admin","password":"hunter2"}"#).await;

    let backend = SecretLookupBackend::connect(Some(backend_config())).await;

    let hash = backend
        .lookup("database", &scope("env1"), ResolutionType::Hash)
        .await;
    assert_eq!(hash, Some(json!({ "user": "admin", "password": "hunter2" })));

    let password = backend
        .lookup("database::password", &scope("env1"), ResolutionType::Plain)
        .await;
    assert_eq!(password, Some(json!("hunter2")));

    cleanup(&client, name).await;
}

#[tokio::test]
#[ignore]
async fn test_aws_missing_secret() {
    let backend = SecretLookupBackend::connect(Some(backend_config())).await;

    let answer = backend
        .lookup("never-created", &scope("env1"), ResolutionType::Plain)
        .await;
    assert!(answer.is_none());
}

#[tokio::test]
async fn test_aws_incomplete_config_disables_backend() {
    let backend = SecretLookupBackend::connect(Some(Config::new("us-east-1"))).await;
    assert!(!backend.is_ready());

    let backend = SecretLookupBackend::connect(None).await;
    assert!(!backend.is_ready());
}
