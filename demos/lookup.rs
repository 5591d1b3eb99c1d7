//! Resolving keys the way a host configuration engine would.
//!
//! Uses the in-memory client so it runs without AWS access. Set
//! `RUST_LOG=secrets_lookup=debug` to see the backend's diagnostics.
//!
//! Run with: cargo run --example lookup

use secrets_lookup::backends::mock::MockClient;
use secrets_lookup::{Config, LookupBackend, ResolutionType, SecretLookupBackend};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Secrets Lookup Example ===\n");

    let client = MockClient::new();
    client.set_secret("production/api_key", "sk-live-123").await;
    client
        .set_secret("production/database", r#"{"user":"app","password":"hunter2"}"#)
        .await;

    let config = Config::from_value(serde_json::json!({
        "region": "us-east-1",
        "use_iam_role": true,
        "environments": { "prod": "production" },
        "confine_to_keys": ["api_key", "database(::.*)?"]
    }))?;
    let backend = SecretLookupBackend::with_client(Some(config), client);

    let mut scope = HashMap::new();
    scope.insert("environment".to_string(), "prod".to_string());

    let lookups = [
        ("api_key", ResolutionType::Plain),
        ("database", ResolutionType::Hash),
        ("database::password", ResolutionType::Plain),
        ("database", ResolutionType::Array),
        ("unconfined_key", ResolutionType::Plain),
    ];

    for (key, resolution) in lookups {
        match backend.lookup(key, &scope, resolution).await {
            Some(value) => println!("✓ {} ({}): {}", key, resolution, value),
            None => println!("✗ {} ({}): not applicable, next backend", key, resolution),
        }
    }

    Ok(())
}
