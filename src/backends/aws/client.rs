//! AWS Secrets Manager client implementation.

use crate::{ClientError, Config, Result, SecretClient, SecretValue};
use async_trait::async_trait;
use aws_sdk_secretsmanager::config::Credentials;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_secretsmanager::Client;

/// Provider name attached to credentials taken from [`Config`].
const CREDENTIALS_PROVIDER: &str = "secrets-lookup-config";

/// [`SecretClient`] backed by AWS Secrets Manager.
#[derive(Debug, Clone)]
pub struct AwsSecretsClient {
    client: Client,
}

impl AwsSecretsClient {
    /// Builds the SDK client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MissingFields`](crate::LookupError::MissingFields)
    /// if the configuration lacks the region or, outside ambient mode, the
    /// access keys.
    pub async fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let region = config.region.clone().unwrap_or_default();
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region));

        // validate() guarantees both keys outside ambient mode
        if let (false, Some(access_key_id), Some(secret_access_key)) = (
            config.use_ambient_credentials,
            &config.access_key_id,
            &config.secret_access_key,
        ) {
            config_loader = config_loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }

        // Use custom endpoint if provided (for LocalStack testing)
        if let Some(ref endpoint) = config.endpoint {
            config_loader = config_loader.endpoint_url(endpoint);
        }

        let sdk_config = config_loader.load().await;
        Ok(Self::from_client(Client::new(&sdk_config)))
    }

    /// Wraps an already configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretClient for AwsSecretsClient {
    async fn get_secret_value(
        &self,
        secret_id: &str,
    ) -> std::result::Result<SecretValue, ClientError> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| match e.as_service_error() {
                Some(service) if service.is_resource_not_found_exception() => ClientError::NotFound(
                    service
                        .message()
                        .unwrap_or("ResourceNotFoundException")
                        .to_string(),
                ),
                _ => ClientError::Other(anyhow::anyhow!(
                    "AWS error: {}",
                    DisplayErrorContext(&e)
                )),
            })?;

        Ok(SecretValue {
            secret_string: response.secret_string().map(str::to_string),
            version_id: response.version_id().map(str::to_string),
            created: response.created_date().and_then(|d| {
                chrono::DateTime::from_timestamp(d.secs(), d.subsec_nanos())
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LookupError;

    #[tokio::test]
    async fn test_connect_rejects_incomplete_config() {
        let config = Config::new("us-east-1");

        let result = AwsSecretsClient::connect(&config).await;
        assert!(matches!(result, Err(LookupError::MissingFields(_))));
    }

    #[tokio::test]
    async fn test_connect_with_explicit_credentials() {
        let config = Config::new("us-east-1")
            .with_credentials("test", "test")
            .with_endpoint("http://localhost:4566");

        assert!(AwsSecretsClient::connect(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_with_ambient_credentials() {
        let config = Config::new("us-east-1")
            .with_ambient_credentials()
            .with_endpoint("http://localhost:4566");

        assert!(AwsSecretsClient::connect(&config).await.is_ok());

        let missing_region = Config::default().with_ambient_credentials();
        match AwsSecretsClient::connect(&missing_region).await {
            Err(LookupError::MissingFields(fields)) => assert_eq!(fields, vec!["region"]),
            other => panic!("expected missing region, got {:?}", other.map(|_| ())),
        }
    }
}
