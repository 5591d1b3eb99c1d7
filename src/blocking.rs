//! Synchronous entry points.
//!
//! Hosts that resolve configuration from plain threads call these instead of
//! the async API. Each call blocks until the lookup finishes or the client's
//! own timeout and retry policy gives up.

use crate::{LookupBackend, ResolutionType, Scope};
use serde_json::Value;
use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{self, Handle, Runtime, RuntimeFlavor};

static RUNTIME: OnceLock<std::io::Result<Runtime>> = OnceLock::new();

fn shared_runtime() -> Option<&'static Runtime> {
    let runtime = RUNTIME.get_or_init(|| {
        runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("secrets-lookup-rt")
            .build()
    });

    match runtime {
        Ok(runtime) => Some(runtime),
        Err(e) => {
            tracing::error!(error = %e, "failed to build secrets lookup runtime");
            None
        }
    }
}

/// Runs `fut` to completion from synchronous code without nesting runtimes.
///
/// Inside a multi-thread runtime the current worker is handed over with
/// `block_in_place`. Inside a current-thread runtime the future is driven on
/// the shared runtime from a scoped thread. Elsewhere the shared runtime is
/// used directly. Returns `None` only if that runtime cannot be built.
pub fn block_on<F>(fut: F) -> Option<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Some(tokio::task::block_in_place(|| handle.block_on(fut)))
        }
        Ok(_) => std::thread::scope(|s| {
            s.spawn(|| shared_runtime().map(|runtime| runtime.block_on(fut)))
                .join()
                .ok()
                .flatten()
        }),
        Err(_) => shared_runtime().map(|runtime| runtime.block_on(fut)),
    }
}

/// Blocking form of [`LookupBackend::lookup`].
///
/// ```
/// use std::collections::HashMap;
/// use secrets_lookup::backends::mock::MockClient;
/// use secrets_lookup::{blocking, Config, ResolutionType, SecretLookupBackend};
///
/// let client = MockClient::new();
/// blocking::block_on(client.set_secret("db", "hunter2"));
///
/// let config = Config::new("us-east-1").with_ambient_credentials();
/// let backend = SecretLookupBackend::with_client(Some(config), client);
///
/// let scope: HashMap<String, String> = HashMap::new();
/// let answer = blocking::lookup(&backend, "db", &scope, ResolutionType::Plain);
/// assert_eq!(answer, Some("hunter2".into()));
/// ```
pub fn lookup(
    backend: &dyn LookupBackend,
    key: &str,
    scope: &dyn Scope,
    resolution: ResolutionType,
) -> Option<Value> {
    block_on(backend.lookup(key, scope, resolution)).flatten()
}

/// Blocking form of [`SecretLookupBackend::connect`](crate::SecretLookupBackend::connect).
///
/// Returns `None` only if no runtime is available to build the client on.
#[cfg(feature = "aws")]
pub fn connect(config: Option<crate::Config>) -> Option<crate::SecretLookupBackend> {
    block_on(crate::SecretLookupBackend::connect(config))
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::backends::mock::MockClient;
    use crate::{Config, SecretLookupBackend};
    use std::collections::HashMap;

    fn backend(client: &MockClient) -> SecretLookupBackend {
        let config = Config::new("us-east-1")
            .with_credentials("id", "secret")
            .with_environment("env1", "production");
        SecretLookupBackend::with_client(Some(config), client.clone())
    }

    #[test]
    fn test_lookup_without_runtime() {
        let client = MockClient::new();
        block_on(client.set_secret("production/db", "value"));

        let mut scope = HashMap::new();
        scope.insert("environment".to_string(), "env1".to_string());

        let answer = lookup(&backend(&client), "db", &scope, ResolutionType::Plain);
        assert_eq!(answer, Some(Value::String("value".to_string())));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_lookup_inside_runtime() {
        let client = MockClient::new();
        client.set_secret("db", "value").await;

        let scope: HashMap<String, String> = HashMap::new();
        let answer = lookup(&backend(&client), "db", &scope, ResolutionType::Plain);

        assert_eq!(answer, Some(Value::String("value".to_string())));
    }

    #[tokio::test]
    async fn test_lookup_inside_current_thread_runtime() {
        let client = MockClient::new();
        client.set_secret("db", "value").await;

        let scope: HashMap<String, String> = HashMap::new();
        let answer = lookup(&backend(&client), "db", &scope, ResolutionType::Plain);

        assert_eq!(answer, Some(Value::String("value".to_string())));
    }
}
