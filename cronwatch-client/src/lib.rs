//! Cronwatch Platform Client
//!
//! A small, type-safe client for the workflow platform's control-plane API
//! (Argo resources served through the Kubernetes API server), built on a
//! `kube::Client`.
//!
//! The crate also provides the cluster connectors that discover credentials
//! and produce an authenticated [`PlatformClient`], and the [`PlatformApi`]
//! trait the driver is written against.
//!
//! # Example
//!
//! ```no_run
//! use cronwatch_client::connector::{Connector, KubeconfigConnector};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = KubeconfigConnector::from_env()
//!         .connect(Duration::from_secs(30))
//!         .await?;
//!
//!     for execution in client.list_executions("default").await? {
//!         println!("{} {}", execution.name, execution.phase);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod connector;
pub mod error;
mod executions;
mod schedules;

// Re-export commonly used types
pub use api::PlatformApi;
pub use error::{ClientError, ConnectError, Result};

use cronwatch_core::dto::{GROUP, VERSION};
use kube::api::{Api, ApiResource, DynamicObject};
use kube::core::GroupVersionKind;
use kube::{Client, Config};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client for the platform API
///
/// Endpoints are grouped by resource:
/// - Schedules (create, list, delete cron workflows)
/// - Executions (list workflows)
#[derive(Clone)]
pub struct PlatformClient {
    /// Base URL of the API server (e.g., "https://10.0.0.1:443")
    base_url: String,
    /// Authenticated Kubernetes client
    client: Client,
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PlatformClient {
    /// Builds the client described by `config`
    ///
    /// Credentials, TLS roots and timeouts all come from `config`; connectors
    /// produce it.
    pub fn from_config(config: Config) -> std::result::Result<Self, ConnectError> {
        let base_url = config.cluster_url.to_string();
        let client = Client::try_from(config).map_err(ConnectError::Client)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL of the API server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Handle on a namespaced workflow resource
    fn resource(&self, namespace: &str, kind: &str, plural: &str) -> Api<DynamicObject> {
        let gvk = GroupVersionKind::gvk(GROUP, VERSION, kind);
        let resource = ApiResource::from_gvk_with_plural(&gvk, plural);
        Api::namespaced_with(self.client.clone(), namespace, &resource)
    }
}

// =============================================================================
// Wire Conversion
// =============================================================================

/// Turns a typed manifest into the object the dynamic API sends
fn encode<T: Serialize>(manifest: &T) -> Result<DynamicObject> {
    serde_json::to_value(manifest)
        .and_then(serde_json::from_value)
        .map_err(|e| ClientError::ParseError(format!("Failed to encode manifest: {}", e)))
}

/// Re-reads a dynamic object as one of the typed wire shapes
fn decode<T: DeserializeOwned>(object: DynamicObject) -> std::result::Result<T, serde_json::Error> {
    serde_json::to_value(object).and_then(serde_json::from_value)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use mockito::Matcher;

    /// Client pointed at a mock API server
    pub fn client_for(server: &mockito::Server) -> PlatformClient {
        let config = Config::new(server.url().parse().unwrap());
        PlatformClient::from_config(config).unwrap()
    }

    /// Matches `path` with or without a query string
    pub fn path(path: &str) -> Matcher {
        Matcher::Regex(format!(r"^{}(\?.*)?$", path.replace('.', r"\.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cronwatch_core::dto::cron_workflow::CronWorkflow;
    use serde_json::json;

    #[tokio::test]
    async fn test_client_trims_trailing_slash() {
        let config = Config::new("https://127.0.0.1:6443/".parse().unwrap());
        let client = PlatformClient::from_config(config).unwrap();
        assert_eq!(client.base_url(), "https://127.0.0.1:6443");
    }

    #[test]
    fn test_manifest_survives_dynamic_object() {
        let body = json!({
            "apiVersion": "argoproj.io/v1alpha1",
            "kind": "CronWorkflow",
            "metadata": { "generateName": "hello-world-cron-", "namespace": "default" },
            "spec": {
                "schedule": "* * * * *",
                "concurrencyPolicy": "Forbid",
                "workflowSpec": { "entrypoint": "main", "templates": [] }
            }
        });
        let manifest: CronWorkflow = serde_json::from_value(body).unwrap();

        let object = encode(&manifest).unwrap();
        assert_eq!(object.metadata.generate_name.as_deref(), Some("hello-world-cron-"));
        assert_eq!(object.data["spec"]["schedule"], "* * * * *");

        let back: CronWorkflow = decode(object).unwrap();
        assert_eq!(back.kind, "CronWorkflow");
        assert_eq!(back.spec.concurrency_policy.as_deref(), Some("Forbid"));
    }
}
