//! Cluster connectors
//!
//! A connector discovers credentials and turns them into an authenticated
//! [`PlatformClient`]. Two strategies exist:
//! - [`InClusterConnector`]: service-account token mounted into the pod
//! - [`KubeconfigConnector`]: a kubeconfig file on disk
//!
//! Credential formats (tokens, client certificates, exec plugins and
//! auth providers) are resolved by `kube`. The caller picks a strategy once
//! and injects it; nothing below the entry point reads ambient state on its
//! own.

mod in_cluster;
mod kubeconfig;

pub use in_cluster::{InClusterConnector, SERVICE_ACCOUNT_DIR};
pub use kubeconfig::KubeconfigConnector;

use async_trait::async_trait;
use kube::Config;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::PlatformClient;
use crate::error::ConnectError;

/// Produces an authenticated platform handle
#[async_trait]
pub trait Connector: Send + Sync {
    /// Resolves the cluster address and credentials
    async fn config(&self) -> Result<Config, ConnectError>;

    /// Short description for logs (never includes secrets)
    fn describe(&self) -> String;

    /// Builds the client; called at most once per process
    ///
    /// Every request made through the client gives up after `timeout` without
    /// progress.
    async fn connect(&self, timeout: Duration) -> Result<PlatformClient, ConnectError> {
        let config = with_request_timeout(self.config().await?, timeout);
        PlatformClient::from_config(config)
    }
}

/// Bounds connecting, reading and writing by `timeout`
pub fn with_request_timeout(mut config: Config, timeout: Duration) -> Config {
    config.connect_timeout = Some(timeout);
    config.read_timeout = Some(timeout);
    config.write_timeout = Some(timeout);
    config
}

/// The strategy chosen at startup
#[derive(Debug, Clone)]
pub enum ClusterConnector {
    InCluster(InClusterConnector),
    Kubeconfig(KubeconfigConnector),
}

impl ClusterConnector {
    /// Picks in-cluster credentials when the pod environment provides them,
    /// otherwise the kubeconfig named by `KUBECONFIG` (or the default path)
    pub fn detect() -> Self {
        Self::detect_in(Path::new(SERVICE_ACCOUNT_DIR))
    }

    /// Like [`ClusterConnector::detect`] with the service-account secret
    /// expected under `account_dir`
    pub fn detect_in(account_dir: &Path) -> Self {
        match InClusterConnector::from_env() {
            Ok(in_cluster) if account_dir.join("token").is_file() => Self::InCluster(in_cluster),
            Ok(_) => {
                debug!(
                    "No service-account token in {}, falling back to kubeconfig",
                    account_dir.display()
                );
                Self::Kubeconfig(KubeconfigConnector::from_env())
            }
            Err(e) => {
                debug!("Not running in a pod ({}), using kubeconfig", e);
                Self::Kubeconfig(KubeconfigConnector::from_env())
            }
        }
    }
}

#[async_trait]
impl Connector for ClusterConnector {
    async fn config(&self) -> Result<Config, ConnectError> {
        match self {
            Self::InCluster(c) => c.config().await,
            Self::Kubeconfig(c) => c.config().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::InCluster(c) => c.describe(),
            Self::Kubeconfig(c) => c.describe(),
        }
    }
}
