//! Service-account credentials mounted into a pod

use async_trait::async_trait;
use kube::Config;

use super::Connector;
use crate::error::ConnectError;

/// Default mount point of the service-account secret
pub const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

const HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
const PORT_ENV: &str = "KUBERNETES_SERVICE_PORT";

/// Connects with the pod's service-account token
#[derive(Debug, Clone)]
pub struct InClusterConnector {
    host: String,
    port: String,
}

impl InClusterConnector {
    /// Reads the API address the kubelet injects into every pod
    pub fn from_env() -> Result<Self, ConnectError> {
        let host = std::env::var(HOST_ENV).map_err(|_| ConnectError::MissingEnv(HOST_ENV))?;
        let port = std::env::var(PORT_ENV).map_err(|_| ConnectError::MissingEnv(PORT_ENV))?;

        Ok(Self { host, port })
    }

    /// API server URL; IPv6 literals are bracketed
    pub fn server(&self) -> String {
        if self.host.contains(':') {
            format!("https://[{}]:{}", self.host, self.port)
        } else {
            format!("https://{}:{}", self.host, self.port)
        }
    }
}

#[async_trait]
impl Connector for InClusterConnector {
    async fn config(&self) -> Result<Config, ConnectError> {
        Ok(Config::incluster()?)
    }

    fn describe(&self) -> String {
        format!("in-cluster service account ({})", self.server())
    }
}
