//! Kubeconfig file credentials
//!
//! Loading, `KUBECONFIG` path-list merging and every credential kind the
//! format allows are handled by `kube`; this connector only decides which
//! file and context to use.

use async_trait::async_trait;
use kube::Config;
use kube::config::{KubeConfigOptions, Kubeconfig};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Connector;
use crate::error::ConnectError;

/// Connects with the credentials of a kubeconfig context
#[derive(Debug, Clone, Default)]
pub struct KubeconfigConnector {
    /// Explicit file; `None` means `KUBECONFIG` or `~/.kube/config`
    path: Option<PathBuf>,
    /// Context override; `None` means `current-context`
    context: Option<String>,
}

impl KubeconfigConnector {
    /// Reads a specific kubeconfig file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            context: None,
        }
    }

    /// Uses `KUBECONFIG` (all entries, merged) or the default location
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Selects a context other than `current-context`
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The explicit file, if one was given
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn load(&self) -> Result<Kubeconfig, ConnectError> {
        let kubeconfig = match &self.path {
            Some(path) => Kubeconfig::read_from(path)?,
            None => Kubeconfig::read()?,
        };
        Ok(kubeconfig)
    }
}

#[async_trait]
impl Connector for KubeconfigConnector {
    async fn config(&self) -> Result<Config, ConnectError> {
        let kubeconfig = self.load()?;
        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        };

        let config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;
        debug!("Resolved kubeconfig cluster {}", config.cluster_url);
        Ok(config)
    }

    fn describe(&self) -> String {
        let source = match &self.path {
            Some(path) => path.display().to_string(),
            None => "KUBECONFIG or ~/.kube/config".to_string(),
        };
        match &self.context {
            Some(context) => format!("kubeconfig {} (context {})", source, context),
            None => format!("kubeconfig {}", source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
clusters:
  - name: dev-cluster
    cluster:
      server: https://dev.example.com:6443
      insecure-skip-tls-verify: true
  - name: eks-cluster
    cluster:
      server: https://eks.example.com
contexts:
  - name: dev
    context:
      cluster: dev-cluster
      user: dev-user
      namespace: argo
  - name: eks
    context:
      cluster: eks-cluster
      user: eks-user
users:
  - name: dev-user
    user:
      token: dev-token
  - name: eks-user
    user:
      exec:
        apiVersion: client.authentication.k8s.io/v1beta1
        command: aws
        args: ["eks", "get-token", "--cluster-name", "prod"]
"#;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_current_context_with_token() {
        let (_dir, path) = write_config(KUBECONFIG);
        let config = KubeconfigConnector::new(&path).config().await.unwrap();

        assert_eq!(config.cluster_url.host(), Some("dev.example.com"));
        assert_eq!(config.cluster_url.port_u16(), Some(6443));
        assert_eq!(config.default_namespace, "argo");
        assert!(config.accept_invalid_certs);
        assert!(config.auth_info.token.is_some());
    }

    #[tokio::test]
    async fn test_exec_plugin_user_keeps_plugin() {
        let (_dir, path) = write_config(KUBECONFIG);
        let config = KubeconfigConnector::new(&path)
            .with_context("eks")
            .config()
            .await
            .unwrap();

        assert_eq!(config.cluster_url.host(), Some("eks.example.com"));
        assert!(config.auth_info.token.is_none());
        assert!(config.auth_info.exec.is_some());
    }

    #[tokio::test]
    async fn test_unknown_context_rejected() {
        let (_dir, path) = write_config(KUBECONFIG);
        let result = KubeconfigConnector::new(&path)
            .with_context("staging")
            .config()
            .await;

        assert!(matches!(result, Err(ConnectError::Kubeconfig(_))));
    }

    #[tokio::test]
    async fn test_malformed_yaml() {
        let (_dir, path) = write_config("current-context: [unterminated\n");
        let result = KubeconfigConnector::new(&path).config().await;
        assert!(matches!(result, Err(ConnectError::Kubeconfig(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = KubeconfigConnector::new(dir.path().join("absent")).config().await;
        assert!(matches!(result, Err(ConnectError::Kubeconfig(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_from_env_merges_kubeconfig_entries() {
        let dir = tempfile::tempdir().unwrap();
        let clusters = dir.path().join("clusters.yaml");
        let users = dir.path().join("users.yaml");
        std::fs::write(
            &clusters,
            r#"
current-context: split
clusters:
  - name: k
    cluster:
      server: https://split.example.com
contexts:
  - name: split
    context:
      cluster: k
      user: u
"#,
        )
        .unwrap();
        std::fs::write(
            &users,
            r#"
users:
  - name: u
    user:
      token: split-token
"#,
        )
        .unwrap();

        let previous = std::env::var_os("KUBECONFIG");
        let joined = std::env::join_paths([&clusters, &users]).unwrap();
        unsafe {
            std::env::set_var("KUBECONFIG", &joined);
        }

        let connector = KubeconfigConnector::from_env();
        let result = connector.config().await;

        unsafe {
            match previous {
                Some(value) => std::env::set_var("KUBECONFIG", value),
                None => std::env::remove_var("KUBECONFIG"),
            }
        }

        let config = result.unwrap();
        assert!(connector.path().is_none());
        assert_eq!(config.cluster_url.host(), Some("split.example.com"));
        assert!(config.auth_info.token.is_some());
    }

    #[test]
    fn test_describe_names_source_and_context() {
        let connector = KubeconfigConnector::new("/etc/kube/config").with_context("eks");
        assert_eq!(
            connector.describe(),
            "kubeconfig /etc/kube/config (context eks)"
        );
        assert_eq!(
            KubeconfigConnector::from_env().describe(),
            "kubeconfig KUBECONFIG or ~/.kube/config"
        );
    }
}
