//! Error types for the platform client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the platform API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced an API answer (transport, TLS, auth, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(#[source] kube::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The platform stored the object but its answer could not be read
    #[error("Created {name} but could not read it back: {message}")]
    UnreadableCreate { name: String, message: String },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Name of an object that exists on the platform despite the error
    pub fn created_name(&self) -> Option<&str> {
        match self {
            Self::UnreadableCreate { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl From<kube::Error> for ClientError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(response) if response.reason.is_empty() => {
                Self::api_error(response.code, response.message)
            }
            kube::Error::Api(response) => Self::api_error(
                response.code,
                format!("{}: {}", response.reason, response.message),
            ),
            other => Self::RequestFailed(other),
        }
    }
}

/// Errors raised while discovering credentials and building a client
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("in-cluster configuration failed: {0}")]
    InCluster(#[from] kube::config::InClusterError),

    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("failed to build platform client: {0}")]
    Client(#[source] kube::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api(code: u16, reason: &str, message: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: message.to_string(),
            reason: reason.to_string(),
            code,
        })
    }

    #[test]
    fn test_not_found_detection() {
        assert!(ClientError::api_error(404, "gone").is_not_found());
        assert!(!ClientError::api_error(403, "forbidden").is_not_found());
        assert!(!ClientError::ParseError("x".to_string()).is_not_found());
    }

    #[test]
    fn test_status_classes() {
        assert!(ClientError::api_error(422, "invalid").is_client_error());
        assert!(!ClientError::api_error(422, "invalid").is_server_error());
        assert!(ClientError::api_error(503, "unavailable").is_server_error());
    }

    #[test]
    fn test_api_errors_keep_status_and_reason() {
        let err = ClientError::from(api(404, "NotFound", "cronworkflows \"x\" not found"));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "API error (status 404): NotFound: cronworkflows \"x\" not found"
        );

        let err = ClientError::from(api(500, "", "etcd timeout"));
        assert!(err.is_server_error());
        assert!(err.to_string().ends_with("): etcd timeout"));
    }

    #[test]
    fn test_created_name_only_for_unreadable_create() {
        let err = ClientError::UnreadableCreate {
            name: "hello-world-cron-abcde".to_string(),
            message: "unknown concurrency policy".to_string(),
        };
        assert_eq!(err.created_name(), Some("hello-world-cron-abcde"));
        assert_eq!(ClientError::api_error(409, "exists").created_name(), None);
    }
}
