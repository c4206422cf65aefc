//! Driver error kinds
//!
//! Every variant except `Query` ends the run. `Query` is absorbed by the
//! monitoring loop.

use cronwatch_client::{ClientError, ConnectError};
use cronwatch_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to connect to the cluster: {0}")]
    Connection(#[from] ConnectError),

    #[error("invalid schedule definition: {0}")]
    InvalidDefinition(#[from] ValidationError),

    #[error("failed to create schedule: {0}")]
    Submission(#[source] ClientError),

    #[error("failed to delete schedule {name} (it is still active): {source}")]
    Retirement {
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to list executions: {0}")]
    Query(#[source] ClientError),
}

impl DriverError {
    /// Whether the run can continue after this error
    #[allow(dead_code)]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// Schedule the platform stored even though submission failed
    pub fn created_schedule(&self) -> Option<&str> {
        match self {
            Self::Submission(source) => source.created_name(),
            _ => None,
        }
    }
}
