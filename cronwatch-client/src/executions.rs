//! Execution (workflow) endpoints

use crate::error::{ClientError, Result};
use crate::{PlatformClient, decode};
use cronwatch_core::domain::execution::WorkloadExecution;
use cronwatch_core::dto::workflow::{KIND, PLURAL, Workflow};
use kube::api::ListParams;

impl PlatformClient {
    // =============================================================================
    // Execution Query
    // =============================================================================

    /// List the executions currently present in `namespace`
    ///
    /// The result is a snapshot; ordering is whatever the server returns.
    /// An item with an unrecognised phase fails the whole listing.
    pub async fn list_executions(&self, namespace: &str) -> Result<Vec<WorkloadExecution>> {
        let list = self
            .resource(namespace, KIND, PLURAL)
            .list(&ListParams::default())
            .await?;

        list.items
            .into_iter()
            .map(|object| {
                let workflow: Workflow = decode(object)
                    .map_err(|e| ClientError::ParseError(format!("Invalid workflow: {}", e)))?;
                WorkloadExecution::try_from(workflow)
                    .map_err(|e| ClientError::ParseError(format!("Invalid workflow: {}", e)))
            })
            .collect()
    }
}
