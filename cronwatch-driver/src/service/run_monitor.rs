//! Run monitor
//!
//! Lists the executions present in a namespace. Each call is an independent
//! snapshot.

use cronwatch_client::PlatformApi;
use cronwatch_core::domain::execution::WorkloadExecution;
use std::sync::Arc;
use tracing::debug;

use crate::error::DriverError;

#[derive(Clone)]
pub struct RunMonitor {
    api: Arc<dyn PlatformApi>,
}

impl RunMonitor {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }

    /// Snapshot of the executions in `namespace`
    ///
    /// Failures come back as `DriverError::Query`, which callers may treat as
    /// recoverable.
    pub async fn poll(&self, namespace: &str) -> Result<Vec<WorkloadExecution>, DriverError> {
        let executions = self
            .api
            .list_executions(namespace)
            .await
            .map_err(DriverError::Query)?;

        debug!(
            "Listed {} execution(s) in namespace {}",
            executions.len(),
            namespace
        );
        Ok(executions)
    }
}
