//! Platform API seam
//!
//! The driver talks to the platform only through this trait so that tests can
//! substitute an in-memory platform for the HTTP client.

use async_trait::async_trait;
use cronwatch_core::domain::execution::WorkloadExecution;
use cronwatch_core::domain::schedule::ScheduleDefinition;

use crate::PlatformClient;
use crate::error::Result;

/// Operations the lifecycle driver needs from the platform
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Creates a schedule and returns it with its assigned identity
    async fn create_schedule(
        &self,
        namespace: &str,
        definition: &ScheduleDefinition,
    ) -> Result<ScheduleDefinition>;

    /// Lists the schedules in a namespace
    async fn list_schedules(&self, namespace: &str) -> Result<Vec<ScheduleDefinition>>;

    /// Snapshot of the executions in a namespace
    async fn list_executions(&self, namespace: &str) -> Result<Vec<WorkloadExecution>>;

    /// Deletes a schedule by name
    async fn delete_schedule(&self, namespace: &str, name: &str) -> Result<()>;
}

#[async_trait]
impl PlatformApi for PlatformClient {
    async fn create_schedule(
        &self,
        namespace: &str,
        definition: &ScheduleDefinition,
    ) -> Result<ScheduleDefinition> {
        PlatformClient::create_schedule(self, namespace, definition).await
    }

    async fn list_schedules(&self, namespace: &str) -> Result<Vec<ScheduleDefinition>> {
        PlatformClient::list_schedules(self, namespace).await
    }

    async fn list_executions(&self, namespace: &str) -> Result<Vec<WorkloadExecution>> {
        PlatformClient::list_executions(self, namespace).await
    }

    async fn delete_schedule(&self, namespace: &str, name: &str) -> Result<()> {
        PlatformClient::delete_schedule(self, namespace, name).await
    }
}
