//! Schedule manager
//!
//! Creates and deletes the cron-triggered workload definition.

use cronwatch_client::PlatformApi;
use cronwatch_core::domain::schedule::ScheduleDefinition;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::DriverError;

/// What a retirement call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retirement {
    /// The schedule existed and was deleted
    Deleted,
    /// The platform no longer had the schedule; treated as success
    AlreadyAbsent,
}

/// Submits and retires schedules through the platform API
#[derive(Clone)]
pub struct ScheduleManager {
    api: Arc<dyn PlatformApi>,
}

impl ScheduleManager {
    pub fn new(api: Arc<dyn PlatformApi>) -> Self {
        Self { api }
    }

    /// Validates `definition` and creates it in `namespace`
    ///
    /// # Returns
    /// The stored definition with its server-assigned name
    pub async fn submit(
        &self,
        namespace: &str,
        definition: &ScheduleDefinition,
    ) -> Result<ScheduleDefinition, DriverError> {
        definition.validate()?;

        debug!(
            "Submitting schedule {} ({}) to namespace {}",
            definition.identity, definition.schedule, namespace
        );

        let created = self
            .api
            .create_schedule(namespace, definition)
            .await
            .map_err(DriverError::Submission)?;

        info!(
            "Schedule {} created in namespace {}",
            created.identity, namespace
        );
        Ok(created)
    }

    /// Deletes the schedule `name`
    ///
    /// A schedule the platform reports as not found counts as retired.
    pub async fn retire(&self, namespace: &str, name: &str) -> Result<Retirement, DriverError> {
        match self.api.delete_schedule(namespace, name).await {
            Ok(()) => {
                info!("Schedule {} deleted from namespace {}", name, namespace);
                Ok(Retirement::Deleted)
            }
            Err(e) if e.is_not_found() => {
                warn!("Schedule {} was already absent from namespace {}", name, namespace);
                Ok(Retirement::AlreadyAbsent)
            }
            Err(source) => Err(DriverError::Retirement {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Lists the schedules currently defined in `namespace`
    #[allow(dead_code)]
    pub async fn list(&self, namespace: &str) -> Result<Vec<ScheduleDefinition>, DriverError> {
        self.api
            .list_schedules(namespace)
            .await
            .map_err(DriverError::Query)
    }
}
