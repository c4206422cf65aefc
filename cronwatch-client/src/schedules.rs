//! Schedule (cron workflow) endpoints

use crate::error::{ClientError, Result};
use crate::{PlatformClient, decode, encode};
use cronwatch_core::domain::schedule::ScheduleDefinition;
use cronwatch_core::dto::cron_workflow::{CronWorkflow, KIND, PLURAL};
use kube::api::{Api, DeleteParams, DynamicObject, ListParams, PostParams};
use tracing::debug;

impl PlatformClient {
    fn cron_workflows(&self, namespace: &str) -> Api<DynamicObject> {
        self.resource(namespace, KIND, PLURAL)
    }

    // =============================================================================
    // Schedule Management
    // =============================================================================

    /// Create a schedule in `namespace`
    ///
    /// # Returns
    /// The schedule as stored by the platform, carrying the assigned name. If
    /// the platform accepted the object but answered with something that does
    /// not decode, the error is [`ClientError::UnreadableCreate`] and carries
    /// the name so the caller can still delete it.
    ///
    /// # Example
    /// ```no_run
    /// # use cronwatch_client::connector::{Connector, KubeconfigConnector};
    /// # use cronwatch_core::domain::schedule::*;
    /// # use std::time::Duration;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = KubeconfigConnector::from_env()
    ///     .connect(Duration::from_secs(30))
    ///     .await?;
    /// let created = client.create_schedule("default", &ScheduleDefinition {
    ///     identity: ScheduleIdentity::GenerateName("nightly-".to_string()),
    ///     schedule: "0 3 * * *".to_string(),
    ///     concurrency_policy: ConcurrencyPolicy::Forbid,
    ///     template: WorkloadTemplate::single_step(Step {
    ///         name: "main".to_string(),
    ///         image: "alpine:3".to_string(),
    ///         command: vec!["sh".to_string()],
    ///         source: "echo hi".to_string(),
    ///     }),
    /// }).await?;
    /// println!("{:?}", created.name());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_schedule(
        &self,
        namespace: &str,
        definition: &ScheduleDefinition,
    ) -> Result<ScheduleDefinition> {
        let manifest = encode(&CronWorkflow::from_definition(definition, namespace))?;
        let created = self
            .cron_workflows(namespace)
            .create(&PostParams::default(), &manifest)
            .await?;

        let Some(name) = created.metadata.name.clone() else {
            return Err(ClientError::ParseError(
                "Created cron workflow has no name".to_string(),
            ));
        };

        decode::<CronWorkflow>(created)
            .map_err(|e| e.to_string())
            .and_then(|cron| ScheduleDefinition::try_from(cron).map_err(|e| e.to_string()))
            .map_err(|message| ClientError::UnreadableCreate { name, message })
    }

    /// List the schedules in `namespace`
    ///
    /// Schedules that use features outside the script-step model (container or
    /// DAG templates, for instance) are skipped.
    pub async fn list_schedules(&self, namespace: &str) -> Result<Vec<ScheduleDefinition>> {
        let list = self
            .cron_workflows(namespace)
            .list(&ListParams::default())
            .await?;

        let schedules = list
            .items
            .into_iter()
            .filter_map(|object| {
                let name = object.metadata.name.clone().unwrap_or_default();
                let parsed = decode::<CronWorkflow>(object)
                    .map_err(|e| e.to_string())
                    .and_then(|cron| ScheduleDefinition::try_from(cron).map_err(|e| e.to_string()));
                match parsed {
                    Ok(definition) => Some(definition),
                    Err(e) => {
                        debug!("Skipping cron workflow {}: {}", name, e);
                        None
                    }
                }
            })
            .collect();

        Ok(schedules)
    }

    /// Delete the schedule `name` in `namespace`
    pub async fn delete_schedule(&self, namespace: &str, name: &str) -> Result<()> {
        self.cron_workflows(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}
