//! Workflow resource (one execution)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::execution::{Phase, WorkloadExecution};
use crate::dto::CRON_WORKFLOW_LABEL;
use crate::dto::meta::ObjectMeta;
use crate::error::ValidationError;

pub const KIND: &str = "Workflow";
pub const PLURAL: &str = "workflows";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: Option<WorkflowStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl TryFrom<Workflow> for WorkloadExecution {
    type Error = ValidationError;

    fn try_from(workflow: Workflow) -> Result<Self, Self::Error> {
        let mut metadata = workflow.metadata;
        let name = metadata.name.ok_or(ValidationError::MissingName)?;
        let status = workflow.status.unwrap_or_default();

        Ok(WorkloadExecution {
            name,
            namespace: metadata.namespace.unwrap_or_default(),
            phase: Phase::from_wire(status.phase.as_deref())?,
            schedule: metadata.labels.remove(CRON_WORKFLOW_LABEL),
            started_at: status.started_at,
            finished_at: status.finished_at,
        })
    }
}
