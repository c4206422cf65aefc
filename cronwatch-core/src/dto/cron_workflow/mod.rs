//! CronWorkflow resource

use serde::{Deserialize, Serialize};

use crate::domain::schedule::{ScheduleDefinition, ScheduleIdentity, Step, WorkloadTemplate};
use crate::dto::API_VERSION;
use crate::dto::meta::ObjectMeta;
use crate::error::ValidationError;

pub const KIND: &str = "CronWorkflow";
pub const PLURAL: &str = "cronworkflows";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronWorkflow {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: CronWorkflowSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronWorkflowSpec {
    pub schedule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_policy: Option<String>,
    pub workflow_spec: WorkflowSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSpec {
    pub entrypoint: String,
    #[serde(default)]
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptTemplate>,
}

/// Script template: container fields are inlined next to `source`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptTemplate {
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    pub source: String,
}

impl CronWorkflow {
    /// Builds the manifest for `definition` in `namespace`
    pub fn from_definition(definition: &ScheduleDefinition, namespace: &str) -> Self {
        let (name, generate_name) = match &definition.identity {
            ScheduleIdentity::Name(name) => (Some(name.clone()), None),
            ScheduleIdentity::GenerateName(prefix) => (None, Some(prefix.clone())),
        };

        let templates = definition
            .template
            .steps
            .iter()
            .map(|step| Template {
                name: step.name.clone(),
                script: Some(ScriptTemplate {
                    image: step.image.clone(),
                    command: step.command.clone(),
                    source: step.source.clone(),
                }),
            })
            .collect();

        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name,
                generate_name,
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            spec: CronWorkflowSpec {
                schedule: definition.schedule.clone(),
                concurrency_policy: Some(definition.concurrency_policy.as_str().to_string()),
                workflow_spec: WorkflowSpec {
                    entrypoint: definition.template.entrypoint.clone(),
                    templates,
                },
            },
        }
    }
}

impl TryFrom<CronWorkflow> for ScheduleDefinition {
    type Error = ValidationError;

    fn try_from(cron: CronWorkflow) -> Result<Self, Self::Error> {
        let identity = match (cron.metadata.name, cron.metadata.generate_name) {
            (Some(name), _) => ScheduleIdentity::Name(name),
            (None, Some(prefix)) => ScheduleIdentity::GenerateName(prefix),
            (None, None) => return Err(ValidationError::MissingName),
        };

        let concurrency_policy = cron
            .spec
            .concurrency_policy
            .as_deref()
            .unwrap_or_default()
            .parse()?;

        let steps = cron
            .spec
            .workflow_spec
            .templates
            .into_iter()
            .map(|template| {
                let script = template
                    .script
                    .ok_or_else(|| ValidationError::MissingScript(template.name.clone()))?;
                Ok(Step {
                    name: template.name,
                    image: script.image,
                    command: script.command,
                    source: script.source,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(ScheduleDefinition {
            identity,
            schedule: cron.spec.schedule,
            concurrency_policy,
            template: WorkloadTemplate {
                entrypoint: cron.spec.workflow_spec.entrypoint,
                steps,
            },
        })
    }
}
