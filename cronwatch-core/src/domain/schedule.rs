//! Schedule domain types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;

/// How the schedule is named on the platform
///
/// `GenerateName` asks the platform to append a unique suffix to the prefix,
/// which avoids collisions between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleIdentity {
    Name(String),
    GenerateName(String),
}

impl ScheduleIdentity {
    /// The fixed name, if one has been assigned
    pub fn name(&self) -> Option<&str> {
        match self {
            ScheduleIdentity::Name(name) => Some(name),
            ScheduleIdentity::GenerateName(_) => None,
        }
    }
}

impl std::fmt::Display for ScheduleIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleIdentity::Name(name) => write!(f, "{}", name),
            ScheduleIdentity::GenerateName(prefix) => write!(f, "{}*", prefix),
        }
    }
}

/// Whether overlapping executions of one schedule may coexist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyPolicy {
    #[default]
    Allow,
    Forbid,
    Replace,
}

impl ConcurrencyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Forbid => "Forbid",
            Self::Replace => "Replace",
        }
    }
}

impl std::fmt::Display for ConcurrencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConcurrencyPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Allow" | "" => Ok(Self::Allow),
            "Forbid" => Ok(Self::Forbid),
            "Replace" => Ok(Self::Replace),
            other => Err(ValidationError::UnknownConcurrencyPolicy(other.to_string())),
        }
    }
}

/// A single step of a workload template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub source: String,
}

/// Entrypoint plus the steps it may refer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadTemplate {
    pub entrypoint: String,
    pub steps: Vec<Step>,
}

impl WorkloadTemplate {
    /// Builds a template whose entrypoint is its only step
    pub fn single_step(step: Step) -> Self {
        Self {
            entrypoint: step.name.clone(),
            steps: vec![step],
        }
    }

    /// Checks that the template has steps, unique step names, and an
    /// entrypoint naming one of them
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.steps.is_empty() {
            return Err(ValidationError::NoSteps);
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if step.name.is_empty() {
                return Err(ValidationError::EmptyStepName);
            }
            if !seen.insert(step.name.as_str()) {
                return Err(ValidationError::DuplicateStep(step.name.clone()));
            }
        }

        if !seen.contains(self.entrypoint.as_str()) {
            return Err(ValidationError::UnknownEntrypoint(self.entrypoint.clone()));
        }

        Ok(())
    }
}

/// A cron-triggered workload definition
///
/// The cron expression is only carried as data; the platform evaluates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    pub identity: ScheduleIdentity,
    pub schedule: String,
    pub concurrency_policy: ConcurrencyPolicy,
    pub template: WorkloadTemplate,
}

impl ScheduleDefinition {
    /// Server-assigned or fixed name, if known
    pub fn name(&self) -> Option<&str> {
        self.identity.name()
    }

    /// Validates identity, cron shape and template
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.identity {
            ScheduleIdentity::Name(s) | ScheduleIdentity::GenerateName(s) if s.is_empty() => {
                return Err(ValidationError::EmptyIdentity);
            }
            _ => {}
        }

        let fields = self.schedule.split_whitespace().count();
        if fields != 5 {
            return Err(ValidationError::InvalidCron {
                expression: self.schedule.clone(),
                fields,
            });
        }

        self.template.validate()
    }
}
