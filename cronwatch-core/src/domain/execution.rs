//! Workload execution domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One concrete run spawned by a schedule
///
/// Executions belong to the platform. They are only ever read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadExecution {
    pub name: String,
    pub namespace: String,
    pub phase: Phase,
    /// Name of the schedule that spawned this execution, when labelled
    pub schedule: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl WorkloadExecution {
    /// True if this execution was spawned by the named schedule
    pub fn spawned_by(&self, schedule: &str) -> bool {
        self.schedule.as_deref() == Some(schedule)
    }
}

/// Execution lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Error => "Error",
        }
    }

    /// Succeeded, Failed and Error never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Error)
    }

    /// Parses the phase reported by the platform
    ///
    /// A missing or empty phase means the controller has not picked the
    /// execution up yet, which is reported as `Pending`.
    pub fn from_wire(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw.unwrap_or_default() {
            "" | "Pending" => Ok(Self::Pending),
            "Running" => Ok(Self::Running),
            "Succeeded" => Ok(Self::Succeeded),
            "Failed" => Ok(Self::Failed),
            "Error" => Ok(Self::Error),
            other => Err(ValidationError::UnknownPhase(other.to_string())),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
