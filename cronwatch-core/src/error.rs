//! Validation errors for domain types

use thiserror::Error;

/// A schedule definition or platform object that breaks a domain invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("schedule name or prefix cannot be empty")]
    EmptyIdentity,

    #[error("cron expression '{expression}' has {fields} field(s), expected 5")]
    InvalidCron { expression: String, fields: usize },

    #[error("workload template has no steps")]
    NoSteps,

    #[error("workload template contains a step without a name")]
    EmptyStepName,

    #[error("step '{0}' is defined more than once")]
    DuplicateStep(String),

    #[error("entrypoint '{0}' does not name a step in the template")]
    UnknownEntrypoint(String),

    #[error("unknown concurrency policy '{0}'")]
    UnknownConcurrencyPolicy(String),

    #[error("unknown execution phase '{0}'")]
    UnknownPhase(String),

    #[error("template '{0}' has no script section")]
    MissingScript(String),

    #[error("object has neither name nor generateName")]
    MissingName,
}
