//! Wire types for the platform API
//!
//! This module contains the JSON shapes served by the orchestration platform
//! (Argo resources behind the Kubernetes API server) and the conversions
//! between them and the domain types. Only the fields the driver reads or
//! writes are modelled; everything else is ignored on decode.

pub mod cron_workflow;
pub mod meta;
pub mod workflow;

/// API group of the workflow resources
pub const GROUP: &str = "argoproj.io";

/// API version of the workflow resources
pub const VERSION: &str = "v1alpha1";

/// `apiVersion` written into manifests
pub const API_VERSION: &str = "argoproj.io/v1alpha1";

/// Label the platform puts on executions spawned by a schedule
pub const CRON_WORKFLOW_LABEL: &str = "workflows.argoproj.io/cron-workflow";
