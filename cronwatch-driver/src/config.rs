//! Driver configuration
//!
//! Defines the namespace, the schedule to submit and the polling window.
//! Credentials are not configured here; the connector reads `KUBECONFIG`
//! itself when it is the selected strategy.

use std::time::Duration;

use cronwatch_core::domain::schedule::{
    ConcurrencyPolicy, ScheduleDefinition, ScheduleIdentity, Step, WorkloadTemplate,
};

/// Driver configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace the schedule is created in and executions are listed from
    pub namespace: String,

    /// Prefix for the server-generated schedule name
    pub name_prefix: String,

    /// Cron cadence of the schedule
    pub cron_schedule: String,

    /// Whether overlapping executions may run
    pub concurrency_policy: ConcurrencyPolicy,

    /// Number of polls before the schedule is retired
    pub poll_count: u32,

    /// Delay before each poll
    pub poll_interval: Duration,

    /// Stop polling once every execution spawned by the schedule has finished
    pub stop_when_settled: bool,

    /// Longest a platform request may go without progress
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a configuration with defaults for `namespace`
    pub fn new(namespace: String) -> Self {
        Self {
            namespace,
            name_prefix: "hello-world-cron-".to_string(),
            cron_schedule: "* * * * *".to_string(),
            concurrency_policy: ConcurrencyPolicy::Forbid,
            poll_count: 4,
            poll_interval: Duration::from_secs(30),
            stop_when_settled: false,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Every variable is optional:
    /// - CRONWATCH_NAMESPACE (default: default)
    /// - CRONWATCH_SCHEDULE (default: "* * * * *")
    /// - CRONWATCH_POLL_COUNT (default: 4)
    /// - CRONWATCH_POLL_INTERVAL (seconds, default: 30)
    /// - CRONWATCH_STOP_WHEN_SETTLED (true/1, default: false)
    /// - CRONWATCH_REQUEST_TIMEOUT (seconds, default: 30)
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("CRONWATCH_NAMESPACE")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "default".to_string()),
        );

        if let Ok(schedule) = std::env::var("CRONWATCH_SCHEDULE") {
            if !schedule.trim().is_empty() {
                config.cron_schedule = schedule.trim().to_string();
            }
        }

        if let Some(count) = std::env::var("CRONWATCH_POLL_COUNT")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            config.poll_count = count;
        }

        if let Some(interval) = std::env::var("CRONWATCH_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.poll_interval = Duration::from_secs(interval);
        }

        if let Some(timeout) = std::env::var("CRONWATCH_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(timeout);
        }

        config.stop_when_settled = std::env::var("CRONWATCH_STOP_WHEN_SETTLED")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        config
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.namespace.is_empty() {
            anyhow::bail!("namespace cannot be empty");
        }

        if self.poll_count == 0 {
            anyhow::bail!("poll_count must be greater than 0");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        self.schedule_definition().validate()?;

        Ok(())
    }

    /// The single-step schedule this driver submits
    pub fn schedule_definition(&self) -> ScheduleDefinition {
        ScheduleDefinition {
            identity: ScheduleIdentity::GenerateName(self.name_prefix.clone()),
            schedule: self.cron_schedule.clone(),
            concurrency_policy: self.concurrency_policy,
            template: WorkloadTemplate::single_step(Step {
                name: "hello-world".to_string(),
                image: "python:alpine3.6".to_string(),
                command: vec!["python".to_string()],
                source: "print('Hello, world!')".to_string(),
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("default".to_string())
    }
}
