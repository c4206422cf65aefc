//! Cronwatch Driver
//!
//! Submits a cron-scheduled workflow to the cluster, watches the executions it
//! spawns for a bounded window, and deletes the schedule afterwards.
//!
//! Architecture:
//! - Configuration: namespace, cadence and polling window from the environment
//! - Connector: in-cluster or kubeconfig credentials, chosen once at startup
//! - Services: schedule management and execution listing
//! - Scheduler: the create → poll → delete lifecycle
//! - Interrupts: first Ctrl-C ends monitoring, a second one exits
//!
//! Progress lines go to stdout; logs go to stderr.

mod config;
mod error;
mod interrupt;
mod scheduler;
mod service;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::DriverError;
use crate::scheduler::{LifecycleDriver, PollOutcome, PollPolicy};
use cronwatch_client::connector::{ClusterConnector, Connector};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cronwatch_driver=info,cronwatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cronwatch driver");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: namespace={}, schedule='{}', polls={} every {:?}",
        config.namespace, config.cron_schedule, config.poll_count, config.poll_interval
    );

    // Connect once; any failure here happens before a platform call
    let connector = ClusterConnector::detect();
    info!("Connecting with {}", connector.describe());
    let client = connector
        .connect(config.request_timeout)
        .await
        .map_err(DriverError::from)?;
    debug!("Platform client ready for {}", client.base_url());

    let mut policy = PollPolicy::new(config.poll_count, config.poll_interval);
    if config.stop_when_settled {
        policy = policy.until_settled();
    }

    let cancel = CancellationToken::new();
    interrupt::spawn_handler(cancel.clone());

    let report = LifecycleDriver::new(Arc::new(client), config.namespace.clone(), policy)
        .with_cancellation(cancel)
        .run(&config.schedule_definition())
        .await?;

    for poll in &report.polls {
        match &poll.outcome {
            PollOutcome::Listed(executions) => debug!(
                "Poll {} at {}: {} execution(s)",
                poll.iteration,
                poll.observed_at,
                executions.len()
            ),
            PollOutcome::Failed(reason) => debug!(
                "Poll {} at {} failed: {}",
                poll.iteration, poll.observed_at, reason
            ),
        }
    }

    info!(
        "Run finished for {}: {} poll(s), {} failed, ended by {:?}, retirement {:?}",
        report.schedule,
        report.polls.len(),
        report.failed_polls(),
        report.ended_by,
        report.retirement
    );

    Ok(())
}
