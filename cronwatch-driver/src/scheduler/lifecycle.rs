//! Lifecycle driver
//!
//! Runs one schedule through `Idle → Submitted → Monitoring → Retiring → Done`.
//! Once submission succeeds, retirement is attempted on every path out of
//! monitoring: exhaustion, early stop and cancellation.
//! A submission that the platform stored but answered unreadably is retired
//! before the run aborts.

use chrono::{DateTime, Utc};
use cronwatch_client::{ClientError, PlatformApi};
use cronwatch_core::domain::execution::WorkloadExecution;
use cronwatch_core::domain::schedule::ScheduleDefinition;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::policy::{PollPolicy, Sleeper, TokioSleeper};
use crate::error::DriverError;
use crate::service::{Retirement, RunMonitor, ScheduleManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Submitted,
    Monitoring,
    Retiring,
    Done,
    Aborted,
}

/// Result of a single poll
#[derive(Debug, Clone)]
pub enum PollOutcome {
    Listed(Vec<WorkloadExecution>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PollRecord {
    pub iteration: u32,
    pub observed_at: DateTime<Utc>,
    pub outcome: PollOutcome,
}

/// Why the monitoring window ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEnd {
    Exhausted,
    StoppedEarly,
    Cancelled,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct LifecycleReport {
    pub schedule: String,
    pub polls: Vec<PollRecord>,
    pub ended_by: MonitorEnd,
    pub retirement: Retirement,
}

impl LifecycleReport {
    pub fn failed_polls(&self) -> usize {
        self.polls
            .iter()
            .filter(|p| matches!(p.outcome, PollOutcome::Failed(_)))
            .count()
    }
}

/// Single-pass driver; `run` consumes it so a schedule is never resumed
pub struct LifecycleDriver {
    namespace: String,
    schedules: ScheduleManager,
    monitor: RunMonitor,
    policy: PollPolicy,
    sleeper: Arc<dyn Sleeper>,
    cancel: CancellationToken,
    state: LifecycleState,
}

impl LifecycleDriver {
    pub fn new(api: Arc<dyn PlatformApi>, namespace: impl Into<String>, policy: PollPolicy) -> Self {
        Self {
            namespace: namespace.into(),
            schedules: ScheduleManager::new(api.clone()),
            monitor: RunMonitor::new(api),
            policy,
            sleeper: Arc::new(TokioSleeper),
            cancel: CancellationToken::new(),
            state: LifecycleState::Idle,
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Cancelling `token` ends monitoring early; retirement still runs
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Submits `definition`, monitors executions, then retires the schedule
    pub async fn run(mut self, definition: &ScheduleDefinition) -> Result<LifecycleReport, DriverError> {
        let created = match self.schedules.submit(&self.namespace, definition).await {
            Ok(created) => created,
            Err(e) => {
                error!("Schedule submission failed: {}", e);
                if let Some(name) = e.created_schedule() {
                    self.transition(LifecycleState::Retiring);
                    self.retire_orphan(name).await;
                }
                self.transition(LifecycleState::Aborted);
                return Err(e);
            }
        };

        let Some(name) = created.name().map(str::to_string) else {
            self.transition(LifecycleState::Aborted);
            return Err(DriverError::Submission(ClientError::ParseError(
                "platform did not assign a schedule name".to_string(),
            )));
        };

        self.transition(LifecycleState::Submitted);
        println!("Cron workflow created: {}", name);

        self.transition(LifecycleState::Monitoring);
        let (polls, ended_by) = self.monitor_window(&name).await;
        debug!("Monitoring ended ({:?}) after {} poll(s)", ended_by, polls.len());

        self.transition(LifecycleState::Retiring);
        let retirement = match self.schedules.retire(&self.namespace, &name).await {
            Ok(retirement) => retirement,
            Err(e) => {
                self.transition(LifecycleState::Aborted);
                error!("Schedule {} was left active: {}", name, e);
                return Err(e);
            }
        };

        match retirement {
            Retirement::Deleted => println!("Cron workflow deleted: {}", name),
            Retirement::AlreadyAbsent => println!("Cron workflow already absent: {}", name),
        }
        self.transition(LifecycleState::Done);

        Ok(LifecycleReport {
            schedule: name,
            polls,
            ended_by,
            retirement,
        })
    }

    /// Polls up to `max_iterations` times; query errors are logged and
    /// counted as an iteration
    async fn monitor_window(&self, schedule: &str) -> (Vec<PollRecord>, MonitorEnd) {
        let total = self.policy.max_iterations;
        let mut polls = Vec::with_capacity(total as usize);

        for iteration in 1..=total {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    info!("Monitoring cancelled before poll {}/{}", iteration, total);
                    return (polls, MonitorEnd::Cancelled);
                }
                _ = self.sleeper.sleep(self.policy.interval) => {}
            }

            let observed_at = Utc::now();
            match self.monitor.poll(&self.namespace).await {
                Ok(executions) => {
                    print_executions(&executions);
                    let stop = self.policy.should_stop(schedule, &executions);
                    polls.push(PollRecord {
                        iteration,
                        observed_at,
                        outcome: PollOutcome::Listed(executions),
                    });

                    if stop {
                        info!("Stop condition met after poll {}/{}", iteration, total);
                        return (polls, MonitorEnd::StoppedEarly);
                    }
                }
                Err(e) => {
                    warn!("Poll {}/{} failed: {}", iteration, total, e);
                    polls.push(PollRecord {
                        iteration,
                        observed_at,
                        outcome: PollOutcome::Failed(e.to_string()),
                    });
                }
            }
        }

        (polls, MonitorEnd::Exhausted)
    }

    /// Best-effort delete of a schedule stored by a submission that failed
    async fn retire_orphan(&self, name: &str) {
        warn!("Schedule {} was stored despite the failed submission, retiring it", name);
        match self.schedules.retire(&self.namespace, name).await {
            Ok(_) => println!("Cron workflow deleted: {}", name),
            Err(e) => error!("Schedule {} was left active: {}", name, e),
        }
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!("Lifecycle {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn print_executions(executions: &[WorkloadExecution]) {
    println!("Workflows:");
    for execution in executions {
        println!(" - Name: {}, Status: {}", execution.name, execution.phase);
    }
}
