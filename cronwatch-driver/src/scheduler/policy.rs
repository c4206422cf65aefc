//! Polling policy
//!
//! How many times to poll, how long to wait before each poll, and an optional
//! predicate that ends the window early.

use async_trait::async_trait;
use cronwatch_core::domain::execution::WorkloadExecution;
use std::sync::Arc;
use std::time::Duration;

/// Predicate over the submitted schedule's name and a snapshot; returning
/// true ends monitoring
pub type StopCondition = Arc<dyn Fn(&str, &[WorkloadExecution]) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct PollPolicy {
    pub max_iterations: u32,
    pub interval: Duration,
    pub stop_when: Option<StopCondition>,
}

impl std::fmt::Debug for PollPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollPolicy")
            .field("max_iterations", &self.max_iterations)
            .field("interval", &self.interval)
            .field("stop_when", &self.stop_when.is_some())
            .finish()
    }
}

impl PollPolicy {
    pub fn new(max_iterations: u32, interval: Duration) -> Self {
        Self {
            max_iterations,
            interval,
            stop_when: None,
        }
    }

    /// Ends the window as soon as `condition` holds for a snapshot
    pub fn until<F>(mut self, condition: F) -> Self
    where
        F: Fn(&str, &[WorkloadExecution]) -> bool + Send + Sync + 'static,
    {
        self.stop_when = Some(Arc::new(condition));
        self
    }

    /// Ends the window once the schedule has spawned at least one execution
    /// and all of its executions are in a terminal phase
    pub fn until_settled(self) -> Self {
        self.until(|schedule, executions| {
            let mut owned = executions.iter().filter(|e| e.spawned_by(schedule)).peekable();
            owned.peek().is_some() && owned.all(|e| e.phase.is_terminal())
        })
    }

    pub(crate) fn should_stop(&self, schedule: &str, executions: &[WorkloadExecution]) -> bool {
        self.stop_when
            .as_ref()
            .is_some_and(|condition| condition(schedule, executions))
    }
}

/// Timed delay between polls
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
