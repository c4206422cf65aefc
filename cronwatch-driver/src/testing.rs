//! In-memory platform for driver tests

use async_trait::async_trait;
use cronwatch_client::{ClientError, PlatformApi};
use cronwatch_core::domain::execution::{Phase, WorkloadExecution};
use cronwatch_core::domain::schedule::{ScheduleDefinition, ScheduleIdentity};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::Config;
use crate::scheduler::policy::Sleeper;

pub fn hello_world_definition() -> ScheduleDefinition {
    Config::default().schedule_definition()
}

/// A platform call, in the order it was received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateSchedule,
    ListSchedules,
    ListExecutions,
    DeleteSchedule(String),
}

#[derive(Default)]
struct State {
    schedules: BTreeMap<(String, String), ScheduleDefinition>,
    next_suffix: u32,
    calls: Vec<Call>,
    polls: usize,
}

/// Fake platform with scripted execution phases and injectable failures
#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<State>,
    executions: Vec<(String, Vec<Phase>)>,
    fail_creates: bool,
    unreadable_creates: bool,
    fail_deletes: bool,
    failing_polls: HashSet<usize>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an execution whose phase on the n-th poll is `phases[n]`
    /// (the last phase repeats once the script runs out)
    pub fn with_phases(mut self, name: &str, phases: Vec<Phase>) -> Self {
        self.executions.push((name.to_string(), phases));
        self
    }

    pub fn failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    /// Creates succeed on the platform but the answer cannot be decoded
    pub fn unreadable_creates(mut self) -> Self {
        self.unreadable_creates = true;
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Zero-based poll indexes that fail with a transport-style error
    pub fn failing_polls(mut self, polls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_polls.extend(polls);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::CreateSchedule))
    }

    pub fn poll_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::ListExecutions))
    }

    pub fn delete_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::DeleteSchedule(_)))
    }

    pub fn schedule_count(&self) -> usize {
        self.state.lock().unwrap().schedules.len()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn create_schedule(
        &self,
        namespace: &str,
        definition: &ScheduleDefinition,
    ) -> Result<ScheduleDefinition, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateSchedule);

        if self.fail_creates {
            return Err(ClientError::api_error(403, "cronworkflows is forbidden"));
        }

        let name = match &definition.identity {
            ScheduleIdentity::Name(name) => name.clone(),
            ScheduleIdentity::GenerateName(prefix) => {
                state.next_suffix += 1;
                format!("{}{:05}", prefix, state.next_suffix)
            }
        };

        let key = (namespace.to_string(), name.clone());
        if state.schedules.contains_key(&key) {
            return Err(ClientError::api_error(409, format!("{} already exists", name)));
        }

        let mut stored = definition.clone();
        stored.identity = ScheduleIdentity::Name(name.clone());
        state.schedules.insert(key, stored.clone());

        if self.unreadable_creates {
            return Err(ClientError::UnreadableCreate {
                name,
                message: "unknown concurrency policy".to_string(),
            });
        }
        Ok(stored)
    }

    async fn list_schedules(&self, namespace: &str) -> Result<Vec<ScheduleDefinition>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListSchedules);

        Ok(state
            .schedules
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, def)| def.clone())
            .collect())
    }

    async fn list_executions(&self, namespace: &str) -> Result<Vec<WorkloadExecution>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListExecutions);
        let poll = state.polls;
        state.polls += 1;

        if self.failing_polls.contains(&poll) {
            return Err(ClientError::api_error(503, "apiserver unavailable"));
        }

        let owner = state
            .schedules
            .keys()
            .find(|(ns, _)| ns == namespace)
            .map(|(_, name)| name.clone());

        Ok(self
            .executions
            .iter()
            .filter_map(|(name, phases)| {
                let phase = phases.get(poll).or(phases.last())?;
                Some(WorkloadExecution {
                    name: name.clone(),
                    namespace: namespace.to_string(),
                    phase: *phase,
                    schedule: owner.clone(),
                    started_at: None,
                    finished_at: None,
                })
            })
            .collect())
    }

    async fn delete_schedule(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DeleteSchedule(name.to_string()));

        if self.fail_deletes {
            return Err(ClientError::api_error(500, "etcd timeout"));
        }

        match state.schedules.remove(&(namespace.to_string(), name.to_string())) {
            Some(_) => Ok(()),
            None => Err(ClientError::api_error(404, format!("{} not found", name))),
        }
    }
}

/// Sleeper that returns immediately and records each requested delay
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}
