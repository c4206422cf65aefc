//! Scheduler layer for the driver
//!
//! This layer sequences the schedule lifecycle: submit, poll on a fixed
//! cadence, retire. The polling cadence, early-exit predicate and sleep
//! implementation are injected so tests run without real delays.

pub mod lifecycle;
pub mod policy;

pub use lifecycle::{LifecycleDriver, PollOutcome};
pub use policy::PollPolicy;
