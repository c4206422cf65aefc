//! Service layer
//!
//! Services wrap the platform API with the driver's error policy:
//! - `ScheduleManager`: submit, retire and list schedules
//! - `RunMonitor`: snapshot listing of executions
//!
//! Both hold the API behind `Arc<dyn PlatformApi>` so tests can inject an
//! in-memory platform.

mod run_monitor;
mod schedule_manager;

pub use run_monitor::RunMonitor;
pub use schedule_manager::{Retirement, ScheduleManager};
