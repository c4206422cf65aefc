//! Core domain types
//!
//! This module contains the entities the driver manipulates: the schedule it
//! owns for the duration of a run, and the executions the platform spawns from
//! it (which are only observed).

pub mod execution;
pub mod schedule;
