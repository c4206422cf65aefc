//! Cronwatch Core
//!
//! Core types for the cronwatch schedule lifecycle driver.
//!
//! This crate contains:
//! - Domain types: the schedule definition the driver owns and the workload
//!   executions it observes
//! - DTOs: the platform's wire format and conversions to and from the domain

pub mod domain;
pub mod dto;
pub mod error;

pub use error::ValidationError;
