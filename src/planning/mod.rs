//! Sprint planning for Cadence.
//!
//! This module turns a project's epics into capacity-bounded sprints. Task
//! and sprint drafts come from an untrusted oracle; the deterministic layer
//! computes the capacity budget, orders the backlog by priority, clamps and
//! normalises drafted work, reinjects pending tasks, validates the proposed
//! partition, and resolves assignees for the sprint selected for execution.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Run configuration in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
