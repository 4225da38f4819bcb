//! Adapter implementations for the planning ports.
//!
//! - [`memory`]: in-memory store, snapshot loading, and the deterministic
//!   greedy oracle
//! - [`prompted`]: oracle backed by a text-completion endpoint

pub mod memory;
pub mod prompted;
