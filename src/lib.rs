//! Cadence: capacity-bounded sprint planning.
//!
//! This crate turns a project's epics into time-boxed sprints sized to the
//! team's capacity. Drafting task and sprint content is delegated to an
//! untrusted oracle; Cadence validates and corrects what the oracle proposes
//! before anything leaves a planning run.
//!
//! # Architecture
//!
//! Cadence follows hexagonal architecture principles:
//!
//! - **Domain**: Pure planning records and invariants
//! - **Ports**: Abstract trait interfaces for the store and the oracle
//! - **Adapters**: In-memory and model-backed implementations of ports
//!
//! # Modules
//!
//! - [`planning`]: Capacity, ordering, sanitising, and sprint allocation

pub mod planning;
