//! Unit tests for the planning module.
//!
//! Tests are organised by planning stage, covering the numeric contracts,
//! ordering rules, structural faults, and the end-to-end run.

mod domain_tests;
