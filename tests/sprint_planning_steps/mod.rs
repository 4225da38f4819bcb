//! Step definitions for sprint planning behaviour tests.

pub mod world;

mod given;
mod then;
mod when;
