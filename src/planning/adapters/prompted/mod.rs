//! Model-backed oracle adapter.
//!
//! [`PromptedBacklogOracle`] renders drafting prompts, sends them through a
//! [`TextCompletion`](crate::planning::ports::TextCompletion) port, and
//! extracts the JSON object from each reply.

mod extract;
mod oracle;
mod templates;

pub use oracle::PromptedBacklogOracle;
