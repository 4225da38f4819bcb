//! Text completion port used by prompt-driven oracle adapters.

use super::OracleResult;
use async_trait::async_trait;

/// Prompt-in, text-out model endpoint.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Completes `prompt` at the given sampling temperature.
    ///
    /// # Errors
    ///
    /// Returns [`super::OracleError::Unavailable`] when the endpoint cannot
    /// produce a reply.
    async fn complete(&self, prompt: &str, temperature: f32) -> OracleResult<String>;
}
