mod openrouter;
mod prompt;

pub use openrouter::OpenRouterProvider;
pub use prompt::{
    build_analysis_prompt, build_notes_prompt, ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM_PROMPT,
    NOTES_PROMPT_TEMPLATE,
};

use crate::error::IngestError;
use async_trait::async_trait;

/// A remote model that turns a prompt into text.
///
/// Nothing about the answer is trusted; callers run it through
/// [`crate::json_extract::extract_json`] and check its shape.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openrouter")
    fn provider_name(&self) -> &str;

    /// Send `prompt` and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String, IngestError>;
}
