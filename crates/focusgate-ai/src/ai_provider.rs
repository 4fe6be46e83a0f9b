use anyhow::{Context, Result};
use async_trait::async_trait;
use focusgate_storage::{AiConfig, AiProvider};

use crate::providers::{anthropic::AnthropicProvider, openai::OpenAiProvider};

/// Trait for AI providers
#[async_trait]
pub trait AiProviderTrait: Send + Sync {
    /// Generate text response for a given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name being used
    fn model_name(&self) -> &str;
}

/// Create a provider instance based on configuration
///
/// # Errors
///
/// Returns an error if no API key is available or the HTTP client cannot be built.
pub fn create_provider(config: &AiConfig) -> Result<Box<dyn AiProviderTrait>> {
    let model = config.effective_model();
    let base_url = config.effective_base_url();
    let api_key = config
        .effective_api_key()
        .with_context(|| format!("API key required for {}", config.provider))?;

    match config.provider {
        AiProvider::OpenAi => Ok(Box::new(OpenAiProvider::new(
            &api_key,
            model,
            base_url,
            config.timeout_seconds,
        )?)),
        AiProvider::Anthropic => Ok(Box::new(AnthropicProvider::new(
            &api_key,
            model,
            base_url,
            config.timeout_seconds,
        )?)),
    }
}
