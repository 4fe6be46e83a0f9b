use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::ai_provider::AiProviderTrait;
use crate::http::{build_client, ResponseExt};

/// Anthropic messages API provider
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: &str, model: &str, base_url: &str, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AiProviderTrait for AnthropicProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/messages", self.base_url);

        let body = json!({
            "model": self.model,
            "max_tokens": 5,
            "messages": [{
                "role": "user",
                "content": prompt
            }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Anthropic")?
            .ensure_success("Anthropic")
            .await?;

        let json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Anthropic response")?;

        // content[0].text
        json["content"][0]["text"]
            .as_str()
            .map(ToString::to_string)
            .context("Failed to extract text from Anthropic response")
    }
}
