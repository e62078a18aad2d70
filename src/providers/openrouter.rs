use crate::config::AiConfig;
use crate::error::IngestError;
use crate::providers::{LlmProvider, ANALYSIS_SYSTEM_PROMPT};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// OpenAI-compatible chat completions on OpenRouter, trying each model in turn
pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
    temperature: f32,
    max_tokens: u32,
    referer: String,
    title: String,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider from configuration
    pub fn new(config: &AiConfig) -> Result<Self, IngestError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var("OPENROUTER_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| {
                IngestError::Provider(
                    "OPENROUTER_API_KEY not found in config or environment".to_string(),
                )
            })?;

        if config.models.is_empty() {
            return Err(IngestError::Provider("No models configured".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(OpenRouterProvider {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            models: config.models.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            referer: config.referer.clone(),
            title: config.title.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, models: Vec<String>) -> Self {
        let defaults = AiConfig::default();
        OpenRouterProvider {
            client: Client::new(),
            api_key,
            base_url,
            models,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            referer: defaults.referer,
            title: defaults.title,
        }
    }

    async fn complete_with_model(&self, model: &str, prompt: &str) -> Result<String, String> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&json!({
                "model": model,
                "messages": [
                    {"role": "system", "content": ANALYSIS_SYSTEM_PROMPT},
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status.as_u16(), body));
        }

        let response_body: Value = response.json().await.map_err(|e| e.to_string())?;
        debug!("{:?}", response_body);

        response_body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
            .ok_or_else(|| "Empty content in response".to_string())
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn provider_name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, prompt: &str) -> Result<String, IngestError> {
        let mut all_errors: Vec<String> = Vec::new();

        for (attempt, model) in self.models.iter().enumerate() {
            debug!(
                "Requesting completion from {} (model {}/{})",
                model,
                attempt + 1,
                self.models.len()
            );

            match self.complete_with_model(model, prompt).await {
                Ok(content) => {
                    info!("Completion received from {}", model);
                    return Ok(content);
                }
                Err(e) => {
                    warn!("Model {} failed: {}", model, e);
                    all_errors.push(format!("{}: {}", model, e));
                }
            }
        }

        Err(IngestError::Provider(format!(
            "All models failed:\n{}",
            all_errors.join("\n")
        )))
    }
}
