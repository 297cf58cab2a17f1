//! Outbound client for the OpenAI Responses API.
//!
//! The handler only sees the [`TextGenerator`] trait, so tests can swap in a
//! canned generator without a network.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::OpenAiConfig;
use crate::error::UpstreamError;

/// Turns a prompt into the model's reply text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ResponsesEnvelope {
    #[serde(default)]
    output_text: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    url: String,
    model: String,
    temperature: f64,
}

impl OpenAiClient {
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &OpenAiConfig, http: Client) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            http,
            api_key,
            url: config.responses_url(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = ResponsesRequest {
            model: &self.model,
            input: prompt,
            temperature: self.temperature,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending request to OpenAI");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        info!("Received response status: {}", status);

        if !status.is_success() {
            let body = response.text().await?;
            return Err(UpstreamError::Status { status, body });
        }

        let body = response.text().await?;
        let envelope: ResponsesEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.output_text.unwrap_or_default())
    }
}
