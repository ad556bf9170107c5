use crate::config::BackendConfig;
use crate::error::{BackendError, Error};
use crate::llm::CompletionBackend;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama `/api/generate` backend
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

impl OllamaBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Instruct-style prompt: Ollama's generate endpoint takes a single string
    fn build_prompt(system: &str, user: &str) -> String {
        format!("<system>\n{}\n</system>\n\n<user>\n{}\n</user>", system, user)
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, BackendError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: Self::build_prompt(system, user),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        ::log::info!("Ollama: calling /api/generate with model={}", self.model);
        let resp = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    ::log::warn!("Could not read Ollama error body: {}", e);
                    String::new()
                }
            };
            ::log::error!("Ollama error {}: {}", status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateResponse = resp.json().await?;
        Ok(data.response.unwrap_or_default().trim().to_string())
    }
}
