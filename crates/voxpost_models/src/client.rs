use crate::{CompletionConfig, ChatCompletionResponse, convert};
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;
use voxpost_core::{CompletionRequest, CompletionResponse};
use voxpost_error::{CompletionError, CompletionErrorKind, VoxpostResult};
use voxpost_interface::CompletionDriver;

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    config: CompletionConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a new client, resolving the API key from the environment once.
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        tracing::debug!("Creating completion client");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CompletionError::new(CompletionErrorKind::Configuration(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        let api_key = config.api_key();
        if api_key.is_none() {
            tracing::debug!("No API key configured; sending unauthenticated requests");
        }

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Send one chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &crate::ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let url = self.config.completions_url();
        tracing::debug!("Sending chat completion request to {}", url);

        let mut req = self.client.post(&url).json(request);

        if let Some(api_key) = &self.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            CompletionError::new(CompletionErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Completion service returned error");
            return Err(CompletionError::new(CompletionErrorKind::Api {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            }));
        }

        let result = response.json::<ChatCompletionResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            CompletionError::new(CompletionErrorKind::Deserialization(e.to_string()))
        })?;

        if let Some(usage) = result.usage() {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens(),
                completion_tokens = usage.completion_tokens(),
                "Chat completion successful"
            );
        }
        Ok(result)
    }
}

#[async_trait]
impl CompletionDriver for OpenAiCompatClient {
    #[instrument(skip(self, req), fields(max_output_tokens = req.max_output_tokens))]
    async fn complete(&self, req: &CompletionRequest) -> VoxpostResult<CompletionResponse> {
        let chat_request = convert::to_chat_request(req, &self.config.model)?;
        let response = self.chat_completion(&chat_request).await?;
        Ok(convert::from_chat_response(response)?)
    }

    fn provider_name(&self) -> &'static str {
        "openai-compatible"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
