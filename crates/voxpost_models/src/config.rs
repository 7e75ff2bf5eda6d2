//! Connection settings for an OpenAI-compatible completion service.

use serde::{Deserialize, Serialize};

/// Connection settings for the completion service.
///
/// Deserialized from the `[completion]` table of `voxpost.toml`. The API key
/// itself never lives in the file; `api_key_env` names the environment
/// variable holding it.
///
/// # Example
///
/// ```toml
/// [completion]
/// base_url = "https://api.openai.com"
/// model = "gpt-4o-mini"
/// api_key_env = "OPENAI_API_KEY"
/// timeout_secs = 90
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL of the server, without the `/v1/...` path
    pub base_url: String,
    /// Model identifier to request
    pub model: String,
    /// Environment variable holding the bearer token; unset means no auth
    pub api_key_env: Option<String>,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            timeout_secs: 120,
        }
    }
}

impl CompletionConfig {
    /// Create a configuration for the given server and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Use a different environment variable for the API key.
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = Some(name.into());
        self
    }

    /// Resolve the API key from the environment, if one is configured and set.
    pub fn api_key(&self) -> Option<String> {
        let name = self.api_key_env.as_deref()?;
        std::env::var(name).ok().filter(|key| !key.trim().is_empty())
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
