//! Request and response types at the completion service boundary.

use serde::{Deserialize, Serialize};

/// One call to the text-completion service.
///
/// # Examples
///
/// ```
/// use voxpost_core::CompletionRequest;
///
/// let request = CompletionRequest::builder()
///     .system_prompt("You write short-form scripts.")
///     .user_prompt("Write about meal prep.")
///     .max_output_tokens(1400u32)
///     .temperature(0.8f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.max_output_tokens, 1400);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// System instruction
    pub system_prompt: String,
    /// User instruction
    pub user_prompt: String,
    /// Output token budget
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Creates a new completion request builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// Raw text returned by the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From)]
pub struct CompletionResponse {
    /// Generated text, unprocessed
    pub text: String,
}
