//! Conversion between Voxpost completion types and chat-completions API types

use crate::{ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse, ChatMessage};
use voxpost_core::{CompletionRequest, CompletionResponse};
use voxpost_error::{CompletionError, CompletionErrorKind};

/// Convert a CompletionRequest into a two-message chat request
#[tracing::instrument(skip(request))]
pub fn to_chat_request(
    request: &CompletionRequest,
    model: &str,
) -> Result<ChatCompletionRequest, CompletionError> {
    ChatCompletionRequestBuilder::default()
        .model(model)
        .messages(vec![
            ChatMessage::system(request.system_prompt.clone()),
            ChatMessage::user(request.user_prompt.clone()),
        ])
        .max_tokens(request.max_output_tokens)
        .temperature(request.temperature)
        .build()
        .map_err(|e| {
            CompletionError::new(CompletionErrorKind::Configuration(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Take the first choice's text as the completion
#[tracing::instrument(skip(response))]
pub fn from_chat_response(
    response: ChatCompletionResponse,
) -> Result<CompletionResponse, CompletionError> {
    let choice = response
        .choices()
        .first()
        .ok_or_else(|| CompletionError::new(CompletionErrorKind::EmptyResponse))?;

    if let Some(reason) = choice.finish_reason() {
        tracing::debug!(finish_reason = %reason, "Completion finished");
    }

    match choice.message().content() {
        Some(text) if !text.trim().is_empty() => Ok(CompletionResponse::from(text.clone())),
        _ => Err(CompletionError::new(CompletionErrorKind::EmptyResponse)),
    }
}
