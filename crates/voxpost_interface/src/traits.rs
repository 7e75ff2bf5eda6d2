//! Trait definitions for completion backends.

use async_trait::async_trait;
use std::sync::Arc;
use voxpost_core::{CompletionRequest, CompletionResponse};
use voxpost_error::VoxpostResult;

/// Core trait that every completion backend implements.
///
/// Errors are fatal for the calling request; implementations must not
/// retry internally.
#[async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Produce raw text for the given prompt pair.
    async fn complete(&self, req: &CompletionRequest) -> VoxpostResult<CompletionResponse>;

    /// Provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: CompletionDriver + ?Sized> CompletionDriver for Arc<T> {
    async fn complete(&self, req: &CompletionRequest) -> VoxpostResult<CompletionResponse> {
        (**self).complete(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: CompletionDriver + ?Sized> CompletionDriver for Box<T> {
    async fn complete(&self, req: &CompletionRequest) -> VoxpostResult<CompletionResponse> {
        (**self).complete(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
