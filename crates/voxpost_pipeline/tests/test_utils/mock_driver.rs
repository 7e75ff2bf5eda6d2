//! Scripted completion driver for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use voxpost_core::{CompletionRequest, CompletionResponse};
use voxpost_error::{CompletionError, CompletionErrorKind, VoxpostResult};
use voxpost_interface::CompletionDriver;

/// A single scripted reply (text or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error(CompletionErrorKind),
}

/// Completion driver that replays a script and records every request.
///
/// Replies are served in order; the last one repeats once the script runs out.
pub struct MockCompletionDriver {
    script: Vec<MockResponse>,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionDriver {
    /// Always reply with `text`.
    pub fn new_text(text: impl Into<String>) -> Self {
        Self::new_sequence(vec![MockResponse::Text(text.into())])
    }

    /// Always fail with `error`.
    pub fn new_error(error: CompletionErrorKind) -> Self {
        Self::new_sequence(vec![MockResponse::Error(error)])
    }

    /// Reply with each text in turn.
    pub fn new_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new_sequence(texts.into_iter().map(|t| MockResponse::Text(t.into())).collect())
    }

    /// Replay an arbitrary script.
    pub fn new_sequence(script: Vec<MockResponse>) -> Self {
        assert!(!script.is_empty(), "mock script needs at least one reply");
        Self {
            script,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of completion calls made so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionDriver for MockCompletionDriver {
    async fn complete(&self, req: &CompletionRequest) -> VoxpostResult<CompletionResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let index = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            (*count - 1).min(self.script.len() - 1)
        };
        match &self.script[index] {
            MockResponse::Text(text) => Ok(CompletionResponse::from(text.clone())),
            MockResponse::Error(kind) => Err(CompletionError::new(kind.clone()).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
