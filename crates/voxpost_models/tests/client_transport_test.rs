//! Transport failures surface as completion errors instead of panics.

use voxpost_core::CompletionRequest;
use voxpost_interface::CompletionDriver;
use voxpost_models::{CompletionConfig, OpenAiCompatClient};

#[tokio::test]
async fn test_unreachable_server_is_transport_error() -> anyhow::Result<()> {
    // Nothing listens on the discard port of the loopback interface.
    let mut config = CompletionConfig::new("http://127.0.0.1:9", "test-model");
    config.api_key_env = None;
    config.timeout_secs = 5;
    let client = OpenAiCompatClient::new(config)?;

    let request = CompletionRequest::builder()
        .system_prompt("system")
        .user_prompt("user")
        .max_output_tokens(16u32)
        .temperature(0.8f32)
        .build()?;

    let err = client.complete(&request).await.unwrap_err();
    assert!(err.is_completion(), "unexpected error: {}", err);
    Ok(())
}

#[test]
fn test_driver_reports_configured_model() -> anyhow::Result<()> {
    let client = OpenAiCompatClient::new(CompletionConfig::new("http://localhost:8080", "mistral-7b"))?;
    assert_eq!(client.model_name(), "mistral-7b");
    assert_eq!(client.provider_name(), "openai-compatible");
    Ok(())
}
