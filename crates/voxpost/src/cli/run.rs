//! Command handlers.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument};
use voxpost::{
    CompletionDriver, CompletionError, CompletionErrorKind, CompletionRequest, CompletionResponse,
    ContentGenerator, GenerationRequest, OpenAiCompatClient, RngSource, ValidationResult,
    VoxpostConfig, VoxpostResult, handle_generate_with, parse_request,
};

/// Generate content and print the outbound JSON response.
#[instrument(skip(config), fields(request = %request.display()))]
pub async fn generate(
    config: &VoxpostConfig,
    request: &Path,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let wire = parse_request(&std::fs::read_to_string(request)?)?;
    let client = OpenAiCompatClient::new(config.completion().clone())?;
    info!(model = %config.completion().model, "Generating content");

    let generator = ContentGenerator::new(client).with_config(config.generation().clone());
    let mut rng = seed.map_or_else(RngSource::from_entropy, RngSource::seeded);
    let response = handle_generate_with(&generator, wire, &mut rng).await;

    print_json(&response)
}

/// Print the first-attempt prompt pair as JSON.
#[instrument(skip(config), fields(request = %request.display()))]
pub fn prompt(
    config: &VoxpostConfig,
    request: &Path,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = load_request(request)?;
    let generator = offline_generator(config)?;
    let mut rng = seed.map_or_else(RngSource::from_entropy, RngSource::seeded);
    let pair = generator.preview(&request, &mut rng);
    print_json(&pair)
}

/// Print the validation result for existing content.
#[instrument(skip(config), fields(request = %request.display(), content = %content.display()))]
pub fn validate(
    config: &VoxpostConfig,
    request: &Path,
    content: &Path,
    repair: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = load_request(request)?;
    let text = std::fs::read_to_string(content)?;
    let generator = offline_generator(config)?;
    let (checked, validation) = generator.check(&text, &request, repair);
    debug!(ok = validation.is_ok(), "Validated content");

    print_json(&ValidationReport {
        content: repair.then_some(checked),
        validation,
    })
}

/// Output of `voxpost validate`.
#[derive(Debug, Serialize)]
struct ValidationReport {
    /// Repaired text, present only with `--repair`
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    validation: ValidationResult,
}

fn load_request(path: &Path) -> Result<GenerationRequest, Box<dyn std::error::Error>> {
    let wire = parse_request(&std::fs::read_to_string(path)?)?;
    Ok(GenerationRequest::from(wire))
}

/// Stand-in driver for commands that never call the model.
///
/// Holds no HTTP client and reads no API key.
#[derive(Debug, Clone)]
struct OfflineDriver {
    model: String,
}

#[async_trait]
impl CompletionDriver for OfflineDriver {
    async fn complete(&self, _req: &CompletionRequest) -> VoxpostResult<CompletionResponse> {
        Err(CompletionError::new(CompletionErrorKind::Configuration(
            "This command does not call the model".to_string(),
        ))
        .into())
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// A generator for commands that never call the model.
fn offline_generator(config: &VoxpostConfig) -> VoxpostResult<ContentGenerator<OfflineDriver>> {
    let driver = OfflineDriver {
        model: config.completion().model.clone(),
    };
    Ok(ContentGenerator::new(driver).with_config(config.generation().clone()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_generator_never_completes() {
        let config = VoxpostConfig::bundled().unwrap();
        let generator = offline_generator(&config).unwrap();
        assert_eq!(generator.driver().provider_name(), "offline");
        assert_eq!(generator.driver().model_name(), config.completion().model);

        let req = CompletionRequest::builder()
            .system_prompt("s")
            .user_prompt("u")
            .max_output_tokens(10u32)
            .temperature(0.5f32)
            .build()
            .unwrap();
        let err = generator.driver().complete(&req).await.unwrap_err();
        assert!(err.is_completion());
    }
}
