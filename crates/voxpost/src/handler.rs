//! JSON request handling around the generation pipeline.

use tracing::{error, info, instrument};
use voxpost_core::{GenerateContentRequest, GenerateContentResponse, GenerationRequest};
use voxpost_error::{JsonError, VoxpostError, VoxpostErrorKind, VoxpostResult};
use voxpost_interface::CompletionDriver;
use voxpost_pipeline::{ContentGenerator, RandomSource, RngSource};

/// Decode an inbound generation request.
///
/// The client profile inside is normalized during decoding, so a partial or
/// malformed profile never fails here; only malformed JSON does.
///
/// # Errors
///
/// Returns a JSON error if `payload` is not a JSON object of the expected shape.
pub fn parse_request(payload: &str) -> VoxpostResult<GenerateContentRequest> {
    serde_json::from_str(payload).map_err(|e| {
        VoxpostError::from(JsonError::new("generation request", e.to_string()))
    })
}

/// Run one inbound request through the pipeline and shape the response.
///
/// A result that never passed validation is still returned as content with
/// its failed verdict. Only completion service failures produce
/// `success: false`.
pub async fn handle_generate<D>(
    generator: &ContentGenerator<D>,
    request: GenerateContentRequest,
) -> GenerateContentResponse
where
    D: CompletionDriver,
{
    handle_generate_with(generator, request, &mut RngSource::from_entropy()).await
}

/// [`handle_generate`] with an explicit rotation source.
#[instrument(
    skip_all,
    fields(content_type = %request.content_type, pillar = %request.content_pillar)
)]
pub async fn handle_generate_with<D, R>(
    generator: &ContentGenerator<D>,
    request: GenerateContentRequest,
    rng: &mut R,
) -> GenerateContentResponse
where
    D: CompletionDriver,
    R: RandomSource + Send + ?Sized,
{
    let request = GenerationRequest::from(request);
    match generator.generate_with(&request, rng).await {
        Ok(outcome) => {
            info!(
                state = %outcome.state(),
                attempts = outcome.attempts(),
                "Generation finished"
            );
            let (content, validation) = outcome.into_parts();
            GenerateContentResponse::completed(content, validation)
        }
        Err(e) => {
            error!(error = %e, "Generation failed");
            GenerateContentResponse::failed(failure_message(&e))
        }
    }
}

/// The innermost error text, without wrapper prefixes.
fn failure_message(err: &VoxpostError) -> String {
    match err.kind() {
        VoxpostErrorKind::Completion(completion) => completion.kind.to_string(),
        other => other.to_string(),
    }
}
