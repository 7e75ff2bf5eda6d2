//! Retry controller driving prompt, completion, repair and validation.

use serde::Serialize;
use voxpost_core::{CompletionRequest, GenerationRequest, ValidationResult};
use voxpost_error::{BuilderError, BuilderErrorKind, VoxpostResult};
use voxpost_interface::CompletionDriver;

use crate::{
    ContentFormat, GenerationConfig, PromptBuilder, PromptPair, RandomSource, RepairContext,
    RepairPass, RngSource, RotationPicks, RotationPools, RuleBook, Validator,
};

const FALLBACK_TITLE_WORDS: usize = 8;

/// Where the retry loop stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum RetryState {
    /// Another completion call is due
    #[display("attempting #{attempt}")]
    Attempting {
        attempt: u32,
        last_failure: Option<String>,
    },
    /// An attempt passed validation
    #[display("succeeded")]
    Succeeded,
    /// Every allowed attempt failed validation
    #[display("exhausted")]
    Exhausted,
}

impl RetryState {
    /// The state before the first call.
    pub fn start() -> Self {
        Self::Attempting {
            attempt: 1,
            last_failure: None,
        }
    }

    /// State after `attempt` finished with `validation`, given an attempt limit.
    pub fn after(attempt: u32, limit: u32, validation: &ValidationResult) -> Self {
        if validation.is_ok() {
            Self::Succeeded
        } else if attempt >= limit {
            Self::Exhausted
        } else {
            Self::Attempting {
                attempt: attempt + 1,
                last_failure: Some(validation.reason().clone()),
            }
        }
    }

    /// Whether the loop has stopped.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting { .. })
    }
}

/// Record of one completion call and what the pipeline made of it.
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerationAttempt {
    /// 1-based attempt number
    index: u32,
    /// Instructions sent
    prompts: PromptPair,
    /// Completion text as received
    raw: String,
    /// Text after the repair pass
    repaired: String,
    /// Verdict on the repaired text
    validation: ValidationResult,
}

/// Final result of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    /// Terminal state: succeeded or exhausted
    state: RetryState,
    /// Completion calls made
    attempts: u32,
    /// Format the content was checked against
    format: ContentFormat,
    /// The last attempt, whose repaired text is the deliverable
    last: GenerationAttempt,
}

impl GenerationOutcome {
    /// Whether validation passed.
    pub fn succeeded(&self) -> bool {
        self.state == RetryState::Succeeded
    }

    /// Repaired text of the last attempt.
    pub fn content(&self) -> &str {
        &self.last.repaired
    }

    /// Verdict on the last attempt.
    pub fn validation(&self) -> &ValidationResult {
        &self.last.validation
    }

    /// Consumes the outcome, returning content and verdict.
    pub fn into_parts(self) -> (String, ValidationResult) {
        (self.last.repaired, self.last.validation)
    }
}

/// Title used when a completion arrives without one.
///
/// The first words of the idea, else the pillar and format, else the format.
pub fn fallback_title(request: &GenerationRequest, format: ContentFormat) -> String {
    let idea_line = request
        .idea_text()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    if !idea_line.is_empty() {
        let words: Vec<&str> = idea_line.split_whitespace().take(FALLBACK_TITLE_WORDS).collect();
        return words.join(" ");
    }
    let pillar = request.content_pillar.trim();
    let format = format.to_string();
    if pillar.is_empty() {
        capitalize(&format)
    } else {
        format!("{} {}", capitalize(pillar), format)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Runs constrained generation against a completion driver.
///
/// # Example
///
/// ```rust,ignore
/// use voxpost_pipeline::ContentGenerator;
///
/// let generator = ContentGenerator::new(driver).with_config(config);
/// let outcome = generator.generate(&request).await?;
/// println!("{}", outcome.content());
/// ```
pub struct ContentGenerator<D: CompletionDriver> {
    driver: D,
    config: GenerationConfig,
    rules: RuleBook,
    pools: RotationPools,
}

impl<D: CompletionDriver> ContentGenerator<D> {
    /// Create a generator with default settings and the built-in tables.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            config: GenerationConfig::default(),
            rules: RuleBook::STANDARD,
            pools: RotationPools::STANDARD,
        }
    }

    /// Replace the loop settings.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the banned-phrase and hashtag tables.
    pub fn with_rules(mut self, rules: RuleBook) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the style rotation pools.
    pub fn with_pools(mut self, pools: RotationPools) -> Self {
        self.pools = pools;
        self
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Active loop settings.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// First-attempt prompts, without calling the driver.
    pub fn preview<R>(&self, request: &GenerationRequest, rng: &mut R) -> PromptPair
    where
        R: RandomSource + ?Sized,
    {
        let picks = RotationPicks::draw(
            &self.pools,
            &request.recent_hooks,
            &request.recent_openers,
            rng,
        );
        PromptBuilder::new(request, &picks, &self.rules, *self.config.hashtag_minimum()).build()
    }

    /// Repairs and validates existing text without calling the driver.
    pub fn check(
        &self,
        text: &str,
        request: &GenerationRequest,
        repair: bool,
    ) -> (String, ValidationResult) {
        let format = ContentFormat::from_content_type(&request.content_type);
        let content = if repair {
            let title = fallback_title(request, format);
            self.repair_pass().apply(text, &self.repair_context(request, &title))
        } else {
            text.to_string()
        };
        let validation = self.validator().validate(&content, request);
        (content, validation)
    }

    /// Generates content with rotation drawn from system entropy.
    ///
    /// # Errors
    ///
    /// Returns an error only when the completion service fails; validation
    /// failures are reported in the outcome.
    pub async fn generate(&self, request: &GenerationRequest) -> VoxpostResult<GenerationOutcome> {
        let mut rng = RngSource::from_entropy();
        self.generate_with(request, &mut rng).await
    }

    /// Generates content drawing rotation picks from `rng`.
    ///
    /// Picks are drawn once and reused for every attempt. Each attempt sends
    /// the prompts (with the prior failure reason after the first), repairs
    /// the completion and validates it, stopping at the first pass or when
    /// the attempt limit is reached.
    ///
    /// # Errors
    ///
    /// Returns an error when the completion service fails. That error ends the
    /// request immediately and is never retried here.
    #[tracing::instrument(
        skip(self, request, rng),
        fields(
            content_type = %request.content_type,
            pillar = %request.content_pillar,
            model = self.driver.model_name(),
        )
    )]
    pub async fn generate_with<R>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> VoxpostResult<GenerationOutcome>
    where
        R: RandomSource + Send + ?Sized,
    {
        let format = ContentFormat::from_content_type(&request.content_type);
        let limit = self.config.attempt_limit();
        let picks = RotationPicks::draw(
            &self.pools,
            &request.recent_hooks,
            &request.recent_openers,
            rng,
        );
        let prompts =
            PromptBuilder::new(request, &picks, &self.rules, *self.config.hashtag_minimum())
                .build();
        let title = fallback_title(request, format);
        let repair = self.repair_pass();
        let repair_ctx = self.repair_context(request, &title);
        let validator = self.validator();

        tracing::info!(%format, limit, "Starting generation");

        let mut state = RetryState::start();
        let mut last: Option<GenerationAttempt> = None;

        while let RetryState::Attempting {
            attempt,
            last_failure,
        } = &state
        {
            let attempt = *attempt;
            let sent = prompts.with_failure(last_failure.as_deref());
            let completion = CompletionRequest::builder()
                .system_prompt(sent.system().clone())
                .user_prompt(sent.user().clone())
                .max_output_tokens(self.config.output_tokens_for(format))
                .temperature(*self.config.temperature())
                .build()
                .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())))?;

            let raw = match self.driver.complete(&completion).await {
                Ok(response) => response.text,
                Err(e) => {
                    tracing::error!(attempt, error = %e, "Completion failed");
                    return Err(e);
                }
            };

            let repaired = repair.apply(&raw, &repair_ctx);
            let validation = validator.validate(&repaired, request);
            if validation.is_ok() {
                tracing::info!(attempt, "Attempt passed validation");
            } else {
                tracing::warn!(attempt, reason = %validation.reason(), "Attempt failed validation");
            }

            state = RetryState::after(attempt, limit, &validation);
            last = Some(GenerationAttempt {
                index: attempt,
                prompts: sent,
                raw,
                repaired,
                validation,
            });
        }

        let Some(last) = last else {
            return Err(BuilderError::new(BuilderErrorKind::MissingField(
                "generation attempt".to_string(),
            ))
            .into());
        };
        if state == RetryState::Exhausted {
            tracing::warn!(
                attempts = last.index,
                reason = %last.validation.reason(),
                "Attempts exhausted"
            );
        }
        Ok(GenerationOutcome {
            state,
            attempts: last.index,
            format,
            last,
        })
    }

    fn repair_pass(&self) -> RepairPass<'_> {
        RepairPass::new(&self.rules, *self.config.hashtag_minimum())
    }

    fn validator(&self) -> Validator<'_> {
        Validator::new(&self.rules, *self.config.hashtag_minimum())
    }

    fn repair_context<'r>(
        &self,
        request: &'r GenerationRequest,
        title: &'r str,
    ) -> RepairContext<'r> {
        RepairContext {
            fallback_title: title,
            cta: request.cta(),
            profile: &request.profile,
        }
    }
}
