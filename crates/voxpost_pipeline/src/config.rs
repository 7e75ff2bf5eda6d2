//! Tunables for the generation loop.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::ContentFormat;

/// Hard ceiling on completion calls per request.
pub const MAX_ATTEMPTS: u32 = 5;

/// Settings read from the `[generation]` table.
///
/// # Example
///
/// ```toml
/// [generation]
/// max_attempts = 5
/// hashtag_minimum = 12
/// temperature = 0.8
/// max_output_tokens = 1400
/// long_form_token_multiplier = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[serde(default)]
#[builder(default)]
pub struct GenerationConfig {
    /// Completion calls allowed per request, clamped to `1..=MAX_ATTEMPTS`
    max_attempts: u32,
    /// Hashtags every output must carry
    hashtag_minimum: usize,
    /// Sampling temperature sent with each call
    temperature: f32,
    /// Output token cap for every format except long-form
    max_output_tokens: u32,
    /// Factor applied to the token cap for long-form output
    long_form_token_multiplier: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            hashtag_minimum: 12,
            temperature: 0.8,
            max_output_tokens: 1400,
            long_form_token_multiplier: 2,
        }
    }
}

impl GenerationConfig {
    /// Create a new builder seeded with the defaults.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Attempts per request, between one and [`MAX_ATTEMPTS`].
    pub fn attempt_limit(&self) -> u32 {
        self.max_attempts.clamp(1, MAX_ATTEMPTS)
    }

    /// Token cap for a given format.
    pub fn output_tokens_for(&self, format: ContentFormat) -> u32 {
        match format {
            ContentFormat::LongForm => self
                .max_output_tokens
                .saturating_mul(self.long_form_token_multiplier.max(1)),
            _ => self.max_output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_form_doubles_tokens() {
        let config = GenerationConfig::default();
        assert_eq!(config.output_tokens_for(ContentFormat::ShortForm), 1400);
        assert_eq!(config.output_tokens_for(ContentFormat::LongForm), 2800);
    }

    #[test]
    fn test_builder_defaults_and_attempt_floor() {
        let config = GenerationConfig::builder()
            .max_attempts(0_u32)
            .build()
            .unwrap();
        assert_eq!(config.attempt_limit(), 1);
        assert_eq!(config.hashtag_minimum(), &12);
    }

    #[test]
    fn test_attempt_limit_ceiling() {
        let config = GenerationConfig::builder()
            .max_attempts(50_u32)
            .build()
            .unwrap();
        assert_eq!(config.attempt_limit(), MAX_ATTEMPTS);

        let config = GenerationConfig::builder()
            .max_attempts(3_u32)
            .build()
            .unwrap();
        assert_eq!(config.attempt_limit(), 3);
    }

    #[test]
    fn test_partial_toml() {
        let config: GenerationConfig = toml::from_str("max_attempts = 3").unwrap();
        assert_eq!(config.max_attempts(), &3);
        assert_eq!(config.temperature(), &0.8);
    }
}
