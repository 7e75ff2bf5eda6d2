//! Constrained content generation for Voxpost.
//!
//! A request flows through these stages:
//!
//! 1. **Rotation**: one hook formula, opener, open loop, re-hook and loop-back
//!    are drawn, steering away from the caller's recently used hooks and openers.
//! 2. **Prompt**: brand context, banned phrases, pillar and mode rules, the call
//!    to action policy and the output format are assembled into a prompt pair.
//! 3. **Completion**: a [`voxpost_interface::CompletionDriver`] produces raw text.
//! 4. **Repair**: em dashes, a missing title, the call to action and hashtags
//!    are fixed deterministically.
//! 5. **Validation**: ordered checks decide whether to accept or retry.
//!
//! [`ContentGenerator`] runs stages 3 to 5 up to the configured attempt limit,
//! feeding each failure reason into the next prompt.
//!
//! # Example
//!
//! ```rust,ignore
//! use voxpost_pipeline::{ContentGenerator, RngSource};
//!
//! let generator = ContentGenerator::new(driver);
//! let outcome = generator
//!     .generate_with(&request, &mut RngSource::seeded(7))
//!     .await?;
//! assert!(outcome.attempts() <= &5);
//! ```

#![forbid(unsafe_code)]

mod config;
mod context;
mod format;
mod generator;
mod prompt;
mod repair;
mod rotation;
mod rules;
mod sections;
mod validator;

pub use config::{GenerationConfig, GenerationConfigBuilder, MAX_ATTEMPTS};
pub use context::{FALLBACK_ENEMY, NONE_PROVIDED, brand_context, common_enemy};
pub use format::{ContentFormat, FormatSpec, LengthBounds, LengthUnit};
pub use generator::{
    ContentGenerator, GenerationAttempt, GenerationOutcome, RetryState, fallback_title,
};
pub use prompt::{
    CtaStrength, DRAFT_THRESHOLD_CHARS, GenerationMode, PillarKind, PromptBuilder, PromptPair,
    default_cta, is_double_down,
};
pub use repair::{
    RepairContext, RepairPass, ensure_title, force_cta, hashtag_candidates, requested_cta,
    sanitize, slug, top_up_hashtags,
};
pub use rotation::{RandomSource, RngSource, RotationPicks, RotationPools, select};
pub use rules::{BANNED_PHRASES, GENERIC_HASHTAGS, RuleBook, contains_word, fold_text};
pub use sections::{
    Document, Section, SectionTag, count_numbered_markers, count_words, hashtags,
};
pub use validator::Validator;
