//! Core data types for the Voxpost content generation pipeline.
//!
//! This crate holds the brand profile model and its normalization, the
//! per-call generation request, the completion boundary types, and the
//! inbound/outbound wire shapes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod profile;
mod request;
mod tier;
mod validation;

pub use completion::{CompletionRequest, CompletionRequestBuilder, CompletionResponse};
pub use profile::{
    AudienceProfile, BrandProfile, BusinessProfile, COMPETITOR_SLOTS, Competitor,
    ContentStrategy, DesiredAction, FORBIDDEN_WORD_SLOTS, JargonLevel, MYTH_SLOTS, MustInclude,
    NeverDo, PAIN_POINT_SLOTS, ProfanityLevel, SIGNATURE_PHRASE_SLOTS, StoryLevel, VoiceProfile,
    filled,
};
pub use request::{
    GenerateContentRequest, GenerateContentResponse, GenerationRequest, GenerationRequestBuilder,
};
pub use tier::Tier;
pub use validation::ValidationResult;
