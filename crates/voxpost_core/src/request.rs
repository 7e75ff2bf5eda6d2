//! Generation requests: the domain type and the inbound/outbound wire shapes.

use crate::{BrandProfile, Tier, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Everything the pipeline needs for one generation call.
///
/// Created per call and discarded once the pipeline returns.
///
/// # Examples
///
/// ```
/// use voxpost_core::{GenerationRequest, Tier};
///
/// let request = GenerationRequest::builder()
///     .content_type("Short-form Script")
///     .content_pillar("Educational")
///     .idea("Why meal prep fails on Wednesdays")
///     .tier(Tier::Mid)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.idea_text(), "Why meal prep fails on Wednesdays");
/// assert_eq!(request.cta(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct GenerationRequest {
    /// Free-form content type label, e.g. "Carousel"
    pub content_type: String,
    /// Content pillar label, e.g. "Storytelling"
    pub content_pillar: String,
    /// Idea, topic, or full draft
    #[builder(setter(into, strip_option))]
    pub idea: Option<String>,
    /// Script whose structure may be cloned
    #[builder(setter(into, strip_option))]
    pub reference_script: Option<String>,
    /// Audience tier
    pub tier: Tier,
    /// Call to action to use verbatim
    #[builder(setter(into, strip_option))]
    pub cta_text: Option<String>,
    /// Hook formulas used recently by this client
    pub recent_hooks: Vec<String>,
    /// Narrative openers used recently by this client
    pub recent_openers: Vec<String>,
    /// Normalized brand profile
    pub profile: BrandProfile,
}

impl GenerationRequest {
    /// Creates a new generation request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// The idea, trimmed; empty when absent.
    pub fn idea_text(&self) -> &str {
        self.idea.as_deref().map(str::trim).unwrap_or_default()
    }

    /// The call to action, if a non-blank one was supplied.
    pub fn cta(&self) -> Option<&str> {
        self.cta_text
            .as_deref()
            .map(str::trim)
            .filter(|cta| !cta.is_empty())
    }

    /// The reference script, if a non-blank one was supplied.
    pub fn reference(&self) -> Option<&str> {
        self.reference_script
            .as_deref()
            .map(str::trim)
            .filter(|script| !script.is_empty())
    }
}

/// Inbound JSON request as sent by the HTTP layer.
///
/// # Examples
///
/// ```
/// use voxpost_core::{GenerateContentRequest, GenerationRequest};
///
/// let wire: GenerateContentRequest = serde_json::from_str(r#"{
///     "contentType": "Carousel",
///     "contentPillar": "Authority",
///     "tier": "advanced",
///     "clientProfile": { "audience": { "painPoints": ["no leads"] } }
/// }"#).unwrap();
///
/// let request = GenerationRequest::from(wire);
/// assert_eq!(request.profile.audience.pain_points[0], "no leads");
/// assert_eq!(request.profile.audience.pain_points.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Content type label
    #[serde(default)]
    pub content_type: String,
    /// Content pillar label
    #[serde(default)]
    pub content_pillar: String,
    /// Idea, topic, or draft
    #[serde(default)]
    pub idea_input: Option<String>,
    /// Structure-clone source
    #[serde(default)]
    pub reference_script: Option<String>,
    /// Audience tier label
    #[serde(default, deserialize_with = "lenient_tier")]
    pub tier: Tier,
    /// Verbatim call to action
    #[serde(default)]
    pub cta_text: Option<String>,
    /// Possibly partial brand profile
    #[serde(default, deserialize_with = "normalized_profile")]
    pub client_profile: BrandProfile,
    /// Recently used hook formulas
    #[serde(default, deserialize_with = "lenient_strings")]
    pub recent_hooks: Vec<String>,
    /// Recently used narrative openers
    #[serde(default, deserialize_with = "lenient_strings")]
    pub recent_openers: Vec<String>,
}

fn normalized_profile<'de, D>(deserializer: D) -> Result<BrandProfile, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(BrandProfile::normalize(&value))
}

fn lenient_tier<'de, D>(deserializer: D) -> Result<Tier, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(value.as_str().map(Tier::from_label).unwrap_or_default())
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Array(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    })
}

impl From<GenerateContentRequest> for GenerationRequest {
    fn from(wire: GenerateContentRequest) -> Self {
        Self {
            content_type: wire.content_type,
            content_pillar: wire.content_pillar,
            idea: wire.idea_input,
            reference_script: wire.reference_script,
            tier: wire.tier,
            cta_text: wire.cta_text,
            recent_hooks: wire.recent_hooks,
            recent_openers: wire.recent_openers,
            profile: wire.client_profile,
        }
    }
}

/// Outbound JSON response.
///
/// `success` is false only when the completion service itself failed; a
/// result that never passed validation is still a success carrying its
/// failed verdict.
///
/// # Examples
///
/// ```
/// use voxpost_core::{GenerateContentResponse, ValidationResult};
///
/// let ok = GenerateContentResponse::completed("[TITLE]\nHi", ValidationResult::pass());
/// let json = serde_json::to_value(&ok).unwrap();
/// assert_eq!(json["success"], true);
/// assert_eq!(json["validation"]["reason"], "");
/// assert!(json.get("error").is_none());
///
/// let err = GenerateContentResponse::failed("Transport failure: timeout");
/// let json = serde_json::to_value(&err).unwrap();
/// assert_eq!(json["success"], false);
/// assert!(json.get("content").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct GenerateContentResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl GenerateContentResponse {
    /// The pipeline ran to completion (validation may still have failed).
    pub fn completed(content: impl Into<String>, validation: ValidationResult) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            validation: Some(validation),
            error: None,
        }
    }

    /// The completion service failed.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            validation: None,
            error: Some(error.into()),
        }
    }
}
