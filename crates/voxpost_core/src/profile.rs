//! Brand, voice, audience and content-strategy profile.
//!
//! Profiles arrive from the editing UI as partial JSON. [`BrandProfile::normalize`]
//! turns any such value into a fully populated profile: fixed-length slot lists
//! always hold exactly their slot count, missing entries are empty strings.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Number of audience pain-point slots.
pub const PAIN_POINT_SLOTS: usize = 5;
/// Number of signature-phrase slots.
pub const SIGNATURE_PHRASE_SLOTS: usize = 3;
/// Number of forbidden-word slots.
pub const FORBIDDEN_WORD_SLOTS: usize = 5;
/// Number of myth slots.
pub const MYTH_SLOTS: usize = 3;
/// Number of competitor slots.
pub const COMPETITOR_SLOTS: usize = 3;

const TRAIT_MIN: u8 = 1;
const TRAIT_MAX: u8 = 5;
const TRAIT_DEFAULT: u8 = 3;

macro_rules! lenient_label {
    ($ty:ty) => {
        impl From<String> for $ty {
            fn from(label: String) -> Self {
                Self::from_label(&label)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    };
}

/// What the brand ultimately wants a viewer to do.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "snake_case")]
pub enum DesiredAction {
    /// Book a call or consultation
    BookCall,
    /// Send a direct message
    DirectMessage,
    /// Visit a link (bio, website, landing page)
    VisitLink,
    /// Follow the account
    #[default]
    Follow,
    /// Leave a comment
    Comment,
}

impl DesiredAction {
    /// Map a free-form label onto an action; unknown labels become `Follow`.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxpost_core::DesiredAction;
    ///
    /// assert_eq!(DesiredAction::from_label("Book a call"), DesiredAction::BookCall);
    /// assert_eq!(DesiredAction::from_label("direct_message"), DesiredAction::DirectMessage);
    /// assert_eq!(DesiredAction::from_label("???"), DesiredAction::Follow);
    /// ```
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.contains("book") || label.contains("call") {
            Self::BookCall
        } else if label.contains("message") || label.split_whitespace().any(|w| w == "dm") {
            Self::DirectMessage
        } else if label.contains("link") || label.contains("visit") || label.contains("site") {
            Self::VisitLink
        } else if label.contains("comment") {
            Self::Comment
        } else {
            Self::Follow
        }
    }

    /// Plain-English phrasing used in prompts.
    pub fn describe(self) -> &'static str {
        match self {
            Self::BookCall => "book a call",
            Self::DirectMessage => "send a direct message",
            Self::VisitLink => "visit the link in bio",
            Self::Follow => "follow the account",
            Self::Comment => "leave a comment",
        }
    }
}

lenient_label!(DesiredAction);

/// How much industry jargon the voice tolerates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "snake_case")]
pub enum JargonLevel {
    /// Plain language only
    Plain,
    /// Occasional terms of art, explained
    #[default]
    Light,
    /// Insider vocabulary is fine
    Heavy,
}

impl JargonLevel {
    /// Map a free-form label onto a level; unknown labels become `Light`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "none" | "plain" | "no" | "never" => Self::Plain,
            "heavy" | "high" | "lots" => Self::Heavy,
            _ => Self::Light,
        }
    }
}

lenient_label!(JargonLevel);

/// Whether profanity is acceptable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "snake_case")]
pub enum ProfanityLevel {
    /// Never swear
    #[default]
    Never,
    /// Mild language only
    Mild,
    /// Swearing is part of the voice
    Frequent,
}

impl ProfanityLevel {
    /// Map a free-form label onto a level; unknown labels become `Never`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "mild" | "some" | "light" => Self::Mild,
            "frequent" | "heavy" | "often" => Self::Frequent,
            _ => Self::Never,
        }
    }
}

lenient_label!(ProfanityLevel);

/// How often personal stories appear in content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "snake_case")]
pub enum StoryLevel {
    /// Rarely
    Rare,
    /// Now and then
    #[default]
    Sometimes,
    /// Most pieces lean on a story
    Often,
}

impl StoryLevel {
    /// Map a free-form label onto a level; unknown labels become `Sometimes`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "rare" | "rarely" | "never" | "none" => Self::Rare,
            "often" | "always" | "frequent" | "high" => Self::Often,
            _ => Self::Sometimes,
        }
    }
}

lenient_label!(StoryLevel);

/// Who the brand is and what it sells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    /// Brand or creator name
    pub name: String,
    /// Creator role, e.g. "fitness coach"
    pub role: String,
    /// Industry or niche
    pub industry: String,
    /// Mission statement
    pub mission: String,
    /// Core offer
    pub offer: String,
    /// Primary business goal, e.g. "grow coaching clients"
    pub primary_goal: String,
    /// Default action a call to action should drive
    pub desired_action: DesiredAction,
}

/// Who the content speaks to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudienceProfile {
    /// Demographic summary
    pub demographics: String,
    /// Psychographic summary
    pub psychographics: String,
    /// Exactly five pain points; unused slots are empty
    pub pain_points: [String; PAIN_POINT_SLOTS],
}

/// How the brand sounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceProfile {
    /// Humor, 1..=5
    pub humor: u8,
    /// Energy, 1..=5
    pub energy: u8,
    /// Formality, 1..=5
    pub formality: u8,
    /// Directness, 1..=5
    pub directness: u8,
    /// Warmth, 1..=5
    pub warmth: u8,
    /// Jargon tolerance
    pub jargon: JargonLevel,
    /// Profanity tolerance
    pub profanity: ProfanityLevel,
    /// Personal story frequency
    pub personal_stories: StoryLevel,
    /// Exactly three signature phrases; unused slots are empty
    pub signature_phrases: [String; SIGNATURE_PHRASE_SLOTS],
    /// Exactly five forbidden words; unused slots are empty
    pub forbidden_words: [String; FORBIDDEN_WORD_SLOTS],
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self {
            humor: TRAIT_DEFAULT,
            energy: TRAIT_DEFAULT,
            formality: TRAIT_DEFAULT,
            directness: TRAIT_DEFAULT,
            warmth: TRAIT_DEFAULT,
            jargon: JargonLevel::default(),
            profanity: ProfanityLevel::default(),
            personal_stories: StoryLevel::default(),
            signature_phrases: Default::default(),
            forbidden_words: Default::default(),
        }
    }
}

impl VoiceProfile {
    fn clamp_traits(&mut self) {
        for value in [
            &mut self.humor,
            &mut self.energy,
            &mut self.formality,
            &mut self.directness,
            &mut self.warmth,
        ] {
            *value = (*value).clamp(TRAIT_MIN, TRAIT_MAX);
        }
    }
}

/// Things every piece must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MustInclude {
    /// A short personal story
    pub personal_story: bool,
    /// A concrete number or data point
    pub data_point: bool,
    /// A question to the audience
    pub question: bool,
    /// One of the signature phrases
    pub signature_phrase: bool,
}

/// Things no piece may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeverDo {
    /// Mention competitors by name (enforced by the validator)
    pub name_competitors: bool,
    /// Use pushy, high-pressure sales language
    pub aggressive_sales: bool,
    /// Swear, regardless of the voice setting
    pub profanity: bool,
    /// Promise income or results
    pub income_claims: bool,
    /// Touch political topics
    pub political_topics: bool,
}

/// What the brand talks about.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentStrategy {
    /// Content pillars
    pub pillars: Vec<String>,
    /// Topics that never go stale
    pub evergreen_topics: Vec<String>,
    /// Exactly three myths to bust; unused slots are empty
    pub myths: [String; MYTH_SLOTS],
    /// Contrarian opinions
    pub hot_takes: Vec<String>,
    /// Topics that must never be covered
    pub off_limits: Vec<String>,
    /// Required elements
    pub must_include: MustInclude,
    /// Forbidden behaviours
    pub never_do: NeverDo,
}

/// A competitor descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Competitor {
    /// Competitor name
    pub name: String,
    /// Social handle
    pub handle: String,
    /// How they position themselves
    pub positioning: String,
}

impl Competitor {
    /// Whether every field is blank.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.handle.trim().is_empty()
            && self.positioning.trim().is_empty()
    }
}

/// Complete brand profile for one client.
///
/// # Examples
///
/// ```
/// use voxpost_core::BrandProfile;
/// use serde_json::json;
///
/// let profile = BrandProfile::normalize(&json!({
///     "audience": { "painPoints": ["no time"] },
/// }));
/// assert_eq!(profile.audience.pain_points.len(), 5);
/// assert_eq!(profile.audience.pain_points[0], "no time");
/// assert_eq!(profile.audience.pain_points[4], "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandProfile {
    /// Business identity
    pub business: BusinessProfile,
    /// Target audience
    pub audience: AudienceProfile,
    /// Voice parameters
    pub voice: VoiceProfile,
    /// Content strategy
    pub strategy: ContentStrategy,
    /// Exactly three competitors; unused slots are empty
    pub competitors: [Competitor; COMPETITOR_SLOTS],
}

impl BrandProfile {
    /// Build a fully populated profile from any JSON value.
    ///
    /// Nested objects are deep-merged over the defaults, slot lists are filled
    /// positionally and truncated to their slot count, unknown keys and
    /// type-mismatched leaves are ignored. Never fails.
    #[tracing::instrument(skip_all)]
    pub fn normalize(partial: &JsonValue) -> Self {
        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Default profile did not serialize; using defaults");
                return Self::default();
            }
        };
        merge_onto(&mut merged, partial);

        let mut profile = serde_json::from_value::<Self>(merged).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Merged profile did not deserialize; using defaults");
            Self::default()
        });
        profile.voice.clamp_traits();
        profile
    }

    /// Non-empty competitor names.
    pub fn competitor_names(&self) -> Vec<&str> {
        self.competitors
            .iter()
            .map(|c| c.name.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Trimmed, non-empty entries of a slot or open list.
///
/// # Examples
///
/// ```
/// use voxpost_core::filled;
///
/// let slots = ["a".to_string(), " ".to_string(), " b ".to_string()];
/// assert_eq!(filled(&slots), vec!["a", "b"]);
/// ```
pub fn filled(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Merge `patch` onto `base`, where `base` carries the default shape.
fn merge_onto(base: &mut JsonValue, patch: &JsonValue) {
    match *base {
        JsonValue::Object(ref mut fields) => {
            if let JsonValue::Object(patch_fields) = patch {
                for (key, value) in patch_fields {
                    if let Some(slot) = fields.get_mut(key) {
                        merge_onto(slot, value);
                    }
                }
            }
        }
        JsonValue::Array(ref mut items) => {
            let patch_items = match patch {
                JsonValue::Array(values) => values.clone(),
                JsonValue::String(text) => split_list(text),
                _ => return,
            };
            if items.is_empty() {
                // Open list
                *items = patch_items
                    .into_iter()
                    .filter(|v| v.is_string())
                    .collect();
            } else {
                // Fixed slots: fill positionally, extra entries dropped
                for (slot, value) in items.iter_mut().zip(patch_items.iter()) {
                    merge_onto(slot, value);
                }
            }
        }
        JsonValue::String(ref mut current) => {
            if let JsonValue::String(text) = patch {
                *current = text.clone();
            }
        }
        JsonValue::Number(_) => {
            let number = match patch {
                JsonValue::Number(n) => n
                    .as_u64()
                    .or_else(|| n.as_f64().map(|f| f.max(0.0).round() as u64)),
                JsonValue::String(text) => text.trim().parse::<u64>().ok(),
                _ => None,
            };
            if let Some(n) = number {
                *base = JsonValue::from(n.min(u8::MAX as u64));
            }
        }
        JsonValue::Bool(ref mut current) => match patch {
            JsonValue::Bool(flag) => *current = *flag,
            JsonValue::String(text) => {
                if let Ok(flag) = text.trim().to_lowercase().parse::<bool>() {
                    *current = flag;
                }
            }
            _ => {}
        },
        JsonValue::Null => {}
    }
}

fn split_list(text: &str) -> Vec<JsonValue> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| JsonValue::String(s.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_null_gives_defaults() {
        let profile = BrandProfile::normalize(&JsonValue::Null);
        assert_eq!(profile, BrandProfile::default());
    }

    #[test]
    fn test_slot_lists_truncate_extra_entries() {
        let profile = BrandProfile::normalize(&json!({
            "strategy": { "myths": ["a", "b", "c", "d", "e"] }
        }));
        assert_eq!(profile.strategy.myths, ["a", "b", "c"]);
    }

    #[test]
    fn test_type_mismatch_keeps_default() {
        let profile = BrandProfile::normalize(&json!({
            "business": { "name": 42, "role": "coach" },
            "voice": { "humor": "loud" }
        }));
        assert_eq!(profile.business.name, "");
        assert_eq!(profile.business.role, "coach");
        assert_eq!(profile.voice.humor, 3);
    }

    #[test]
    fn test_voice_traits_are_clamped() {
        let profile = BrandProfile::normalize(&json!({
            "voice": { "humor": 9, "energy": 0, "warmth": 4.6 }
        }));
        assert_eq!(profile.voice.humor, 5);
        assert_eq!(profile.voice.energy, 1);
        assert_eq!(profile.voice.warmth, 5);
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        let profile = BrandProfile::normalize(&json!({
            "business": { "desiredAction": "Book a call" },
            "voice": { "jargon": "galactic", "profanity": "mild" }
        }));
        assert_eq!(profile.business.desired_action, DesiredAction::BookCall);
        assert_eq!(profile.voice.jargon, JargonLevel::Light);
        assert_eq!(profile.voice.profanity, ProfanityLevel::Mild);
    }

    #[test]
    fn test_competitors_merge_positionally() {
        let profile = BrandProfile::normalize(&json!({
            "competitors": [{ "name": "Acme" }, null, { "positioning": "cheap" }]
        }));
        assert_eq!(profile.competitors[0].name, "Acme");
        assert!(profile.competitors[1].is_empty());
        assert_eq!(profile.competitors[2].positioning, "cheap");
        assert_eq!(profile.competitor_names(), vec!["Acme"]);
    }

    #[test]
    fn test_comma_separated_open_list() {
        let profile = BrandProfile::normalize(&json!({
            "strategy": { "evergreenTopics": "meal prep, sleep,  , recovery" }
        }));
        assert_eq!(
            profile.strategy.evergreen_topics,
            vec!["meal prep", "sleep", "recovery"]
        );
    }
}
