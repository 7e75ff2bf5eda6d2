//! Renders a brand profile into the context block of the system prompt.

use voxpost_core::{BrandProfile, filled};

/// Placeholder shown for any field the client left blank.
pub const NONE_PROVIDED: &str = "none provided";

/// Enemy phrase used when no pain point matches a known category.
pub const FALLBACK_ENEMY: &str = "the bad-advice fog of generic guru tips";

/// Pain-point categories in priority order, each with its trigger keywords.
const ENEMY_CATEGORIES: &[(&[&str], &str)] = &[
    (
        &["inconsisten", "consistent", "sporadic", "irregular"],
        "the inconsistency trap of posting in bursts and then going silent",
    ),
    (
        &["time", "busy", "hours", "schedule"],
        "the time drain of content that eats the whole week",
    ),
    (
        &["overwhelm", "too much", "confus", "stuck", "burnout"],
        "the overwhelm of a hundred tactics and no clear next step",
    ),
    (
        &["engagement", "views", "reach", "attention", "algorithm", "followers", "likes"],
        "the attention famine of posting into the void",
    ),
    (
        &["sales", "convert", "conversion", "leads", "clients", "customers", "money", "revenue"],
        "the conversion gap where likes never turn into paying clients",
    ),
];

/// Names the shared enemy behind the audience's pain points.
///
/// Categories are tried in a fixed order and the first one with any keyword
/// hit across all pain points wins.
pub fn common_enemy(profile: &BrandProfile) -> &'static str {
    let pains: Vec<String> = filled(&profile.audience.pain_points)
        .into_iter()
        .map(str::to_lowercase)
        .collect();
    ENEMY_CATEGORIES
        .iter()
        .find(|(keywords, _)| {
            pains
                .iter()
                .any(|pain| keywords.iter().any(|k| pain.contains(k)))
        })
        .map_or(FALLBACK_ENEMY, |(_, phrase)| phrase)
}

fn or_none(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { NONE_PROVIDED } else { value }
}

fn list_or_none(values: &[String]) -> String {
    let items = filled(values);
    if items.is_empty() {
        NONE_PROVIDED.to_string()
    } else {
        items.join("; ")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Formats every profile field as labeled lines.
///
/// Blank values render as [`NONE_PROVIDED`]; nothing is invented.
#[tracing::instrument(skip_all, fields(brand = %profile.business.name))]
pub fn brand_context(profile: &BrandProfile) -> String {
    let business = &profile.business;
    let audience = &profile.audience;
    let voice = &profile.voice;
    let strategy = &profile.strategy;

    let mut lines = vec![
        "BRAND CONTEXT".to_string(),
        format!("Business name: {}", or_none(&business.name)),
        format!("Creator role: {}", or_none(&business.role)),
        format!("Industry: {}", or_none(&business.industry)),
        format!("Mission: {}", or_none(&business.mission)),
        format!("Offer: {}", or_none(&business.offer)),
        format!("Primary goal: {}", or_none(&business.primary_goal)),
        format!("Desired audience action: {}", business.desired_action.describe()),
        String::new(),
        "AUDIENCE".to_string(),
        format!("Demographics: {}", or_none(&audience.demographics)),
        format!("Psychographics: {}", or_none(&audience.psychographics)),
        format!("Pain points: {}", list_or_none(&audience.pain_points)),
        String::new(),
        "VOICE (1 = low, 5 = high)".to_string(),
        format!(
            "Humor {}, energy {}, formality {}, directness {}, warmth {}",
            voice.humor, voice.energy, voice.formality, voice.directness, voice.warmth
        ),
        format!("Jargon: {}", voice.jargon),
        format!("Profanity: {}", voice.profanity),
        format!("Personal stories: {}", voice.personal_stories),
        format!("Signature phrases: {}", list_or_none(&voice.signature_phrases)),
        format!("Forbidden words: {}", list_or_none(&voice.forbidden_words)),
        String::new(),
        "CONTENT STRATEGY".to_string(),
        format!("Pillars: {}", list_or_none(&strategy.pillars)),
        format!("Evergreen topics: {}", list_or_none(&strategy.evergreen_topics)),
        format!("Myths to bust: {}", list_or_none(&strategy.myths)),
        format!("Hot takes: {}", list_or_none(&strategy.hot_takes)),
        format!("Off-limits topics: {}", list_or_none(&strategy.off_limits)),
        String::new(),
        "COMPETITORS".to_string(),
    ];

    let competitors: Vec<String> = profile
        .competitors
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| {
            format!(
                "- {} ({}): {}",
                or_none(&c.name),
                or_none(&c.handle),
                or_none(&c.positioning)
            )
        })
        .collect();
    if competitors.is_empty() {
        lines.push(NONE_PROVIDED.to_string());
    } else {
        lines.extend(competitors);
    }

    lines.push(String::new());
    lines.push(format!(
        "Must include: personal story {}, data point {}, question {}, signature phrase {}",
        yes_no(strategy.must_include.personal_story),
        yes_no(strategy.must_include.data_point),
        yes_no(strategy.must_include.question),
        yes_no(strategy.must_include.signature_phrase),
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_profile_renders_placeholders() {
        let text = brand_context(&BrandProfile::default());
        assert!(text.contains("Business name: none provided"));
        assert!(text.contains("Pain points: none provided"));
        assert!(text.contains("COMPETITORS\nnone provided"));
        assert!(text.contains("Humor 3, energy 3"));
    }

    #[test]
    fn test_populated_fields_render_verbatim() {
        let profile = BrandProfile::normalize(&json!({
            "business": {"name": "Northside Lifts", "role": "strength coach"},
            "audience": {"painPoints": ["no time to train", "", "hates gyms"]},
            "competitors": [{"name": "GymCo", "handle": "@gymco"}]
        }));
        let text = brand_context(&profile);
        assert!(text.contains("Business name: Northside Lifts"));
        assert!(text.contains("Pain points: no time to train; hates gyms"));
        assert!(text.contains("- GymCo (@gymco): none provided"));
    }

    #[test]
    fn test_common_enemy_priority() {
        let mut profile = BrandProfile::default();
        assert_eq!(common_enemy(&profile), FALLBACK_ENEMY);

        profile.audience.pain_points[0] = "No sales from posts".into();
        profile.audience.pain_points[3] = "Too busy to film".into();
        assert!(common_enemy(&profile).contains("time drain"));

        profile.audience.pain_points[4] = "Posting is sporadic".into();
        assert!(common_enemy(&profile).contains("inconsistency"));
    }
}
