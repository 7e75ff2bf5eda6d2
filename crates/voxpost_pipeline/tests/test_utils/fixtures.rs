//! Profiles, requests and scripts shared across tests.

use serde_json::json;
use voxpost_core::{BrandProfile, GenerationRequest};

/// Twelve distinct hashtags not produced by the candidate pool.
pub const TWELVE_TAGS: &str = "#liftclub #mealprep #strongwomen #coachlife #habitstack #protein \
                               #recovery #mobility #deadlift #squatday #fitover40 #trainsmart";

const FILLER: &[&str] = &[
    "most", "people", "think", "training", "harder", "fixes", "it", "but", "the", "real",
    "issue", "is", "planning", "your", "week", "around", "real", "life", "so", "start",
    "small", "and", "keep", "going",
];

/// A coach profile with forbidden words, a competitor and strategy pools.
pub fn coach_profile() -> BrandProfile {
    BrandProfile::normalize(&json!({
        "business": {
            "name": "Northside Strength",
            "role": "strength coach",
            "industry": "fitness",
            "primaryGoal": "more coaching clients",
            "desiredAction": "Book a call"
        },
        "audience": {
            "painPoints": ["no time to train", "inconsistent routines"]
        },
        "voice": {
            "forbiddenWords": ["cheap", "hustle"],
            "signaturePhrases": ["Strong is a skill"]
        },
        "strategy": {
            "pillars": ["Educational", "Series"],
            "evergreenTopics": ["meal prep", "sleep", "strength training", "walking"],
            "hotTakes": ["cardio is overrated for fat loss"],
            "offLimits": ["supplement brands"],
            "mustInclude": {"signaturePhrase": true},
            "neverDo": {"nameCompetitors": true}
        },
        "competitors": [{"name": "GymCo", "handle": "@gymco"}]
    }))
}

/// A request against [`coach_profile`].
pub fn request(content_type: &str, pillar: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .content_type(content_type)
        .content_pillar(pillar)
        .profile(coach_profile())
        .build()
        .unwrap()
}

/// `n` plain filler words.
pub fn filler(n: usize) -> String {
    FILLER.iter().cycle().take(n).copied().collect::<Vec<_>>().join(" ")
}

/// A short-form script with the given hook, spoken body size and CTA.
///
/// The body words are split across the four middle sections.
pub fn short_form(hook: &str, body_words: usize, cta: &str) -> String {
    let quarter = body_words / 4;
    let last = body_words - 3 * quarter;
    format!(
        "[TITLE]\nMeal prep that survives Wednesday\n\n\
         [HOOK]\n{hook}\n\n\
         [STORY SETUP]\n{}\n\n\
         [VALUE]\n{}\n\n\
         [RE-HOOK]\n{}\n\n\
         [PAYOFF]\n{}\n\n\
         [CTA]\n{cta}\n\n\
         [PUBLISHING PACK]\nCaption: Plan for real weeks.\nHashtags: {TWELVE_TAGS}\n",
        filler(quarter),
        filler(quarter),
        filler(quarter),
        filler(last),
    )
}

/// A short-form script that passes validation for a non-series request.
pub fn valid_short_form() -> String {
    short_form("Your Wednesday fridge is lying to you.", 180, "Book a call through my bio.")
}

/// A story post with `frames` frame lines.
pub fn story_post(frames: usize, with_pack: bool) -> String {
    let lines: String = (1..=frames)
        .map(|n| format!("Frame {n}: {}\n", filler(6)))
        .collect();
    let mut text = format!("[FRAMES]\n{lines}\n[CTA]\nReply with your plan.\n\n[HASHTAGS]\n{TWELVE_TAGS}\n");
    if with_pack {
        text.push_str("\n[PUBLISHING PACK]\nCaption: x\n");
    }
    text
}
