//! Tests for prompt assembly.

mod test_utils;

use test_utils::*;
use voxpost_core::{GenerationRequest, Tier};
use voxpost_pipeline::{
    PromptBuilder, PromptPair, RngSource, RotationPicks, RotationPools, RuleBook,
};

fn build(req: &GenerationRequest) -> PromptPair {
    let picks = RotationPicks::draw(
        &RotationPools::STANDARD,
        &req.recent_hooks,
        &req.recent_openers,
        &mut RngSource::seeded(11),
    );
    PromptBuilder::new(req, &picks, &RuleBook::STANDARD, 12).build()
}

#[test]
fn test_system_blocks_appear_in_fixed_order() {
    let pair = build(&request("Short-form Script", "Educational"));
    let system = pair.system();
    let markers = [
        "BRAND CONTEXT",
        "HARD-BANNED PHRASES",
        "TRIBE EFFECT",
        "TITLE RULES",
        "STYLE ROTATION",
        "PILLAR: EDUCATIONAL",
        "MODE: NO_IDEA",
        "NEVER DO",
        "MUST INCLUDE",
        "CALL TO ACTION",
        "OUTPUT FORMAT",
    ];
    let positions: Vec<usize> = markers
        .iter()
        .map(|m| system.find(m).unwrap_or_else(|| panic!("missing {m}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn test_no_idea_mode_lists_strategy_pools() {
    let pair = build(&request("Reel", "Educational"));
    assert!(pair.user().contains("Evergreen topics: meal prep; sleep; strength training; walking"));
    assert!(pair.user().contains("Hot takes: cardio is overrated for fat loss"));
    assert!(pair.user().contains("off-limits topics: supplement brands"));
}

#[test]
fn test_topic_mode_embeds_idea_verbatim() {
    let mut req = request("Reel", "Educational");
    req.idea = Some("  Why protein at breakfast matters  ".to_string());
    let pair = build(&req);
    assert!(pair.system().contains("MODE: TOPIC"));
    assert!(pair.user().contains("\"Why protein at breakfast matters\""));
}

#[test]
fn test_series_pillar_forces_draft_mode() {
    let mut req = request("Reel", "Series");
    req.idea = Some("short idea".to_string());
    let pair = build(&req);
    assert!(pair.system().contains("MODE: DRAFT"));
    assert!(pair.system().contains("PILLAR: SERIES"));
    assert!(pair.user().contains("DRAFT:\n\"\"\"\nshort idea\n\"\"\""));
}

#[test]
fn test_reference_script_only_for_double_down() {
    let mut req = request("Reel", "Double Down");
    req.idea = Some("cold showers".to_string());
    req.reference_script = Some("Their proven script.".to_string());
    let pair = build(&req);
    assert!(pair.system().contains("STRUCTURE CLONE"));
    assert!(pair.user().contains("REFERENCE SCRIPT (structure only, do not copy phrasing)"));
    assert!(pair.user().contains("Their proven script."));

    req.content_pillar = "Educational".to_string();
    let pair = build(&req);
    assert!(!pair.system().contains("STRUCTURE CLONE"));
    assert!(!pair.user().contains("Their proven script."));
}

#[test]
fn test_supplied_cta_is_quoted_exactly() {
    let req = GenerationRequest {
        cta_text: Some("DM me NOW".to_string()),
        ..request("Reel", "Educational")
    };
    let pair = build(&req);
    assert!(pair.system().contains("exactly this text and nothing else: \"DM me NOW\""));
}

#[test]
fn test_default_cta_follows_tier_and_sales_flag() {
    let mut req = request("Reel", "Educational");
    req.tier = Tier::Advanced;
    let pair = build(&req);
    assert!(pair.system().contains("Close with a hard call to action"));
    assert!(pair.system().contains("book a call"));

    req.profile.strategy.never_do.aggressive_sales = true;
    let pair = build(&req);
    assert!(pair.system().contains("Close with a soft call to action"));
    assert!(pair.system().contains("Keep it low-pressure."));
}

#[test]
fn test_recent_hooks_are_avoided() {
    let pools = RotationPools::STANDARD;
    let mut req = request("Reel", "Educational");
    req.recent_hooks = pools.hook_formulas[..pools.hook_formulas.len() - 1]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let pair = build(&req);
    let last = pools.hook_formulas[pools.hook_formulas.len() - 1];
    assert!(pair.system().contains(&format!("- Hook formula: {last}")));
}

#[test]
fn test_never_do_lists_competitors_and_forbidden_words() {
    let pair = build(&request("Reel", "Educational"));
    assert!(pair.system().contains("Never mention competitors by name: GymCo."));
    assert!(pair.system().contains("Never use these words: cheap, hustle."));
    assert!(pair.system().contains("The shared enemy of this audience is the inconsistency trap"));
}

#[test]
fn test_story_post_format_block_forbids_pack() {
    let pair = build(&request("Story Post", "Educational"));
    assert!(pair.system().contains("Never include a [PUBLISHING PACK] section."));
    assert!(pair.system().contains("[FRAMES]"));
}
