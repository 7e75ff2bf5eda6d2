//! Tests for the deterministic repair pass.

mod test_utils;

use std::collections::HashSet;

use test_utils::*;
use voxpost_pipeline::{
    Document, RepairContext, RepairPass, RuleBook, SectionTag, Validator, hashtag_candidates,
    hashtags,
};

fn repair(raw: &str, cta: Option<&str>) -> String {
    let profile = coach_profile();
    let ctx = RepairContext {
        fallback_title: "Fallback \u{2014} title",
        cta,
        profile: &profile,
    };
    RepairPass::new(&RuleBook::STANDARD, 12).apply(raw, &ctx)
}

fn samples() -> Vec<String> {
    vec![
        String::new(),
        "Plain words, no markers at all".to_string(),
        "Intro chatter\n[HOOK]\nfast \u{2014} hook\n[CTA]\nold cta".to_string(),
        "[title]\nT\n[cta]\nfirst\n[CTA]\nsecond\n[PUBLISHING PACK]\nCaption only".to_string(),
        "[TITLE]\nT\n[PUBLISHING PACK]\nCaption: c\nHashtags: #MealPrep #sleep\n".to_string(),
        "[TITLE]\nT\n[PUBLISHING PACK]\n#one #two\nmore text".to_string(),
        story_post(4, false),
        valid_short_form(),
        "[HOOK]\nno newline at the end".to_string(),
    ]
}

#[test]
fn test_repair_is_idempotent() {
    for raw in samples() {
        for cta in [None, Some("DM me NOW")] {
            let once = repair(&raw, cta);
            let twice = repair(&once, cta);
            assert_eq!(once, twice, "repair not idempotent for {raw:?} with {cta:?}");
        }
    }
}

#[test]
fn test_em_dashes_are_removed_everywhere() {
    for raw in samples() {
        assert!(!repair(&raw, None).contains('\u{2014}'));
    }
}

#[test]
fn test_missing_title_is_prepended() {
    let repaired = repair("[HOOK]\nhi\n", None);
    let doc = Document::parse(&repaired);
    assert_eq!(doc.sections[0].tag, SectionTag::Title);
    assert_eq!(doc.text_of(SectionTag::Title), Some("Fallback - title"));
}

#[test]
fn test_existing_title_is_kept() {
    let repaired = repair(&valid_short_form(), None);
    assert_eq!(repaired, valid_short_form());
}

#[test]
fn test_cta_body_equals_supplied_text() {
    let raw = "[TITLE]\nT\n[HOOK]\nh\n[CTA]\nFollow for more tips!\n[PUBLISHING PACK]\nCaption: c\n";
    let doc = Document::parse(&repair(raw, Some("DM me NOW")));
    assert_eq!(doc.text_of(SectionTag::Cta), Some("DM me NOW"));
    assert!(doc.position(SectionTag::Cta) < doc.position(SectionTag::PublishingPack));
}

#[test]
fn test_missing_cta_lands_before_pack() {
    let raw = "[TITLE]\nT\n[HOOK]\nh\n[PUBLISHING PACK]\nCaption: c\n";
    let doc = Document::parse(&repair(raw, Some("DM me NOW")));
    let order: Vec<_> = doc.sections.iter().map(|s| s.tag).collect();
    assert_eq!(
        order,
        vec![
            SectionTag::Title,
            SectionTag::Hook,
            SectionTag::Cta,
            SectionTag::PublishingPack
        ]
    );
}

#[test]
fn test_em_dash_cta_is_sanitized_when_forced() {
    let raw = "[TITLE]\nT\n[HOOK]\nh\n[CTA]\nFollow along\n[PUBLISHING PACK]\nCaption: c\n";
    let repaired = repair(raw, Some("Book now \u{2014} spots are limited"));
    assert!(!repaired.contains('\u{2014}'));

    let doc = Document::parse(&repaired);
    assert_eq!(doc.text_of(SectionTag::Cta), Some("Book now - spots are limited"));
    assert_eq!(repair(&repaired, Some("Book now \u{2014} spots are limited")), repaired);
}

#[test]
fn test_unbracketed_cta_heading_inside_payoff_is_left_in_place() {
    for heading in ["**CTA:** Follow me for more", "Call to action: Follow me for more"] {
        let raw = format!(
            "[TITLE]\nT\n[HOOK]\nh\n[PAYOFF]\nThe point lands.\n{heading}\n\n\
             [PUBLISHING PACK]\nCaption: c\n"
        );
        let doc = Document::parse(&repair(&raw, Some("DM me NOW")));

        let ctas: Vec<_> = doc.sections.iter().filter(|s| s.tag == SectionTag::Cta).collect();
        assert_eq!(ctas.len(), 1, "{heading}");
        assert_eq!(ctas[0].text(), "DM me NOW");
        assert!(doc.position(SectionTag::Payoff) < doc.position(SectionTag::Cta));
        assert!(doc.position(SectionTag::Cta) < doc.position(SectionTag::PublishingPack));

        let payoff = doc.text_of(SectionTag::Payoff).unwrap_or_default();
        assert!(payoff.contains(heading), "{payoff:?}");
    }
}

#[test]
fn test_zero_hashtags_topped_up_from_candidates() {
    let raw = "[TITLE]\nT\n[PUBLISHING PACK]\nCaption: c\n";
    let repaired = repair(raw, None);
    let tags = hashtags(&repaired);
    assert!(tags.len() >= 12, "only {} tags", tags.len());

    let candidates: HashSet<String> = hashtag_candidates(&coach_profile(), &RuleBook::STANDARD)
        .into_iter()
        .collect();
    assert!(tags.iter().all(|t| candidates.contains(t)));
    assert_eq!(tags.iter().collect::<HashSet<_>>().len(), tags.len());

    let pack = Document::parse(&repaired);
    let pack = pack.text_of(SectionTag::PublishingPack).unwrap_or_default();
    assert!(pack.lines().any(|l| l.starts_with("Hashtags: #")));
}

#[test]
fn test_top_up_skips_existing_tags_in_any_case() {
    let raw = "[TITLE]\nT\n[PUBLISHING PACK]\nCaption: c\nHashtags: #MealPrep #Mindset\n";
    let repaired = repair(raw, None);
    let tags = hashtags(&repaired);
    assert_eq!(tags.len(), 12);
    assert_eq!(tags.iter().filter(|t| *t == "#mealprep").count(), 1);
    assert_eq!(tags.iter().filter(|t| *t == "#mindset").count(), 1);
    assert!(repaired.contains("Hashtags: #MealPrep #Mindset #contentcreator"));
}

#[test]
fn test_story_post_gets_hashtag_section_not_pack() {
    let raw = "[FRAMES]\nFrame 1: a\nFrame 2: b\nFrame 3: c\nFrame 4: d\n[CTA]\nReply.";
    let repaired = repair(raw, None);
    let doc = Document::parse(&repaired);
    assert!(!doc.has(SectionTag::PublishingPack));
    assert!(doc.has(SectionTag::Hashtags));

    let req = request("Story Post", "Educational");
    let verdict = Validator::new(&RuleBook::STANDARD, 12).validate(&repaired, &req);
    assert!(verdict.is_ok(), "{}", verdict.reason());
}
