//! Tests for content-type to format selection.

use strum::IntoEnumIterator;
use voxpost_pipeline::{ContentFormat, LengthUnit, SectionTag};

#[test]
fn test_every_label_maps_to_a_format() {
    let labels = [
        "",
        "   ",
        "Reel",
        "TikTok",
        "Short-form Script",
        "Long-form YouTube",
        "LONG",
        "Carousel",
        "Instagram carousel",
        "Story Post",
        "story",
        "Engagement Post",
        "Vidéo courte",
        "\u{1F3AC} clip",
    ];
    for label in labels {
        let format = ContentFormat::from_content_type(label);
        assert_eq!(format.spec().format, format, "label {label:?}");
    }
}

#[test]
fn test_priority_order_resolves_mixed_labels() {
    let cases = [
        ("Long carousel", ContentFormat::LongForm),
        ("Carousel story post", ContentFormat::Carousel),
        ("Story post for engagement", ContentFormat::StoryPost),
        ("Engagement reel", ContentFormat::Engagement),
        ("Story", ContentFormat::ShortForm),
        ("Reel", ContentFormat::ShortForm),
    ];
    for (label, expected) in cases {
        assert_eq!(ContentFormat::from_content_type(label), expected, "label {label:?}");
    }
}

#[test]
fn test_matching_ignores_case() {
    assert_eq!(
        ContentFormat::from_content_type("STORY POST"),
        ContentFormat::StoryPost
    );
    assert_eq!(
        ContentFormat::from_content_type("eNgAgEmEnT"),
        ContentFormat::Engagement
    );
}

#[test]
fn test_only_story_posts_forbid_the_pack() {
    for format in ContentFormat::iter() {
        let spec = format.spec();
        assert_eq!(spec.publishing_pack, format != ContentFormat::StoryPost);
        assert!(spec.sections.contains(&SectionTag::Cta), "{format} lacks [CTA]");
    }
}

#[test]
fn test_marker_units_match_formats() {
    assert_eq!(ContentFormat::Carousel.spec().length.unit, LengthUnit::Slides);
    assert_eq!(ContentFormat::StoryPost.spec().length.unit, LengthUnit::Frames);
    assert_eq!(ContentFormat::ShortForm.spec().length.unit, LengthUnit::Words);
}
