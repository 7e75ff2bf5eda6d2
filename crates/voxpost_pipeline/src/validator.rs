//! Ordered, short-circuiting checks on repaired content.

use std::sync::LazyLock;

use regex::Regex;
use voxpost_core::{GenerationRequest, ValidationResult, filled};

use crate::{
    ContentFormat, FormatSpec, LengthUnit, RuleBook,
    repair::requested_cta,
    rules::{contains_word, fold_text},
    sections::{Document, SectionTag, count_numbered_markers, hashtags},
};

static SERIES_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bday\s*\d+").expect("series day regex is valid"));

/// Checks content against the rules for a request.
///
/// Checks run in a fixed order and stop at the first failure, whose reason is
/// returned. The validator never edits content.
#[derive(Debug, Clone)]
pub struct Validator<'a> {
    rules: &'a RuleBook,
    hashtag_minimum: usize,
}

impl<'a> Validator<'a> {
    pub fn new(rules: &'a RuleBook, hashtag_minimum: usize) -> Self {
        Self {
            rules,
            hashtag_minimum,
        }
    }

    /// Validates `content` for `request`.
    #[tracing::instrument(skip_all, fields(content_len = content.len()))]
    pub fn validate(&self, content: &str, request: &GenerationRequest) -> ValidationResult {
        let result = match self.first_failure(content, request) {
            Some(reason) => ValidationResult::fail(reason),
            None => ValidationResult::pass(),
        };
        tracing::debug!(ok = result.is_ok(), reason = %result.reason(), "Validated content");
        result
    }

    fn first_failure(&self, content: &str, request: &GenerationRequest) -> Option<String> {
        let profile = &request.profile;

        if let Some(phrase) = self.rules.first_banned(content) {
            let shown = if phrase == "\u{2014}" { "em dash" } else { phrase };
            return Some(format!("Contains banned phrase \"{shown}\""));
        }

        if let Some(word) = filled(&profile.voice.forbidden_words)
            .into_iter()
            .find(|w| contains_word(content, w))
        {
            return Some(format!("Contains forbidden word \"{word}\""));
        }

        if profile.strategy.never_do.name_competitors {
            let named = profile
                .competitor_names()
                .into_iter()
                .find(|n| contains_word(content, n));
            if let Some(name) = named {
                return Some(format!("Names competitor \"{name}\""));
            }
        }

        if let Some(cta) = requested_cta(request) {
            if !content.contains(&cta) {
                return Some(format!("Missing the exact call to action \"{cta}\""));
            }
        }

        let doc = Document::parse(content);
        let format = ContentFormat::from_content_type(&request.content_type);
        if let Some(reason) = check_format(format.spec(), &doc, content) {
            return Some(reason);
        }

        let found = hashtags(content).len();
        if found < self.hashtag_minimum {
            return Some(format!(
                "Needs at least {} hashtags (found {found})",
                self.hashtag_minimum
            ));
        }

        if request.content_pillar.to_lowercase().contains("series") {
            let hook = doc.text_of(SectionTag::Hook).unwrap_or_default();
            if !SERIES_DAY.is_match(hook) {
                return Some(
                    "Series hook must contain the episode marker \"Day <number>\"".to_string(),
                );
            }
            if fold_text(content).contains("welcome back") {
                return Some("Series episodes must not say \"welcome back\"".to_string());
            }
        }

        None
    }
}

fn check_format(spec: &FormatSpec, doc: &Document, content: &str) -> Option<String> {
    let format = spec.format;

    if spec.publishing_pack {
        if !doc.has(SectionTag::PublishingPack) {
            return Some("Missing [PUBLISHING PACK] section".to_string());
        }
        if !doc.has(SectionTag::Title) {
            return Some("Missing [TITLE] section".to_string());
        }
    } else if doc.has(SectionTag::PublishingPack) {
        return Some(format!(
            "{} must not include a [PUBLISHING PACK] section",
            with_article(format)
        ));
    }

    if format == ContentFormat::Engagement {
        for tag in [SectionTag::Trigger, SectionTag::Context, SectionTag::Bait] {
            if !doc.has(tag) {
                return Some(format!("Engagement post is missing {}", tag.marker()));
            }
        }
    }

    let bounds = spec.length;
    let measured = match bounds.unit.marker_label() {
        Some(label) => count_numbered_markers(content, label),
        None => doc.script_word_count(),
    };
    if !bounds.contains(measured) {
        let unit = match bounds.unit {
            LengthUnit::Words => "words".to_string(),
            unit => format!("\"{} N\" markers", unit.marker_label().unwrap_or_default()),
        };
        return Some(format!(
            "{} needs {} (found {measured} {unit})",
            with_article(format),
            bounds.describe()
        ));
    }

    if format == ContentFormat::ShortForm {
        let (Some(hook), Some(setup)) = (
            doc.text_of(SectionTag::Hook),
            doc.text_of(SectionTag::StorySetup),
        )
        else {
            return Some("Short-form script needs both [HOOK] and [STORY SETUP] sections".to_string());
        };
        let first_line = hook
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        if !first_line.is_empty() && squash(setup).contains(&squash(first_line)) {
            return Some("The hook's first line is repeated in [STORY SETUP]".to_string());
        }
    }

    None
}

/// `A carousel post`, `An engagement post`.
fn with_article(format: ContentFormat) -> String {
    let name = format.to_string();
    let article = if name.starts_with(['a', 'e', 'i', 'o', 'u']) { "An" } else { "A" };
    format!("{article} {name}")
}

/// Lower-cases and collapses whitespace for loose comparison.
fn squash(text: &str) -> String {
    fold_text(text).split_whitespace().collect::<Vec<_>>().join(" ")
}
