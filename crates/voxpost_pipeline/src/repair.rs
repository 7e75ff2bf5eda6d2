//! Deterministic fixes applied to every completion before validation.
//!
//! Each step is idempotent, so running the pass twice yields the same text as
//! running it once.

use std::collections::HashSet;

use voxpost_core::{BrandProfile, GenerationRequest, filled};

use crate::{
    RuleBook,
    sections::{Document, Section, SectionTag, hashtags},
};

const MAX_EVERGREEN_TAGS: usize = 3;
const MAX_SLUG_CHARS: usize = 30;

/// Replaces em dashes with hyphens.
pub fn sanitize(text: &str) -> String {
    text.replace('\u{2014}', "-")
}

/// The request's call to action as it must appear in the output.
pub fn requested_cta(request: &GenerationRequest) -> Option<String> {
    request.cta().map(sanitize)
}

/// Inputs the repair pass needs from the request.
#[derive(Debug, Clone, Copy)]
pub struct RepairContext<'a> {
    /// Title used when the completion has none.
    pub fallback_title: &'a str,
    /// Call to action the `[CTA]` section must equal, if any.
    pub cta: Option<&'a str>,
    /// Profile the hashtag candidates are drawn from.
    pub profile: &'a BrandProfile,
}

/// Applies sanitizing, title, CTA and hashtag fixes in that order.
#[derive(Debug, Clone)]
pub struct RepairPass<'a> {
    rules: &'a RuleBook,
    hashtag_minimum: usize,
}

impl<'a> RepairPass<'a> {
    pub fn new(rules: &'a RuleBook, hashtag_minimum: usize) -> Self {
        Self {
            rules,
            hashtag_minimum,
        }
    }

    /// Repairs `raw` and returns the new text.
    #[tracing::instrument(skip_all, fields(raw_len = raw.len()))]
    pub fn apply(&self, raw: &str, ctx: &RepairContext<'_>) -> String {
        let mut doc = Document::parse(&sanitize(raw));
        ensure_title(&mut doc, &sanitize(ctx.fallback_title));
        if let Some(cta) = ctx.cta {
            force_cta(&mut doc, cta);
        }
        let candidates = hashtag_candidates(ctx.profile, self.rules);
        top_up_hashtags(&mut doc, &candidates, self.hashtag_minimum);
        doc.render()
    }
}

/// Prepends a `[TITLE]` section when none exists.
pub fn ensure_title(doc: &mut Document, fallback: &str) {
    if doc.has(SectionTag::Title) {
        return;
    }
    tracing::debug!(fallback, "Adding missing title");
    doc.prepend(Section::new(SectionTag::Title, fallback));
}

/// Makes the first `[CTA]` body exactly `cta`, em dashes replaced, and drops
/// any later CTA sections.
///
/// The original marker spelling is kept. When no CTA section exists, one is
/// inserted ahead of the publishing pack or hashtag section, or appended.
pub fn force_cta(doc: &mut Document, cta: &str) {
    let cta = sanitize(cta);
    let wanted = Section::new(SectionTag::Cta, &cta).body;
    if let Some(section) = doc.section_mut(SectionTag::Cta) {
        if section.body != wanted {
            tracing::debug!("Replacing call to action body");
            section.body = wanted;
        }
        doc.dedupe(SectionTag::Cta);
        return;
    }
    let anchor = doc
        .sections
        .iter()
        .position(|s| matches!(s.tag, SectionTag::PublishingPack | SectionTag::Hashtags));
    tracing::debug!(anchored = anchor.is_some(), "Inserting call to action");
    match anchor {
        Some(index) => doc.insert(index, Section::new(SectionTag::Cta, &cta)),
        None => doc.push(Section::new(SectionTag::Cta, &cta)),
    }
}

/// Lower-cases and strips a phrase down to letters and digits.
pub fn slug(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .take(MAX_SLUG_CHARS)
        .collect()
}

/// Ordered, de-duplicated hashtag candidates for a profile.
///
/// Generic tags come first, then tags from the creator's role and industry, the
/// primary goal, and up to three evergreen topics.
pub fn hashtag_candidates(profile: &BrandProfile, rules: &RuleBook) -> Vec<String> {
    let business = &profile.business;
    let role = slug(&business.role);
    let mut derived = vec![role.clone()];
    if !role.is_empty() {
        derived.push(format!("{role}tips"));
    }
    derived.push(slug(&business.industry));
    derived.push(slug(&business.primary_goal));
    derived.extend(
        filled(&profile.strategy.evergreen_topics)
            .into_iter()
            .take(MAX_EVERGREEN_TAGS)
            .map(slug),
    );

    let mut seen = HashSet::new();
    rules
        .generic_hashtags
        .iter()
        .map(|tag| tag.to_lowercase())
        .chain(
            derived
                .into_iter()
                .filter(|s| s.chars().count() >= 3)
                .map(|s| format!("#{s}")),
        )
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Adds candidate tags until the document carries `minimum` hashtags.
///
/// Tags already present, in any casing, are skipped. New tags join the
/// publishing pack's hashtag line, else a new `Hashtags:` line in the pack,
/// else a trailing `[HASHTAGS]` section.
pub fn top_up_hashtags(doc: &mut Document, candidates: &[String], minimum: usize) {
    let present = hashtags(&doc.render());
    if present.len() >= minimum {
        return;
    }
    let existing: HashSet<&str> = present.iter().map(String::as_str).collect();
    let additions: Vec<&str> = candidates
        .iter()
        .map(String::as_str)
        .filter(|tag| !existing.contains(tag.to_lowercase().as_str()))
        .take(minimum - present.len())
        .collect();
    if additions.is_empty() {
        tracing::warn!(found = present.len(), minimum, "No hashtag candidates left");
        return;
    }
    tracing::debug!(added = additions.len(), found = present.len(), "Topping up hashtags");
    let tags = additions.join(" ");

    for tag in [SectionTag::PublishingPack, SectionTag::Hashtags] {
        if let Some(section) = doc.section_mut(tag) {
            section.body = extend_tag_line(&section.body, &tags);
            return;
        }
    }
    doc.push(Section::new(SectionTag::Hashtags, &tags));
}

fn is_tag_line(line: &str) -> bool {
    let line = line.trim_start().trim_start_matches(['*', '-', '>']).trim_start();
    line.starts_with('#') || line.to_lowercase().starts_with("hashtags")
}

/// Appends `tags` to the first hashtag line of `body`, or adds a `Hashtags:` line.
fn extend_tag_line(body: &str, tags: &str) -> String {
    let mut lines: Vec<String> = body.split_inclusive('\n').map(str::to_string).collect();
    if let Some(line) = lines.iter_mut().find(|l| is_tag_line(l)) {
        let ending = &line[line.trim_end().len()..];
        *line = format!("{} {}{}", line.trim_end(), tags, ending);
        return lines.concat();
    }
    let content_end = body.trim_end().len();
    let (content, trailer) = body.split_at(content_end);
    let trailer = if trailer.contains('\n') { trailer } else { "\n\n" };
    format!("{content}\nHashtags: {tags}{trailer}")
}
