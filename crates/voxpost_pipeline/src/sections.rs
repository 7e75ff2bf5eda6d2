//! Marker-delimited section parsing for generated content.
//!
//! Generated scripts are laid out as bracket tags (`[HOOK]`, `[CTA]`, ...) each
//! followed by free text. [`Document::parse`] splits a completion into an ordered
//! list of sections while keeping every byte, so rendering an unmodified document
//! reproduces the input exactly. Markers are recognized case-insensitively and
//! only when the bracket contents name a known tag; anything else stays body text.

use std::sync::LazyLock;

use regex::Regex;
use strum::IntoEnumIterator;

/// Bracket tags understood by the pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum SectionTag {
    #[strum(serialize = "TITLE")]
    Title,
    #[strum(serialize = "HOOK")]
    Hook,
    #[strum(serialize = "STORY SETUP")]
    StorySetup,
    #[strum(serialize = "VALUE")]
    Value,
    #[strum(serialize = "RE-HOOK")]
    ReHook,
    #[strum(serialize = "PAYOFF")]
    Payoff,
    #[strum(serialize = "INTRO")]
    Intro,
    #[strum(serialize = "BODY")]
    Body,
    #[strum(serialize = "KEY TAKEAWAYS")]
    KeyTakeaways,
    #[strum(serialize = "SLIDES")]
    Slides,
    #[strum(serialize = "CAPTION")]
    Caption,
    #[strum(serialize = "FRAMES")]
    Frames,
    #[strum(serialize = "TRIGGER")]
    Trigger,
    #[strum(serialize = "CONTEXT")]
    Context,
    #[strum(serialize = "BAIT")]
    Bait,
    #[strum(serialize = "CTA")]
    Cta,
    #[strum(serialize = "PUBLISHING PACK")]
    PublishingPack,
    #[strum(serialize = "HASHTAGS")]
    Hashtags,
}

impl SectionTag {
    /// Canonical label, e.g. `STORY SETUP`.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Canonical marker, e.g. `[STORY SETUP]`.
    pub fn marker(self) -> String {
        format!("[{}]", self.label())
    }

    /// Resolves bracket contents to a tag.
    ///
    /// Case, surrounding whitespace, and `-`/`_` separators are ignored, so
    /// `[re hook]`, `[Re-Hook]` and `[RE_HOOK]` all name [`SectionTag::ReHook`].
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = fold_label(label);
        if wanted.is_empty() {
            return None;
        }
        if wanted == "CALL TO ACTION" {
            return Some(Self::Cta);
        }
        Self::iter().find(|tag| fold_label(tag.label()) == wanted)
    }

    /// Sections whose text is not spoken or read as part of the script.
    pub fn is_packaging(self) -> bool {
        matches!(self, Self::Title | Self::PublishingPack | Self::Hashtags)
    }
}

fn fold_label(label: &str) -> String {
    label
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// One marker and the text that follows it up to the next marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Which tag the marker names.
    pub tag: SectionTag,
    /// The marker exactly as written, brackets included.
    pub marker: String,
    /// Everything after the marker, including its leading newline.
    pub body: String,
}

impl Section {
    /// A freshly written section with a canonical marker.
    pub fn new(tag: SectionTag, content: &str) -> Self {
        Self {
            tag,
            marker: tag.marker(),
            body: format!("\n{}\n\n", content.trim()),
        }
    }

    /// Body with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.body.trim()
    }
}

/// Generated content split into its sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Text before the first recognized marker.
    pub preamble: String,
    /// Sections in the order they appear.
    pub sections: Vec<Section>,
}

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]\n]{1,40})\]").expect("marker regex is valid"));

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)#([\p{L}\p{N}_]+)").expect("hashtag regex is valid")
});

impl Document {
    /// Splits `text` on recognized section markers.
    pub fn parse(text: &str) -> Self {
        let mut preamble = String::new();
        let mut sections: Vec<Section> = Vec::new();
        let mut cursor = 0;

        for caps in MARKER.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(tag) = SectionTag::from_label(&caps[1]) else {
                continue;
            };
            let between = &text[cursor..whole.start()];
            match sections.last_mut() {
                Some(last) => last.body.push_str(between),
                None => preamble.push_str(between),
            }
            sections.push(Section {
                tag,
                marker: whole.as_str().to_string(),
                body: String::new(),
            });
            cursor = whole.end();
        }

        let rest = &text[cursor..];
        match sections.last_mut() {
            Some(last) => last.body.push_str(rest),
            None => preamble.push_str(rest),
        }

        Self { preamble, sections }
    }

    /// Reassembles the document text.
    pub fn render(&self) -> String {
        let mut out = self.preamble.clone();
        for section in &self.sections {
            out.push_str(&section.marker);
            out.push_str(&section.body);
        }
        out
    }

    /// Whether any section carries `tag`.
    pub fn has(&self, tag: SectionTag) -> bool {
        self.position(tag).is_some()
    }

    /// Index of the first section carrying `tag`.
    pub fn position(&self, tag: SectionTag) -> Option<usize> {
        self.sections.iter().position(|s| s.tag == tag)
    }

    /// First section carrying `tag`.
    pub fn section(&self, tag: SectionTag) -> Option<&Section> {
        self.sections.iter().find(|s| s.tag == tag)
    }

    /// Mutable access to the first section carrying `tag`.
    pub fn section_mut(&mut self, tag: SectionTag) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.tag == tag)
    }

    /// Trimmed body of the first section carrying `tag`.
    pub fn text_of(&self, tag: SectionTag) -> Option<&str> {
        self.section(tag).map(Section::text)
    }

    /// Inserts `section` at the very start, ahead of any preamble.
    ///
    /// The former preamble trails the new section's body, keeping the rendered
    /// text parseable into the same structure.
    pub fn prepend(&mut self, mut section: Section) {
        let preamble = std::mem::take(&mut self.preamble);
        section.body.push_str(&preamble);
        self.sections.insert(0, section);
    }

    /// Inserts `section` before the section at `index`, or appends when out of range.
    pub fn insert(&mut self, index: usize, section: Section) {
        let index = index.min(self.sections.len());
        self.terminate_before(index);
        self.sections.insert(index, section);
    }

    /// Appends `section` after everything else.
    pub fn push(&mut self, section: Section) {
        self.insert(self.sections.len(), section);
    }

    /// Removes every section carrying `tag` except the first.
    pub fn dedupe(&mut self, tag: SectionTag) {
        let mut seen = false;
        self.sections.retain(|s| {
            if s.tag != tag {
                return true;
            }
            let keep = !seen;
            seen = true;
            keep
        });
    }

    /// Makes sure the text ahead of `index` ends on its own line.
    fn terminate_before(&mut self, index: usize) {
        let prior = match index.checked_sub(1) {
            Some(i) => &mut self.sections[i].body,
            None => &mut self.preamble,
        };
        if !prior.is_empty() && !prior.ends_with('\n') {
            prior.push_str("\n\n");
        }
    }

    /// Words of script text, skipping title and publishing sections.
    ///
    /// A word is any whitespace-separated token containing a letter or digit
    /// that is not a hashtag.
    pub fn script_word_count(&self) -> usize {
        let mut count = count_words(&self.preamble);
        for section in self.sections.iter().filter(|s| !s.tag.is_packaging()) {
            count += count_words(&section.body);
        }
        count
    }
}

/// Counts spoken words in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| !token.starts_with('#'))
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

/// Hashtags in `text`, lower-cased, in order of appearance, including repeats.
pub fn hashtags(text: &str) -> Vec<String> {
    HASHTAG
        .captures_iter(text)
        .map(|caps| format!("#{}", caps[1].to_lowercase()))
        .collect()
}

/// Counts lines opening with `label` followed by a number, e.g. `Frame 2:`.
///
/// Leading list or emphasis punctuation is tolerated.
pub fn count_numbered_markers(text: &str, label: &str) -> usize {
    let pattern = format!(r"(?mi)^[\s*#>\-]*{}\s*\d+", regex::escape(label));
    match Regex::new(&pattern) {
        Ok(re) => re.find_iter(text).count(),
        Err(e) => {
            tracing::error!(error = %e, label, "Numbered marker pattern failed to compile");
            0
        }
    }
}
