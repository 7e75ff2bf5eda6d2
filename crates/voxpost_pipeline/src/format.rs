//! Output format selection from free-form content-type labels.

use crate::SectionTag;

/// The five output shapes the pipeline can produce.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    serde::Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    /// Spoken short video script
    #[default]
    #[strum(serialize = "short-form video script")]
    ShortForm,
    /// Long video or article-length script
    #[strum(serialize = "long-form script")]
    LongForm,
    /// Multi-slide image post
    #[strum(serialize = "carousel post")]
    Carousel,
    /// Sequence of ephemeral story frames
    #[strum(serialize = "story post")]
    StoryPost,
    /// Short post built to start a conversation
    #[strum(serialize = "engagement post")]
    Engagement,
}

impl ContentFormat {
    /// Chooses a format from a content-type label.
    ///
    /// Matching is by lower-cased substring in a fixed priority order, so every
    /// label, including the empty one, maps to exactly one format.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxpost_pipeline::ContentFormat;
    ///
    /// assert_eq!(ContentFormat::from_content_type("Long-form YouTube"), ContentFormat::LongForm);
    /// assert_eq!(ContentFormat::from_content_type("Story Post"), ContentFormat::StoryPost);
    /// assert_eq!(ContentFormat::from_content_type("Reel"), ContentFormat::ShortForm);
    /// ```
    pub fn from_content_type(content_type: &str) -> Self {
        let label = content_type.to_lowercase();
        if label.contains("long") {
            Self::LongForm
        } else if label.contains("carousel") {
            Self::Carousel
        } else if label.contains("story post") {
            Self::StoryPost
        } else if label.contains("engagement") {
            Self::Engagement
        } else {
            Self::ShortForm
        }
    }

    /// The static layout rules for this format.
    pub fn spec(self) -> &'static FormatSpec {
        match self {
            Self::ShortForm => &SHORT_FORM,
            Self::LongForm => &LONG_FORM,
            Self::Carousel => &CAROUSEL,
            Self::StoryPost => &STORY_POST,
            Self::Engagement => &ENGAGEMENT,
        }
    }
}

/// What gets measured against a format's length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LengthUnit {
    /// Script words outside title and publishing sections
    #[strum(serialize = "words")]
    Words,
    /// Lines opening with `Slide N`
    #[strum(serialize = "slides")]
    Slides,
    /// Lines opening with `Frame N`
    #[strum(serialize = "frames")]
    Frames,
}

impl LengthUnit {
    /// Label that opens a numbered marker line, if the unit is counted that way.
    pub fn marker_label(self) -> Option<&'static str> {
        match self {
            Self::Words => None,
            Self::Slides => Some("Slide"),
            Self::Frames => Some("Frame"),
        }
    }
}

/// Inclusive bounds on a measured length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub unit: LengthUnit,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl LengthBounds {
    /// Whether `n` lies within the bounds.
    pub fn contains(&self, n: usize) -> bool {
        self.min.is_none_or(|min| n >= min) && self.max.is_none_or(|max| n <= max)
    }

    /// Human-readable range, e.g. `150-240 words`.
    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{min}-{max} {}", self.unit),
            (Some(min), None) => format!("at least {min} {}", self.unit),
            (None, Some(max)) => format!("at most {max} {}", self.unit),
            (None, None) => format!("any number of {}", self.unit),
        }
    }
}

/// Layout rules for one content format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub format: ContentFormat,
    /// Required section tags in output order.
    pub sections: &'static [SectionTag],
    pub length: LengthBounds,
    /// `true` when a publishing pack is required, `false` when it is forbidden.
    pub publishing_pack: bool,
}

static SHORT_FORM: FormatSpec = FormatSpec {
    format: ContentFormat::ShortForm,
    sections: &[
        SectionTag::Title,
        SectionTag::Hook,
        SectionTag::StorySetup,
        SectionTag::Value,
        SectionTag::ReHook,
        SectionTag::Payoff,
        SectionTag::Cta,
        SectionTag::PublishingPack,
    ],
    length: LengthBounds {
        unit: LengthUnit::Words,
        min: Some(150),
        max: Some(240),
    },
    publishing_pack: true,
};

static LONG_FORM: FormatSpec = FormatSpec {
    format: ContentFormat::LongForm,
    sections: &[
        SectionTag::Title,
        SectionTag::Hook,
        SectionTag::Intro,
        SectionTag::Body,
        SectionTag::KeyTakeaways,
        SectionTag::Cta,
        SectionTag::PublishingPack,
    ],
    length: LengthBounds {
        unit: LengthUnit::Words,
        min: Some(900),
        max: None,
    },
    publishing_pack: true,
};

static CAROUSEL: FormatSpec = FormatSpec {
    format: ContentFormat::Carousel,
    sections: &[
        SectionTag::Title,
        SectionTag::Slides,
        SectionTag::Caption,
        SectionTag::Cta,
        SectionTag::PublishingPack,
    ],
    length: LengthBounds {
        unit: LengthUnit::Slides,
        min: Some(5),
        max: Some(10),
    },
    publishing_pack: true,
};

static STORY_POST: FormatSpec = FormatSpec {
    format: ContentFormat::StoryPost,
    sections: &[SectionTag::Frames, SectionTag::Cta],
    length: LengthBounds {
        unit: LengthUnit::Frames,
        min: Some(4),
        max: Some(5),
    },
    publishing_pack: false,
};

static ENGAGEMENT: FormatSpec = FormatSpec {
    format: ContentFormat::Engagement,
    sections: &[
        SectionTag::Title,
        SectionTag::Trigger,
        SectionTag::Context,
        SectionTag::Bait,
        SectionTag::Cta,
        SectionTag::PublishingPack,
    ],
    length: LengthBounds {
        unit: LengthUnit::Words,
        min: None,
        max: Some(160),
    },
    publishing_pack: true,
};

/// What the model should put under each marker.
fn section_guidance(tag: SectionTag) -> &'static str {
    match tag {
        SectionTag::Title => "a short, specific working title",
        SectionTag::Hook => "one or two lines that stop the scroll",
        SectionTag::StorySetup => {
            "set the scene and move the story forward; never repeat the hook's first line"
        }
        SectionTag::Value => "the single useful idea, shown through a concrete example",
        SectionTag::ReHook => "a mid-script turn that resets attention",
        SectionTag::Payoff => "deliver what the hook promised and close the loop",
        SectionTag::Intro => "frame the problem and why it matters now",
        SectionTag::Body => "the full teaching or story, in clear spoken paragraphs",
        SectionTag::KeyTakeaways => "three short takeaways written as plain sentences",
        SectionTag::Slides => "one line per slide, each starting with \"Slide N:\"",
        SectionTag::Caption => "the post caption, two to four sentences",
        SectionTag::Frames => "one line per frame, each starting with \"Frame N:\"",
        SectionTag::Trigger => "a bold, specific statement that invites a reaction",
        SectionTag::Context => "two or three sentences of background",
        SectionTag::Bait => "a direct question or choice that is easy to answer in the comments",
        SectionTag::Cta => "the call to action",
        SectionTag::PublishingPack => {
            "a caption line, then a line starting with \"Hashtags:\" followed by the hashtags"
        }
        SectionTag::Hashtags => "hashtags separated by spaces",
    }
}

impl FormatSpec {
    /// The format block that closes the system prompt.
    pub fn instructions(&self, hashtag_minimum: usize) -> String {
        let mut lines = vec![
            format!("OUTPUT FORMAT: {}", self.format),
            format!("Length: {}.", self.length.describe()),
            "Write these section markers exactly, in this order, each on its own line:".to_string(),
        ];
        lines.extend(
            self.sections
                .iter()
                .map(|tag| format!("{} {}", tag.marker(), section_guidance(*tag))),
        );
        if self.publishing_pack {
            lines.push(format!(
                "The [PUBLISHING PACK] must carry at least {hashtag_minimum} hashtags."
            ));
        } else {
            lines.push("Never include a [PUBLISHING PACK] section.".to_string());
            lines.push(format!(
                "End with a line of at least {hashtag_minimum} hashtags after the [CTA]."
            ));
        }
        if self.length.unit == LengthUnit::Words {
            lines.push(
                "Word counts cover the spoken script only, not the title or publishing pack."
                    .to_string(),
            );
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_priority_order() {
        assert_eq!(
            ContentFormat::from_content_type("Long carousel"),
            ContentFormat::LongForm
        );
        assert_eq!(
            ContentFormat::from_content_type("engagement carousel"),
            ContentFormat::Carousel
        );
        assert_eq!(ContentFormat::from_content_type(""), ContentFormat::ShortForm);
        assert_eq!(
            ContentFormat::from_content_type("instagram story"),
            ContentFormat::ShortForm
        );
    }

    #[test]
    fn test_every_format_has_consistent_spec() {
        for format in ContentFormat::iter() {
            let spec = format.spec();
            assert_eq!(spec.format, format);
            assert_eq!(
                spec.sections.contains(&SectionTag::PublishingPack),
                spec.publishing_pack
            );
            assert!(spec.sections.contains(&SectionTag::Cta));
        }
    }

    #[test]
    fn test_bounds() {
        let short = ContentFormat::ShortForm.spec().length;
        assert!(!short.contains(149));
        assert!(short.contains(150));
        assert!(short.contains(240));
        assert!(!short.contains(241));
        assert_eq!(short.describe(), "150-240 words");
        assert_eq!(ContentFormat::LongForm.spec().length.describe(), "at least 900 words");
    }

    #[test]
    fn test_story_post_instructions_forbid_pack() {
        let text = ContentFormat::StoryPost.spec().instructions(12);
        assert!(text.contains("Never include a [PUBLISHING PACK]"));
        assert!(text.contains("[FRAMES]"));
    }
}
