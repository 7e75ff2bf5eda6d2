//! Assembly of the system and user instructions for one request.

use voxpost_core::{BrandProfile, DesiredAction, GenerationRequest, Tier, filled};

use crate::{
    ContentFormat, RotationPicks, RuleBook,
    context::{brand_context, common_enemy},
    repair::requested_cta,
};

/// Ideas longer than this many characters are treated as drafts.
pub const DRAFT_THRESHOLD_CHARS: usize = 160;

/// Editorial family of a content pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PillarKind {
    Educational,
    Authority,
    Series,
    Storytelling,
    General,
}

impl PillarKind {
    /// Classifies a pillar label by lower-cased substring, first match wins.
    pub fn from_pillar(pillar: &str) -> Self {
        let pillar = pillar.to_lowercase();
        if pillar.contains("educat") {
            Self::Educational
        } else if pillar.contains("authority") {
            Self::Authority
        } else if pillar.contains("series") {
            Self::Series
        } else if pillar.contains("story") {
            Self::Storytelling
        } else {
            Self::General
        }
    }

    fn rules(self) -> &'static str {
        match self {
            Self::Educational => {
                "PILLAR: EDUCATIONAL. Teach one idea only. Use one concrete example instead of a \
                 list of tips. Never label steps with numbers."
            }
            Self::Authority => {
                "PILLAR: AUTHORITY. Show earned expertise through a specific result, client case \
                 or decision. No vague bragging."
            }
            Self::Series => {
                "PILLAR: SERIES. This is one episode of a running series. The [HOOK] must open \
                 with the episode marker \"Day N\" (for example \"Day 3\"). Never say \"welcome \
                 back\". The episode must make sense to a first-time viewer."
            }
            Self::Storytelling => {
                "PILLAR: STORYTELLING. Tell one story with a clear turning point. The lesson \
                 comes out of the story, not out of commentary."
            }
            Self::General => "PILLAR: GENERAL. Make one clear, useful point in the brand voice.",
        }
    }
}

/// Whether a pillar label asks to double down on a competitor's proven piece.
pub fn is_double_down(pillar: &str) -> bool {
    let pillar = pillar.to_lowercase();
    pillar.contains("double down") || pillar.contains("double-down") || pillar.contains("doubledown")
}

/// How the user's input should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum GenerationMode {
    /// Rewrite a supplied draft without changing its topic
    #[strum(serialize = "DRAFT")]
    Draft,
    /// Build the piece around a supplied idea
    #[strum(serialize = "TOPIC")]
    Topic,
    /// Pick a topic from the brand's own strategy
    #[strum(serialize = "NO_IDEA")]
    NoIdea,
}

impl GenerationMode {
    /// Resolves the mode from the pillar and the trimmed idea text.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxpost_pipeline::GenerationMode;
    ///
    /// assert_eq!(GenerationMode::resolve("Educational", ""), GenerationMode::NoIdea);
    /// assert_eq!(GenerationMode::resolve("Weekly series", "cold plunges"), GenerationMode::Draft);
    /// assert_eq!(GenerationMode::resolve("Educational", "cold plunges"), GenerationMode::Topic);
    /// ```
    pub fn resolve(pillar: &str, idea: &str) -> Self {
        let idea = idea.trim();
        if idea.is_empty() {
            Self::NoIdea
        } else if pillar.to_lowercase().contains("series")
            || idea.chars().count() > DRAFT_THRESHOLD_CHARS
        {
            Self::Draft
        } else {
            Self::Topic
        }
    }

    fn rules(self) -> &'static str {
        match self {
            Self::Draft => {
                "MODE: DRAFT. The user supplied a draft. Keep its topic, angle and key points. \
                 Tighten it, restructure it into the required sections and fix the voice. Never \
                 change the topic."
            }
            Self::Topic => "MODE: TOPIC. Build the piece around the user's idea exactly as given.",
            Self::NoIdea => {
                "MODE: NO_IDEA. Choose the topic yourself from the brand's evergreen topics, hot \
                 takes or myths. Never choose an off-limits topic."
            }
        }
    }
}

/// How hard the default call to action pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CtaStrength {
    Soft,
    Medium,
    Hard,
}

impl CtaStrength {
    /// Strength for a tier, forced soft when aggressive sales are ruled out.
    pub fn for_request(tier: Tier, aggressive_sales_banned: bool) -> Self {
        if aggressive_sales_banned {
            return Self::Soft;
        }
        match tier {
            Tier::Beginner => Self::Soft,
            Tier::Mid => Self::Medium,
            Tier::Advanced => Self::Hard,
        }
    }
}

/// Default call-to-action phrase for a desired action at a given strength.
pub fn default_cta(action: DesiredAction, strength: CtaStrength) -> &'static str {
    use CtaStrength::*;
    use DesiredAction::*;
    match (action, strength) {
        (BookCall, Soft) => "If this sounds familiar, a quick call might help. The link is in my bio.",
        (BookCall, Medium) => "Book a free call through the link in my bio and we will map it out.",
        (BookCall, Hard) => "Book your call now. Spots are limited and the link is in my bio.",
        (DirectMessage, Soft) => "If you want to talk it through, my DMs are open.",
        (DirectMessage, Medium) => "Send me a DM with the word START and I will reply.",
        (DirectMessage, Hard) => "DM me START today and we get you moving this week.",
        (VisitLink, Soft) => "There is more on this at the link in my bio if you are curious.",
        (VisitLink, Medium) => "Grab the full guide at the link in my bio.",
        (VisitLink, Hard) => "Go to the link in my bio right now and get started.",
        (Follow, Soft) => "Follow along if this was useful.",
        (Follow, Medium) => "Follow for the next one so you do not miss it.",
        (Follow, Hard) => "Hit follow now. Tomorrow's post builds on this one.",
        (Comment, Soft) => "Tell me in the comments if this matched your experience.",
        (Comment, Medium) => "Comment your answer below and I will reply to every one.",
        (Comment, Hard) => "Comment YES below if you are doing this today.",
    }
}

/// System and user instructions for one completion call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct PromptPair {
    system: String,
    user: String,
}

impl PromptPair {
    /// Pairs prebuilt instructions.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Copy with a one-line failure note appended to the user instruction.
    pub fn with_failure(&self, reason: Option<&str>) -> Self {
        match reason {
            Some(reason) => Self {
                system: self.system.clone(),
                user: format!(
                    "{}\n\nLast attempt failed because: {}. Regenerate the complete output and fix this.",
                    self.user, reason
                ),
            },
            None => self.clone(),
        }
    }
}

/// Builds the prompt pair for a request from its rotation picks and rule tables.
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    request: &'a GenerationRequest,
    picks: &'a RotationPicks,
    rules: &'a RuleBook,
    hashtag_minimum: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Creates a builder over borrowed request data.
    pub fn new(
        request: &'a GenerationRequest,
        picks: &'a RotationPicks,
        rules: &'a RuleBook,
        hashtag_minimum: usize,
    ) -> Self {
        Self {
            request,
            picks,
            rules,
            hashtag_minimum,
        }
    }

    /// Resolved input mode.
    pub fn mode(&self) -> GenerationMode {
        GenerationMode::resolve(&self.request.content_pillar, self.request.idea_text())
    }

    /// Resolved output format.
    pub fn format(&self) -> ContentFormat {
        ContentFormat::from_content_type(&self.request.content_type)
    }

    /// Reference script, only honored for double-down pillars.
    fn reference(&self) -> Option<&'a str> {
        if is_double_down(&self.request.content_pillar) {
            self.request.reference()
        } else {
            None
        }
    }

    /// Builds both instructions.
    #[tracing::instrument(skip(self), fields(format = %self.format(), mode = %self.mode()))]
    pub fn build(&self) -> PromptPair {
        PromptPair::new(self.system_prompt(), self.user_prompt())
    }

    /// The system instruction, section by section in fixed order.
    pub fn system_prompt(&self) -> String {
        let profile = &self.request.profile;
        let mut blocks = vec![
            "You write social media content for one specific brand. Follow every rule below."
                .to_string(),
            brand_context(profile),
            self.banned_block(),
            format!(
                "TRIBE EFFECT: The shared enemy of this audience is {}. Let it sit underneath \
                 the piece as subtext. Never call it an enemy out loud and never attack people.",
                common_enemy(profile)
            ),
            self.title_block(),
            self.rotation_block(),
            PillarKind::from_pillar(&self.request.content_pillar)
                .rules()
                .to_string(),
            self.mode().rules().to_string(),
        ];
        if self.reference().is_some() {
            blocks.push(
                "STRUCTURE CLONE: A proven competitor script is attached as reference. Mirror \
                 its structure, pacing and beat order, but write every sentence fresh in this \
                 brand's voice. Do not copy its phrasing."
                    .to_string(),
            );
        }
        blocks.push(never_do_block(profile));
        if let Some(block) = must_include_block(profile) {
            blocks.push(block);
        }
        blocks.push(self.cta_block());
        blocks.push(self.format().spec().instructions(self.hashtag_minimum));
        blocks.join("\n\n")
    }

    fn banned_block(&self) -> String {
        let phrases: Vec<String> = self
            .rules
            .banned_phrases
            .iter()
            .map(|p| {
                if *p == "\u{2014}" {
                    "the em dash character (use a comma, a period or a hyphen)".to_string()
                } else {
                    format!("\"{p}\"")
                }
            })
            .collect();
        format!(
            "HARD-BANNED PHRASES (never write any of these, in any casing):\n{}",
            phrases.join(", ")
        )
    }

    fn title_block(&self) -> String {
        let mut text = "TITLE RULES: Put a working title in [TITLE]. At most 8 words, specific, \
                        no clickbait, no emoji, no colon."
            .to_string();
        if self.mode() != GenerationMode::NoIdea {
            text.push_str(" Derive it from the user's idea, rewritten in the brand voice.");
        }
        text
    }

    fn rotation_block(&self) -> String {
        format!(
            "STYLE ROTATION (apply these, never name them):\n\
             - Hook formula: {}\n\
             - Narrative opener: {}\n\
             - Open loop: {}\n\
             - Re-hook: {} {}",
            self.picks.hook_formula,
            self.picks.narrative_opener,
            self.picks.open_loop,
            self.picks.re_hook,
            self.picks.loop_back,
        )
    }

    fn cta_block(&self) -> String {
        if let Some(cta) = requested_cta(self.request) {
            return format!(
                "CALL TO ACTION: The [CTA] section must contain exactly this text and nothing \
                 else: \"{cta}\""
            );
        }
        let profile = &self.request.profile;
        let banned = profile.strategy.never_do.aggressive_sales;
        let strength = CtaStrength::for_request(self.request.tier, banned);
        let action = profile.business.desired_action;
        let mut text = format!(
            "CALL TO ACTION: Close with a {strength} call to action in [CTA] asking the viewer to \
             {}. Base it on: \"{}\" Rephrase it in the brand voice.",
            action.describe(),
            default_cta(action, strength),
        );
        if banned {
            text.push_str(" Keep it low-pressure.");
        }
        text
    }

    /// The user instruction for the resolved mode.
    pub fn user_prompt(&self) -> String {
        let format = self.format();
        let strategy = &self.request.profile.strategy;
        let mut text = match self.mode() {
            GenerationMode::Draft => format!(
                "Rewrite this draft into a {format}. Keep its topic and main points. Do not \
                 switch to a different topic.\n\nDRAFT:\n\"\"\"\n{}\n\"\"\"",
                self.request.idea_text()
            ),
            GenerationMode::Topic => format!(
                "Write a {format} about this idea, exactly as stated:\n\"{}\"",
                self.request.idea_text()
            ),
            GenerationMode::NoIdea => format!(
                "Write a {format}. Choose the topic yourself from one of these pools.\n\
                 Evergreen topics: {}\nHot takes: {}\nMyths: {}\n\
                 Never choose any of these off-limits topics: {}",
                join_or_none(&filled(&strategy.evergreen_topics)),
                join_or_none(&filled(&strategy.hot_takes)),
                join_or_none(&filled(&strategy.myths)),
                join_or_none(&filled(&strategy.off_limits)),
            ),
        };
        if let Some(reference) = self.reference() {
            text.push_str(&format!(
                "\n\nREFERENCE SCRIPT (structure only, do not copy phrasing):\n\"\"\"\n{reference}\n\"\"\""
            ));
        }
        text
    }
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        crate::context::NONE_PROVIDED.to_string()
    } else {
        items.join("; ")
    }
}

fn never_do_block(profile: &BrandProfile) -> String {
    let never = &profile.strategy.never_do;
    let mut rules = Vec::new();
    if never.name_competitors {
        let names = profile.competitor_names();
        if names.is_empty() {
            rules.push("- Never mention any competitor by name.".to_string());
        } else {
            rules.push(format!(
                "- Never mention competitors by name: {}.",
                names.join(", ")
            ));
        }
    }
    if never.aggressive_sales {
        rules.push("- No pushy or high-pressure sales language.".to_string());
    }
    if never.profanity {
        rules.push("- No profanity of any kind.".to_string());
    }
    if never.income_claims {
        rules.push("- No income, earnings or guaranteed-result claims.".to_string());
    }
    if never.political_topics {
        rules.push("- Stay away from political topics.".to_string());
    }
    let forbidden = filled(&profile.voice.forbidden_words);
    if !forbidden.is_empty() {
        rules.push(format!("- Never use these words: {}.", forbidden.join(", ")));
    }
    let off_limits = filled(&profile.strategy.off_limits);
    if !off_limits.is_empty() {
        rules.push(format!("- Never cover: {}.", off_limits.join(", ")));
    }
    if rules.is_empty() {
        "NEVER DO: no extra restrictions beyond the banned phrases.".to_string()
    } else {
        format!("NEVER DO:\n{}", rules.join("\n"))
    }
}

fn must_include_block(profile: &BrandProfile) -> Option<String> {
    let must = &profile.strategy.must_include;
    let mut rules = Vec::new();
    if must.personal_story {
        rules.push("- A short personal story from the creator.".to_string());
    }
    if must.data_point {
        rules.push("- One concrete number or data point.".to_string());
    }
    if must.question {
        rules.push("- One direct question to the audience.".to_string());
    }
    if must.signature_phrase {
        let phrases = filled(&profile.voice.signature_phrases);
        if phrases.is_empty() {
            rules.push("- One of the creator's signature phrases.".to_string());
        } else {
            rules.push(format!(
                "- One of these signature phrases, word for word: {}.",
                phrases.join(" | ")
            ));
        }
    }
    (!rules.is_empty()).then(|| format!("MUST INCLUDE:\n{}", rules.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pillar_priority() {
        assert_eq!(PillarKind::from_pillar("Educational series"), PillarKind::Educational);
        assert_eq!(PillarKind::from_pillar("Story series"), PillarKind::Series);
        assert_eq!(PillarKind::from_pillar("Storytelling"), PillarKind::Storytelling);
        assert_eq!(PillarKind::from_pillar("Authority"), PillarKind::Authority);
        assert_eq!(PillarKind::from_pillar("Double Down"), PillarKind::General);
    }

    #[test]
    fn test_mode_threshold_is_exclusive() {
        let at = "a".repeat(DRAFT_THRESHOLD_CHARS);
        let over = "a".repeat(DRAFT_THRESHOLD_CHARS + 1);
        assert_eq!(GenerationMode::resolve("", &at), GenerationMode::Topic);
        assert_eq!(GenerationMode::resolve("", &over), GenerationMode::Draft);
        assert_eq!(GenerationMode::resolve("series", "   "), GenerationMode::NoIdea);
    }

    #[test]
    fn test_cta_strength() {
        assert_eq!(CtaStrength::for_request(Tier::Advanced, false), CtaStrength::Hard);
        assert_eq!(CtaStrength::for_request(Tier::Advanced, true), CtaStrength::Soft);
        assert_eq!(CtaStrength::for_request(Tier::Mid, false), CtaStrength::Medium);
    }

    #[test]
    fn test_default_ctas_avoid_banned_phrases() {
        use strum::IntoEnumIterator;
        for action in DesiredAction::iter() {
            for strength in [CtaStrength::Soft, CtaStrength::Medium, CtaStrength::Hard] {
                let phrase = default_cta(action, strength);
                assert_eq!(RuleBook::STANDARD.first_banned(phrase), None, "{phrase}");
            }
        }
    }

    #[test]
    fn test_failure_note() {
        let pair = PromptPair::new("sys", "user");
        assert_eq!(pair.with_failure(None), pair);
        let retried = pair.with_failure(Some("Missing [TITLE] section"));
        assert_eq!(retried.system(), "sys");
        assert!(retried.user().ends_with(
            "Last attempt failed because: Missing [TITLE] section. Regenerate the complete output and fix this."
        ));
    }

    #[test]
    fn test_double_down_detection() {
        assert!(is_double_down("Double Down"));
        assert!(is_double_down("competitor double-down"));
        assert!(!is_double_down("Educational"));
    }
}
