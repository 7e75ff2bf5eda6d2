//! Fixed phrase tables shared by the prompt builder, repair pass and validator.

/// Phrases that mark output as generic. Matched case-insensitively as substrings.
///
/// The em dash is listed first; the repair pass replaces it before validation,
/// and the prompt forbids it outright.
pub const BANNED_PHRASES: &[&str] = &[
    "\u{2014}",
    "game changer",
    "game-changer",
    "picture this",
    "step 1",
    "step 2",
    "step 3",
    "let's dive in",
    "dive into",
    "in today's world",
    "in today's fast-paced",
    "unlock your potential",
    "unleash",
    "here's the thing",
    "buckle up",
    "the secret sauce",
    "it's not about",
    "isn't just about",
    "at the end of the day",
    "without further ado",
    "elevate your",
    "in conclusion",
    "let that sink in",
    "plot twist",
    "a testament to",
    "navigate the complexities",
];

/// Hashtags any brand can use, offered first when topping up.
pub const GENERIC_HASHTAGS: &[&str] = &[
    "#contentcreator",
    "#smallbusiness",
    "#entrepreneur",
    "#marketingtips",
    "#personalbranding",
    "#business",
    "#growth",
    "#socialmedia",
    "#mindset",
];

/// Immutable rule tables injected into pipeline components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleBook {
    /// Phrases the validator rejects.
    pub banned_phrases: &'static [&'static str],
    /// Brand-neutral hashtag candidates.
    pub generic_hashtags: &'static [&'static str],
}

impl RuleBook {
    /// The built-in tables.
    pub const STANDARD: RuleBook = RuleBook {
        banned_phrases: BANNED_PHRASES,
        generic_hashtags: GENERIC_HASHTAGS,
    };

    /// First banned phrase found in `text`, ignoring case and curly apostrophes.
    pub fn first_banned(&self, text: &str) -> Option<&'static str> {
        let haystack = fold_text(text);
        self.banned_phrases
            .iter()
            .copied()
            .find(|phrase| haystack.contains(&fold_text(phrase)))
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Lower-cases `text` and straightens typographic apostrophes.
pub fn fold_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}

/// Whether `term` occurs in `text` as a whole word, ignoring case.
///
/// A match must not be flanked by letters or digits. Blank terms never match.
pub fn contains_word(text: &str, term: &str) -> bool {
    let term = fold_text(term.trim());
    if term.is_empty() {
        return false;
    }
    let haystack = fold_text(text);
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(&term) {
        let start = from + offset;
        let end = start + term.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        let open = before.is_none_or(|c| !c.is_alphanumeric());
        let close = after.is_none_or(|c| !c.is_alphanumeric());
        if open && close {
            return true;
        }
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banned_phrase_detection_ignores_case_and_apostrophes() {
        let rules = RuleBook::STANDARD;
        assert_eq!(rules.first_banned("Let\u{2019}s Dive In, friends"), Some("let's dive in"));
        assert_eq!(rules.first_banned("A real GAME CHANGER"), Some("game changer"));
        assert_eq!(rules.first_banned("plain text"), None);
        assert_eq!(rules.first_banned("one \u{2014} two"), Some("\u{2014}"));
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("This is Cheap stuff", "cheap"));
        assert!(contains_word("cheap.", "cheap"));
        assert!(!contains_word("cheaper options", "cheap"));
        assert!(!contains_word("anything", "   "));
        assert!(contains_word("go with Acme Co today", "acme co"));
        assert!(!contains_word("cheapcheap", "cheap"));
    }
}
