//! Audience sophistication tier.

use serde::{Deserialize, Serialize};

/// How advanced the target audience is.
///
/// The tier hardens or softens the default call to action.
///
/// # Examples
///
/// ```
/// use voxpost_core::Tier;
///
/// assert_eq!(Tier::from_label("intermediate"), Tier::Mid);
/// assert_eq!(Tier::from_label("ADVANCED"), Tier::Advanced);
/// assert_eq!(format!("{}", Tier::Beginner), "Beginner");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    /// New to the topic
    #[default]
    Beginner,
    /// Some experience
    Mid,
    /// Experienced practitioners
    Advanced,
}

impl Tier {
    /// Map a free-form label onto a tier; unknown labels become `Beginner`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.starts_with("adv") || label == "expert" {
            Self::Advanced
        } else if label.starts_with("mid") || label.starts_with("inter") {
            Self::Mid
        } else {
            Self::Beginner
        }
    }
}

impl From<String> for Tier {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.to_string()
    }
}
