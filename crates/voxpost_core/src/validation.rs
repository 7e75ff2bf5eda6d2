//! Validation verdicts.

use serde::Serialize;

/// Outcome of validating one piece of generated content.
///
/// A passing result never carries a reason.
///
/// # Examples
///
/// ```
/// use voxpost_core::ValidationResult;
///
/// let pass = ValidationResult::pass();
/// assert!(*pass.ok());
/// assert!(pass.reason().is_empty());
///
/// let fail = ValidationResult::fail("Missing [TITLE] section");
/// assert!(!fail.ok());
/// assert_eq!(fail.reason(), "Missing [TITLE] section");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_getters::Getters)]
pub struct ValidationResult {
    ok: bool,
    reason: String,
}

impl ValidationResult {
    /// A passing verdict.
    pub fn pass() -> Self {
        Self {
            ok: true,
            reason: String::new(),
        }
    }

    /// A failing verdict with a human-readable reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: reason.into(),
        }
    }

    /// Whether the content passed.
    pub fn is_ok(&self) -> bool {
        self.ok
    }
}
