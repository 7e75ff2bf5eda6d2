//! Top-level error wrapper types.

use crate::{BuilderError, CompletionError, ConfigError, JsonError};

/// Every failure the Voxpost crates can surface.
///
/// Validation failures are absent; they are data (`ValidationResult`).
///
/// # Examples
///
/// ```
/// use voxpost_error::{CompletionError, CompletionErrorKind, VoxpostError};
///
/// let err: VoxpostError = CompletionError::new(CompletionErrorKind::EmptyResponse).into();
/// assert!(format!("{}", err).contains("no text"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VoxpostErrorKind {
    /// JSON decoding error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Completion service error
    #[from(CompletionError)]
    Completion(CompletionError),
}

/// Voxpost error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Voxpost Error: {}", _0)]
pub struct VoxpostError(Box<VoxpostErrorKind>);

impl VoxpostError {
    /// Create a new error from a kind.
    pub fn new(kind: VoxpostErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VoxpostErrorKind {
        &self.0
    }

    /// Whether this error came from the completion service.
    pub fn is_completion(&self) -> bool {
        matches!(*self.0, VoxpostErrorKind::Completion(_))
    }
}

impl<T> From<T> for VoxpostError
where
    T: Into<VoxpostErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Voxpost operations.
pub type VoxpostResult<T> = std::result::Result<T, VoxpostError>;
