//! Completion service errors.
//!
//! Any of these is fatal for the current generation request: the retry
//! controller only retries validation failures, never transport failures.

/// Error kinds raised at the completion service boundary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum CompletionErrorKind {
    /// The request never produced an HTTP response
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// The service answered with a non-success status
    #[display("Service returned {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Body or reason phrase
        message: String,
    },

    /// The response body could not be decoded
    #[display("Failed to deserialize response: {}", _0)]
    Deserialization(String),

    /// The service answered without any text
    #[display("Completion returned no text")]
    EmptyResponse,

    /// The driver is missing settings it needs (endpoint, model, key)
    #[display("Driver configuration error: {}", _0)]
    Configuration(String),
}

/// Completion error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Completion Error: {} at line {} in {}", kind, line, file)]
pub struct CompletionError {
    /// The error kind
    pub kind: CompletionErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl CompletionError {
    /// Create a new CompletionError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxpost_error::{CompletionError, CompletionErrorKind};
    ///
    /// let err = CompletionError::new(CompletionErrorKind::Api {
    ///     status: 503,
    ///     message: "overloaded".to_string(),
    /// });
    /// assert!(format!("{}", err).contains("503"));
    /// ```
    #[track_caller]
    pub fn new(kind: CompletionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CompletionErrorKind {
        &self.kind
    }
}
