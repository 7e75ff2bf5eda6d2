//! JSON decoding errors for inbound requests and profiles.

/// Failure to decode or encode a JSON payload.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} ({}) at line {} in {}", message, payload, line, file)]
pub struct JsonError {
    /// The underlying serde message
    pub message: String,
    /// Which payload failed (e.g. "generation request")
    pub payload: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for the named payload at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxpost_error::JsonError;
    ///
    /// let err = JsonError::new("generation request", "expected `,` at line 3");
    /// assert_eq!(err.payload, "generation request");
    /// ```
    #[track_caller]
    pub fn new(payload: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            payload: payload.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
