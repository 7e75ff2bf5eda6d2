//! Error types for the Voxpost content generation pipeline.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use voxpost_error::{ConfigError, VoxpostResult};
//!
//! fn load() -> VoxpostResult<()> {
//!     Err(ConfigError::new("missing [completion] table"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod completion;
mod config;
mod error;
mod json;

pub use builder::{BuilderError, BuilderErrorKind};
pub use completion::{CompletionError, CompletionErrorKind};
pub use config::ConfigError;
pub use error::{VoxpostError, VoxpostErrorKind, VoxpostResult};
pub use json::JsonError;
