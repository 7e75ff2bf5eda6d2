//! Trait definitions for the Voxpost completion boundary.
//!
//! The completion service is an opaque capability: the pipeline hands it a
//! system and user prompt and gets raw text back.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::CompletionDriver;
