//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the voxpost binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{generate, prompt, validate};
