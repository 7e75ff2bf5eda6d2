//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Voxpost - constrained, on-brand social content generation
#[derive(Parser, Debug)]
#[command(name = "voxpost")]
#[command(about = "Constrained, on-brand social content generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Extra configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate content for a JSON request and print the JSON response
    Generate {
        /// Path to the request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Seed for the style rotation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the first-attempt prompts without calling the model
    Prompt {
        /// Path to the request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Seed for the style rotation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate existing content against a request
    Validate {
        /// Path to the request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Path to the content to check
        #[arg(long)]
        content: PathBuf,

        /// Run the repair pass before validating
        #[arg(long)]
        repair: bool,
    },
}
