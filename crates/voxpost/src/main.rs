//! Voxpost CLI binary.
//!
//! This binary provides command-line access to Voxpost's pipeline:
//! - Generate content for a JSON request
//! - Preview the prompts a request would send
//! - Validate (and optionally repair) existing content

use clap::Parser;
use voxpost::{ObservabilityConfig, VoxpostConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate, prompt, validate};

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_observability(
        &ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    let config = VoxpostConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate { request, seed } => {
            generate(&config, &request, seed).await?;
        }

        Commands::Prompt { request, seed } => {
            prompt(&config, &request, seed)?;
        }

        Commands::Validate {
            request,
            content,
            repair,
        } => {
            validate(&config, &request, &content, repair)?;
        }
    }

    Ok(())
}
