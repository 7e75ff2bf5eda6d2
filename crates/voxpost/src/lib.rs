//! Voxpost: constrained, on-brand social content generation.
//!
//! Voxpost turns a brand profile and a content request into a formatted
//! script or post. Prompts are assembled from the brand's voice, strategy and
//! a rotating style, sent to any OpenAI-compatible model, repaired
//! deterministically, and validated against hard rules. Failed validations
//! are retried with the failure reason fed back to the model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voxpost::{
//!     ContentGenerator, OpenAiCompatClient, VoxpostConfig, handle_generate, parse_request,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VoxpostConfig::load(None)?;
//! let client = OpenAiCompatClient::new(config.completion().clone())?;
//! let generator = ContentGenerator::new(client).with_config(config.generation().clone());
//!
//! let request = parse_request(r#"{"contentType": "Reel", "contentPillar": "Educational"}"#)?;
//! let response = handle_generate(&generator, request).await;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `voxpost_error` - Error types
//! - `voxpost_core` - Brand profile, requests and wire shapes
//! - `voxpost_interface` - `CompletionDriver` trait
//! - `voxpost_models` - OpenAI-compatible HTTP driver
//! - `voxpost_pipeline` - Rotation, prompts, repair, validation and retries
//!
//! This crate re-exports everything and adds configuration loading, the JSON
//! request handler, and logging setup.
//!
//! # Cargo Features
//!
//! - `otel` - Export tracing spans through OpenTelemetry's stdout exporter

#![forbid(unsafe_code)]

mod config;
mod handler;
mod observability;

pub use config::{ENV_PREFIX, VoxpostConfig};
pub use handler::{handle_generate, handle_generate_with, parse_request};
pub use observability::{ObservabilityConfig, init_observability};

pub use voxpost_core::*;
pub use voxpost_error::*;
pub use voxpost_interface::*;
pub use voxpost_models::*;
pub use voxpost_pipeline::*;
