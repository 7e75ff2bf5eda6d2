//! Completion service drivers for Voxpost.
//!
//! Provides an OpenAI-compatible chat-completions client implementing
//! [`voxpost_interface::CompletionDriver`]. Any server speaking the
//! `/v1/chat/completions` dialect works (hosted APIs, vLLM, llama.cpp,
//! mistral.rs).
//!
//! # Example
//!
//! ```rust,no_run
//! use voxpost_core::CompletionRequest;
//! use voxpost_interface::CompletionDriver;
//! use voxpost_models::{CompletionConfig, OpenAiCompatClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiCompatClient::new(CompletionConfig::default())?;
//! let request = CompletionRequest::builder()
//!     .system_prompt("You are a scriptwriter.")
//!     .user_prompt("Write a hook about sleep.")
//!     .max_output_tokens(200u32)
//!     .temperature(0.8f32)
//!     .build()?;
//! let response = client.complete(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod request;
mod response;

pub use client::OpenAiCompatClient;
pub use config::CompletionConfig;
pub use convert::{from_chat_response, to_chat_request};
pub use request::{ChatCompletionRequest, ChatCompletionRequestBuilder, ChatMessage};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage, Usage};
