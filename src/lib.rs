//! Minimal async client for the OpenAI chat-completion API.
//!
//! ```no_run
//! use uopenai::{Client, EasyOptions};
//!
//! # async fn run() -> uopenai::Result<()> {
//! let client = Client::new("sk-...", None)?;
//! let answer = client.easy_complete("Say hi", &EasyOptions::new()).await?;
//! println!("{:?}", answer.as_text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod options;

pub use client::Client;
pub use config::{ClientConfig, OPENAI_V1};
pub use error::{ApiError, Error, Result};
pub use models::{Answer, ChatRequest, Choice, EasyAnswer, Message, ResponseFormat, Usage};
pub use options::{CompletionOptions, DEFAULT_MODEL, EasyOptions};
