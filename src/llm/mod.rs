//! Language-model collaborator interface.
//!
//! The pipeline only needs two operations: embed a text into a fixed-size
//! vector, and generate text from a prompt. `GeminiClient` is the production
//! implementation; tests substitute their own `LlmClient`.

mod client;
mod gemini;

pub use client::LlmClient;
pub use gemini::GeminiClient;
