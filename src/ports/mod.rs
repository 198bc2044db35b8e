//! Port traits defining external boundaries.
//!
//! The only boundary the generator crosses is the language model.
//! Implementations live in `src/adapters/`.

pub mod llm;

pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};
