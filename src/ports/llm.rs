//! LLM client port for language-model completions.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// Boxed future type alias used by [`LlmClient`] to keep the trait dyn-compatible.
pub type LlmFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, CompletionError>> + Send + 'a>>;

/// A request to generate a completion from an LLM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Caller-assigned tag (e.g. `"platform:backend"`). Used for logs and
    /// cassette lookup; never sent to the provider.
    pub label: String,
    /// The model identifier.
    pub model: String,
    /// System instructions.
    pub system: String,
    /// The user message.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// The response from an LLM completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text.
    pub text: String,
    /// Whether generation stopped because it hit `max_tokens`.
    #[serde(default)]
    pub truncated: bool,
    /// Number of prompt tokens consumed.
    #[serde(default)]
    pub input_tokens: u32,
    /// Number of completion tokens generated.
    #[serde(default)]
    pub output_tokens: u32,
}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit, etc.).
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_>;
}
