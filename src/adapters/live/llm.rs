//! Live adapter for the `LlmClient` port using the Anthropic messages API.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::CompletionError;
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Live LLM client that calls the Anthropic Claude API.
pub struct AnthropicClient {
    client: Client,
    api_url: String,
    api_version: String,
}

impl AnthropicClient {
    /// Creates a client pointed at the endpoint named in `config`.
    #[must_use]
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_version: config.api_version.clone(),
        }
    }
}

/// Request body sent to the Anthropic messages API.
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

/// A single message in the Anthropic API request.
#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the Anthropic messages API.
#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: Usage,
}

/// A content block in the Anthropic response. Non-text blocks carry no text.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Token usage reported by the Anthropic API.
#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Error response from the Anthropic API.
#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

/// Detail inside an Anthropic error response.
#[derive(Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

impl LlmClient for AnthropicClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key =
                env::var(API_KEY_VAR).map_err(|_| CompletionError::MissingApiKey(API_KEY_VAR))?;

            let body = AnthropicRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                system: &request.system,
                messages: vec![AnthropicMessage { role: "user", content: &request.prompt }],
            };

            let response = self
                .client
                .post(&self.api_url)
                .header("x-api-key", &api_key)
                .header("anthropic-version", &self.api_version)
                .json(&body)
                .send()
                .await
                .map_err(|e| CompletionError::Http(e.to_string()))?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| CompletionError::Http(e.to_string()))?;

            if !status.is_success() {
                let message = serde_json::from_str::<AnthropicError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(CompletionError::Api { status: status.as_u16(), message });
            }

            let api_response: AnthropicResponse = serde_json::from_str(&response_text)
                .map_err(|e| CompletionError::Decode(e.to_string()))?;

            Ok(into_completion(api_response))
        })
    }
}

fn into_completion(api_response: AnthropicResponse) -> CompletionResponse {
    let truncated = api_response.stop_reason.as_deref() == Some("max_tokens");
    let text = api_response.content.into_iter().map(|block| block.text).collect::<String>();
    CompletionResponse {
        text,
        truncated,
        input_tokens: api_response.usage.input_tokens,
        output_tokens: api_response.usage.output_tokens,
    }
}
