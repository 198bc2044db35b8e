//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use crate::cassette::format::{Cassette, Outcome};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::CompletionError;
use crate::ports::llm::{CompletionRequest, LlmClient, LlmFuture};

/// Serves recorded completions from a cassette.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { replayer: Mutex::new(CassetteReplayer::new(cassette)) }
    }

    /// Labels whose recordings were never requested.
    #[must_use]
    pub fn unconsumed_labels(&self) -> Vec<String> {
        self.replayer.lock().map(|r| r.remaining_labels()).unwrap_or_default()
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let exchange = self
            .replayer
            .lock()
            .map_err(|_| CompletionError::Replay(format!("{} (replayer poisoned)", request.label)))
            .and_then(|mut replayer| {
                replayer
                    .next_exchange(&request.label)
                    .ok_or_else(|| CompletionError::Replay(request.label.clone()))
            });

        Box::pin(async move {
            match exchange?.outcome {
                Outcome::Ok(response) => Ok(response),
                Outcome::Err(message) => Err(CompletionError::Http(message)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::cassette::format::Exchange;
    use crate::ports::llm::CompletionResponse;

    fn request(label: &str) -> CompletionRequest {
        CompletionRequest {
            label: label.into(),
            model: "m".into(),
            system: String::new(),
            prompt: String::new(),
            max_tokens: 1,
        }
    }

    fn cassette() -> Cassette {
        Cassette {
            name: "replay".into(),
            recorded_at: Utc::now(),
            model: "m".into(),
            exchanges: vec![
                Exchange {
                    seq: 0,
                    label: "platform:backend".into(),
                    request: request("platform:backend"),
                    outcome: Outcome::Ok(CompletionResponse {
                        text: "{\"tasks\": []}".into(),
                        truncated: false,
                        input_tokens: 5,
                        output_tokens: 4,
                    }),
                },
                Exchange {
                    seq: 1,
                    label: "integration".into(),
                    request: request("integration"),
                    outcome: Outcome::Err("connection reset".into()),
                },
            ],
        }
    }

    #[tokio::test]
    async fn serves_recorded_response() {
        let client = ReplayingLlmClient::new(&cassette());
        let response = client.complete(&request("platform:backend")).await.unwrap();
        assert_eq!(response.text, "{\"tasks\": []}");
        assert_eq!(client.unconsumed_labels(), vec!["integration".to_string()]);
    }

    #[tokio::test]
    async fn recorded_error_is_replayed_as_error() {
        let client = ReplayingLlmClient::new(&cassette());
        let err = client.complete(&request("integration")).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn missing_recording_is_an_error_not_a_panic() {
        let client = ReplayingLlmClient::new(&cassette());
        let err = client.complete(&request("platform:mobile")).await.unwrap_err();
        assert!(matches!(err, CompletionError::Replay(label) if label == "platform:mobile"));
    }
}
