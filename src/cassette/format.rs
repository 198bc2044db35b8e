//! Cassette data structures for recording and replaying completions.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CassetteError;
use crate::ports::llm::{CompletionRequest, CompletionResponse};

/// What the provider returned for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// A completion, possibly truncated.
    Ok(CompletionResponse),
    /// The request failed; only the rendered error message is kept.
    Err(String),
}

/// A single recorded request/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Request label; replay queues are keyed by it.
    pub label: String,
    /// The request as it was issued.
    pub request: CompletionRequest,
    /// The provider's answer.
    pub outcome: Outcome,
}

/// A cassette containing the exchanges of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Model configured at recording time.
    pub model: String,
    /// Exchanges in the order their responses arrived.
    pub exchanges: Vec<Exchange>,
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CassetteError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CassetteError::Io { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| CassetteError::Format { path: path.to_path_buf(), source })
    }
}
