//! Records completion exchanges into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Exchange, Outcome};
use crate::error::{CassetteError, CompletionError};
use crate::ports::llm::{CompletionRequest, CompletionResponse};

/// Records exchanges and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    model: String,
    exchanges: Vec<Exchange>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            model: model.into(),
            exchanges: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record one exchange. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        request: &CompletionRequest,
        result: &Result<CompletionResponse, CompletionError>,
    ) {
        let outcome = match result {
            Ok(response) => Outcome::Ok(response.clone()),
            Err(e) => Outcome::Err(e.to_string()),
        };
        self.exchanges.push(Exchange {
            seq: self.next_seq,
            label: request.label.clone(),
            request: request.clone(),
            outcome,
        });
        self.next_seq += 1;
    }

    /// Number of exchanges recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be serialized or written.
    pub fn finish(self) -> Result<PathBuf, CassetteError> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            model: self.model,
            exchanges: self.exchanges,
        };
        let yaml = serde_yaml::to_string(&cassette)
            .map_err(|source| CassetteError::Format { path: self.path.clone(), source })?;
        std::fs::write(&self.path, yaml)
            .map_err(|source| CassetteError::Io { path: self.path.clone(), source })?;
        Ok(self.path)
    }
}
