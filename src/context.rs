//! Service context bundling the completion client with its configuration.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::AnthropicClient;
use crate::adapters::recording::RecordingLlmClient;
use crate::adapters::replaying::ReplayingLlmClient;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::GeneratorConfig;
use crate::error::CassetteError;
use crate::ports::llm::LlmClient;

/// Everything a generation run needs from the outside world.
///
/// Constructors wire up different client implementations (live,
/// recording, replaying, or any caller-supplied one).
pub struct ServiceContext {
    /// LLM client for language-model completions.
    pub llm: Box<dyn LlmClient>,
    /// Model, budgets and timeouts.
    pub config: GeneratorConfig,
    /// Cassette recorder shared with a [`RecordingLlmClient`].
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a context around any client.
    #[must_use]
    pub fn new(llm: Box<dyn LlmClient>, config: GeneratorConfig) -> Self {
        Self { llm, config, recorder: None }
    }

    /// Creates a context that talks to the Anthropic API.
    #[must_use]
    pub fn live(config: GeneratorConfig) -> Self {
        let client = AnthropicClient::new(&config);
        Self::new(Box::new(client), config)
    }

    /// Creates a context that records every exchange of `inner` to `path`.
    ///
    /// The cassette is written by [`ServiceContext::finish`].
    #[must_use]
    pub fn recording(inner: Box<dyn LlmClient>, config: GeneratorConfig, path: &Path) -> Self {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("storyspec-session")
            .trim_end_matches(".cassette")
            .to_string();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name, &config.model)));
        let llm = RecordingLlmClient::new(inner, Arc::clone(&recorder));
        Self { llm: Box::new(llm), config, recorder: Some(recorder) }
    }

    /// Creates a context that serves completions from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(config: GeneratorConfig, path: &Path) -> Result<Self, CassetteError> {
        let cassette = Cassette::load(path)?;
        Ok(Self::new(Box::new(ReplayingLlmClient::new(&cassette)), config))
    }

    /// Tears the context down, writing the cassette if one was being recorded.
    ///
    /// Returns the cassette path when a recording was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, CassetteError> {
        let Self { llm, recorder, .. } = self;
        // Releases the recording client's handle on the recorder.
        drop(llm);

        let Some(recorder) = recorder else {
            return Ok(None);
        };
        match Arc::try_unwrap(recorder) {
            Ok(mutex) => {
                let recorder = mutex.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner);
                recorder.finish().map(Some)
            }
            Err(_) => {
                tracing::warn!("cassette recorder still shared; recording not written");
                Ok(None)
            }
        }
    }
}
