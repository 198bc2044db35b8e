//! Error types shared across the crate.
//!
//! None of these escape the generation pipeline: platform and integration
//! calls absorb them into statuses and log lines. They are surfaced directly
//! only by configuration loading, cassette I/O, and the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single completion request.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(String),
    /// The provider answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider-supplied message, or the raw body.
        message: String,
    },
    /// No API key was found in the environment.
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),
    /// The provider response body did not have the expected shape.
    #[error("failed to decode provider response: {0}")]
    Decode(String),
    /// The request did not finish within the configured timeout.
    #[error("completion request timed out after {0}s")]
    Timeout(u64),
    /// A replaying client had no recording for the request.
    #[error("no recorded exchange for {0}")]
    Replay(String),
}

/// Failure to pull a JSON object out of free-form completion text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text contains no `{ ... }` span.
    #[error("no JSON object found in completion text")]
    NoJsonObject,
    /// The `{ ... }` span is not valid JSON.
    #[error("invalid JSON object: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The object parsed but does not have the expected fields.
    #[error("unexpected document shape: {0}")]
    Shape(String),
}

/// Failure to resolve the generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid YAML for [`crate::config::GeneratorConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Environment variable name.
        var: &'static str,
        /// Raw value found in the environment.
        value: String,
    },
}

/// Failure to load or write a cassette file.
#[derive(Debug, Error)]
pub enum CassetteError {
    /// Reading or writing the cassette file failed.
    #[error("cassette I/O error for {path}: {source}")]
    Io {
        /// Cassette file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The cassette could not be (de)serialized.
    #[error("cassette format error for {path}: {source}")]
    Format {
        /// Cassette file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}
