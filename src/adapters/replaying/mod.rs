//! Replaying adapters that serve recorded exchanges.

pub mod llm;

pub use llm::ReplayingLlmClient;
