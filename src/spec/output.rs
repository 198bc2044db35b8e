//! The pipeline's result document.

use serde::{Deserialize, Serialize};

use super::assumption::Assumption;
use super::integration::IntegrationStrategy;
use super::task::GeneratedTask;
use crate::platform::PlatformId;

/// Deduplicated checklist for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDod {
    /// Platform the checklist belongs to.
    pub platform: PlatformId,
    /// Its display name.
    pub platform_name: String,
    /// Checklist items in first-seen order.
    pub checklist: Vec<String>,
}

/// Checklist for the cross-platform seams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationDod {
    /// What the checklist covers.
    pub description: String,
    /// Checklist items.
    pub checklist: Vec<String>,
}

/// Merged definition of done.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DefinitionOfDone {
    /// One entry per platform that produced tasks.
    pub platform_dod: Vec<PlatformDod>,
    /// Present when an integration strategy exists across 2+ platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_dod: Option<IntegrationDod>,
}

/// How a platform's generation call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStatus {
    /// At least one task was generated.
    Generated,
    /// The model answered with a valid document but no tasks.
    Empty,
    /// Both the first attempt and the strict retry hit the output cap.
    Truncated,
    /// The provider call failed or timed out.
    RequestFailed,
    /// The answer held no usable JSON document.
    ParseFailed,
}

/// Token counts reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens.
    pub input_tokens: u64,
    /// Completion tokens.
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Adds one response's counters.
    pub fn add(&mut self, input_tokens: u32, output_tokens: u32) {
        self.input_tokens += u64::from(input_tokens);
        self.output_tokens += u64::from(output_tokens);
    }
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// Per-platform summary, for telling "nothing to do" apart from failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformReport {
    /// Platform requested.
    pub platform: PlatformId,
    /// Its display name.
    pub platform_name: String,
    /// How the call ended.
    pub status: PlatformStatus,
    /// Number of tasks kept.
    pub task_count: usize,
    /// Completion requests issued (1, or 2 after a truncation).
    pub attempts: u8,
}

/// Final output of [`crate::generate::generate_task_specs`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedSpecs {
    /// All tasks, grouped by platform in dispatch order.
    pub tasks: Vec<GeneratedTask>,
    /// Present only when 2+ platforms were requested and the call succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_strategy: Option<IntegrationStrategy>,
    /// Merged definition of done.
    pub definition_of_done: DefinitionOfDone,
    /// All assumptions, grouped by platform in dispatch order.
    pub assumptions: Vec<Assumption>,
    /// Average task confidence in `0..=100`.
    pub overall_confidence: u8,
    /// One report per dispatched platform.
    #[serde(default)]
    pub platform_reports: Vec<PlatformReport>,
    /// Token usage across all requests of the run.
    #[serde(default)]
    pub usage: TokenUsage,
}
