//! Generated task type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::assumption::Assumption;
use super::lenient;
use crate::platform::PlatformId;

/// How sure the model is about a task or assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    /// Well understood.
    High,
    /// Reasonable guess.
    #[default]
    Medium,
    /// Needs human review.
    Low,
}

impl Confidence {
    /// Numeric score used for the headline confidence figure.
    #[must_use]
    pub fn score(self) -> u32 {
        match self {
            Confidence::High => 90,
            Confidence::Medium => 70,
            Confidence::Low => 50,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        })
    }
}

/// Case-insensitive; anything unrecognised (including null) reads as `Medium`.
impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = lenient::string(deserializer)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Confidence::High,
            "low" | "l" => Confidence::Low,
            _ => Confidence::Medium,
        })
    }
}

/// One ordered step of a task's implementation plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImplementationStep {
    /// 1-based position.
    #[serde(default, alias = "step_number", deserialize_with = "lenient::number")]
    pub step: u32,
    /// Step title.
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    /// What to do.
    #[serde(default, deserialize_with = "lenient::string")]
    pub details: String,
    /// Short illustrative code.
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    /// Estimate for this step.
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<String>,
    /// Things that could stall this step.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub blockers: Vec<String>,
}

/// A code fragment attached to a task.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeSnippet {
    /// Language tag.
    #[serde(default, deserialize_with = "lenient::string")]
    pub language: String,
    /// What the snippet shows.
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The code itself.
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
}

/// A bare string step is read as its details.
impl From<String> for ImplementationStep {
    fn from(details: String) -> Self {
        Self { details, ..Self::default() }
    }
}

/// A bare string snippet is read as its code.
impl From<String> for CodeSnippet {
    fn from(code: String) -> Self {
        Self { code, ..Self::default() }
    }
}

/// One unit of work produced by a platform expert.
///
/// `platform` is always the platform that was asked, whatever the model wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTask {
    /// Task name.
    #[serde(default, deserialize_with = "lenient::string", alias = "title")]
    pub name: String,
    /// Platform that produced the task.
    pub platform: PlatformId,
    /// Priority label.
    #[serde(default, deserialize_with = "lenient::string")]
    pub priority: String,
    /// Free-text estimate.
    #[serde(default, deserialize_with = "lenient::string", alias = "estimated_time")]
    pub time_estimate: String,
    /// Model's confidence in the task.
    #[serde(default)]
    pub confidence: Confidence,
    /// What the task delivers.
    #[serde(default, deserialize_with = "lenient::string")]
    pub objective: String,
    /// Why the task is needed.
    #[serde(default, deserialize_with = "lenient::string")]
    pub rationale: String,
    /// Ordered implementation plan.
    #[serde(default, deserialize_with = "lenient::items")]
    pub implementation_steps: Vec<ImplementationStep>,
    /// Files or artifacts produced.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub outputs: Vec<String>,
    /// How completion is verified.
    #[serde(default, deserialize_with = "lenient::string")]
    pub validation: String,
    /// Checklist that closes the task.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub definition_of_done: Vec<String>,
    /// Attached code fragments.
    #[serde(default, deserialize_with = "lenient::items", skip_serializing_if = "Vec::is_empty")]
    pub code_snippets: Vec<CodeSnippet>,
    /// Names of tasks this one waits on.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Finer-grained work items.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub subtasks: Vec<String>,
    /// Known risks.
    #[serde(default, deserialize_with = "lenient::string_list", skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<String>,
    /// How the task is tested.
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub testing_strategy: Option<String>,
    /// Decisions taken while planning this task.
    #[serde(default)]
    pub assumptions: Vec<Assumption>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn confidence_reads_any_case() {
        let parsed: Vec<Confidence> =
            serde_json::from_value(json!(["HIGH", "low", "Medium", "unsure", null])).unwrap();
        assert_eq!(
            parsed,
            vec![
                Confidence::High,
                Confidence::Low,
                Confidence::Medium,
                Confidence::Medium,
                Confidence::Medium
            ]
        );
        assert_eq!(serde_json::to_value(Confidence::Low).unwrap(), "LOW");
    }

    #[test]
    fn scores_match_categories() {
        assert_eq!(Confidence::High.score(), 90);
        assert_eq!(Confidence::Medium.score(), 70);
        assert_eq!(Confidence::Low.score(), 50);
    }

    #[test]
    fn sparse_task_deserializes() {
        let task: GeneratedTask = serde_json::from_value(json!({
            "name": "Reservation list endpoint",
            "platform": "backend",
            "time_estimate": 6,
            "implementation_steps": [{"step": 1, "title": "Query", "details": "SELECT ..."}]
        }))
        .unwrap();
        assert_eq!(task.time_estimate, "6");
        assert_eq!(task.confidence, Confidence::Medium);
        assert_eq!(task.implementation_steps[0].step, 1);
        assert!(task.code_snippets.is_empty());
    }
}
