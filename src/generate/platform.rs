//! One platform expert's generation call.

use std::fmt::Write as _;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::context::build_context;
use super::json::{parse_first_json_object, preview};
use super::request_completion;
use crate::context::ServiceContext;
use crate::error::ParseError;
use crate::platform::prompts::{DECOMPOSITION_INSTRUCTION, STRICT_RETRY_ADDENDUM};
use crate::platform::PlatformId;
use crate::ports::llm::{CompletionRequest, CompletionResponse};
use crate::spec::{Assumption, GeneratedTask, PlatformReport, PlatformStatus, TokenUsage};
use crate::story::{HierarchicalContext, UserStoryInput};

/// Characters of raw completion text included in parse-failure logs.
const LOG_PREVIEW_CHARS: usize = 500;

/// What one platform contributed to a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformResult {
    /// Platform that was asked.
    pub platform: PlatformId,
    /// Tasks, each labelled with `platform`.
    pub tasks: Vec<GeneratedTask>,
    /// Document-level assumptions followed by task-level ones.
    pub assumptions: Vec<Assumption>,
    /// How the call ended.
    pub status: PlatformStatus,
    /// Completion requests issued.
    pub attempts: u8,
    /// Tokens consumed across attempts.
    pub usage: TokenUsage,
}

impl PlatformResult {
    fn empty(platform: PlatformId, status: PlatformStatus, attempts: u8, usage: TokenUsage) -> Self {
        Self { platform, tasks: Vec::new(), assumptions: Vec::new(), status, attempts, usage }
    }

    /// Summary line for the run report.
    #[must_use]
    pub fn report(&self) -> PlatformReport {
        PlatformReport {
            platform: self.platform,
            platform_name: self.platform.display_name().to_string(),
            status: self.status,
            task_count: self.tasks.len(),
            attempts: self.attempts,
        }
    }
}

/// Asks one platform expert for tasks.
///
/// Never fails: transport errors, a second truncation and unusable output
/// all degrade to an empty result whose `status` says what happened.
pub async fn generate_platform_spec(
    ctx: &ServiceContext,
    story: &UserStoryInput,
    platform: PlatformId,
    additional_context: Option<&str>,
    hierarchical_context: Option<&HierarchicalContext>,
) -> PlatformResult {
    let persona = platform.persona_prompt();
    let prompt = build_platform_prompt(story, additional_context, hierarchical_context);
    let request = CompletionRequest {
        label: format!("platform:{platform}"),
        model: ctx.config.model.clone(),
        system: persona.to_string(),
        prompt,
        max_tokens: ctx.config.max_output_tokens,
    };
    debug!(%platform, prompt_chars = request.prompt.len(), "dispatching platform generation");

    let mut usage = TokenUsage::default();
    let mut response = match request_completion(ctx, &request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(%platform, error = %e, "platform generation request failed");
            return PlatformResult::empty(platform, PlatformStatus::RequestFailed, 1, usage);
        }
    };
    usage.add(response.input_tokens, response.output_tokens);

    let mut attempts = 1;
    if response.truncated {
        warn!(%platform, output_tokens = response.output_tokens, "response truncated; retrying in strict mode");
        let retry = CompletionRequest {
            label: format!("platform:{platform}:retry"),
            system: format!("{persona}{STRICT_RETRY_ADDENDUM}"),
            ..request
        };
        attempts = 2;
        response = match request_completion(ctx, &retry).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%platform, error = %e, "strict retry request failed");
                return PlatformResult::empty(platform, PlatformStatus::RequestFailed, attempts, usage);
            }
        };
        usage.add(response.input_tokens, response.output_tokens);
        if response.truncated {
            warn!(%platform, "strict retry truncated as well; giving up on this platform");
            return PlatformResult::empty(platform, PlatformStatus::Truncated, attempts, usage);
        }
    }

    finish(platform, &response, attempts, usage)
}

fn finish(
    platform: PlatformId,
    response: &CompletionResponse,
    attempts: u8,
    usage: TokenUsage,
) -> PlatformResult {
    match parse_platform_response(&response.text, platform) {
        Ok(PlatformDocument { tasks, assumptions }) => {
            let status = if tasks.is_empty() {
                warn!(%platform, "model returned zero tasks");
                PlatformStatus::Empty
            } else {
                info!(%platform, tasks = tasks.len(), attempts, "platform tasks generated");
                PlatformStatus::Generated
            };
            PlatformResult { platform, tasks, assumptions, status, attempts, usage }
        }
        Err(e) => {
            warn!(
                %platform,
                error = %e,
                preview = preview(&response.text, LOG_PREVIEW_CHARS),
                "could not parse platform response"
            );
            PlatformResult::empty(platform, PlatformStatus::ParseFailed, attempts, usage)
        }
    }
}

/// The user message sent to every platform expert.
#[must_use]
pub fn build_platform_prompt(
    story: &UserStoryInput,
    additional_context: Option<&str>,
    hierarchical_context: Option<&HierarchicalContext>,
) -> String {
    let mut prompt = build_context(hierarchical_context);
    if !prompt.is_empty() {
        prompt.push('\n');
    }

    prompt.push_str("## User Story\n\n");
    let fields = [
        ("ID", story.id.as_str()),
        ("Story", story.narrative.as_str()),
        ("Persona", story.persona.as_str()),
        ("Feature Area", story.feature_area.as_str()),
        ("Priority", story.priority.as_str()),
    ];
    for (label, value) in fields {
        if !value.trim().is_empty() {
            let _ = writeln!(prompt, "**{label}:** {}", value.trim());
        }
    }

    let criteria: Vec<&str> = story
        .acceptance_criteria
        .iter()
        .flatten()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if !criteria.is_empty() {
        prompt.push_str("\n**Acceptance Criteria:**\n");
        for (i, criterion) in criteria.iter().enumerate() {
            let _ = writeln!(prompt, "{}. {criterion}", i + 1);
        }
    }

    if let Some(extra) = additional_context.map(str::trim).filter(|s| !s.is_empty()) {
        let _ = write!(prompt, "\n## Additional Instructions\n\n{extra}\n");
    }

    let _ = write!(prompt, "\n{DECOMPOSITION_INSTRUCTION}\n");
    prompt
}

/// A platform expert's answer after normalization.
#[derive(Debug, Default, Deserialize)]
struct PlatformDocument {
    #[serde(default)]
    tasks: Vec<GeneratedTask>,
    #[serde(default)]
    assumptions: Vec<Assumption>,
}

fn parse_platform_response(
    text: &str,
    platform: PlatformId,
) -> Result<PlatformDocument, ParseError> {
    let mut object = parse_first_json_object(text)?;
    force_platform(&mut object, platform);

    let mut document: PlatformDocument = serde_json::from_value(Value::Object(object))
        .map_err(|e| ParseError::Shape(e.to_string()))?;

    let task_assumptions: Vec<Assumption> =
        document.tasks.iter().flat_map(|t| t.assumptions.iter().cloned()).collect();
    for assumption in task_assumptions {
        if !document.assumptions.contains(&assumption) {
            document.assumptions.push(assumption);
        }
    }
    document.assumptions.iter_mut().for_each(Assumption::drop_escalation_if_confident);
    for task in &mut document.tasks {
        task.assumptions.iter_mut().for_each(Assumption::drop_escalation_if_confident);
    }
    Ok(document)
}

/// Overwrites each task's `platform` before deserializing: models sometimes
/// write a display name ("Backend API") or another platform's id.
fn force_platform(object: &mut Map<String, Value>, platform: PlatformId) {
    if let Some(Value::Array(tasks)) = object.get_mut("tasks") {
        for task in tasks.iter_mut().filter_map(Value::as_object_mut) {
            task.insert("platform".into(), Value::String(platform.as_str().into()));
        }
    }
}
