//! Reconciling per-platform plans into shared contracts.

use std::fmt::Write as _;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::json::{parse_first_json_object, preview};
use super::platform::PlatformResult;
use super::request_completion;
use crate::context::ServiceContext;
use crate::error::ParseError;
use crate::platform::prompts::INTEGRATION_ARCHITECT;
use crate::ports::llm::CompletionRequest;
use crate::spec::{IntegrationStrategy, TokenUsage};
use crate::story::UserStoryInput;

/// Request label of the integration call.
pub const INTEGRATION_LABEL: &str = "integration";

/// Characters of raw completion text included in parse-failure logs.
const LOG_PREVIEW_CHARS: usize = 500;

/// Outcome of the integration step, with the tokens it spent.
#[derive(Debug, Default)]
pub(crate) struct IntegrationRound {
    pub(crate) strategy: Option<IntegrationStrategy>,
    pub(crate) usage: TokenUsage,
}

/// Asks for API contracts, shared types, build order and cross-platform tests.
///
/// Returns `None` when fewer than two platforms produced tasks, and on any
/// request or parse failure.
pub async fn generate_integration_strategy(
    ctx: &ServiceContext,
    story: &UserStoryInput,
    results: &[PlatformResult],
) -> Option<IntegrationStrategy> {
    integration_round(ctx, story, results).await.strategy
}

pub(crate) async fn integration_round(
    ctx: &ServiceContext,
    story: &UserStoryInput,
    results: &[PlatformResult],
) -> IntegrationRound {
    let contributing: Vec<&PlatformResult> = results.iter().filter(|r| !r.tasks.is_empty()).collect();
    if contributing.len() < 2 {
        debug!(platforms = contributing.len(), "skipping integration strategy");
        return IntegrationRound::default();
    }

    let request = CompletionRequest {
        label: INTEGRATION_LABEL.into(),
        model: ctx.config.model.clone(),
        system: INTEGRATION_ARCHITECT.into(),
        prompt: build_integration_prompt(story, &contributing),
        max_tokens: ctx.config.integration_max_tokens,
    };

    let mut round = IntegrationRound::default();
    let response = match request_completion(ctx, &request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "integration strategy request failed");
            return round;
        }
    };
    round.usage.add(response.input_tokens, response.output_tokens);
    if response.truncated {
        warn!(output_tokens = response.output_tokens, "integration strategy response truncated");
    }

    match parse_strategy(&response.text) {
        Ok(strategy) => {
            info!(
                contracts = strategy.api_contracts.len(),
                shared_types = strategy.shared_types.len(),
                tests = strategy.integration_tests.len(),
                "integration strategy generated"
            );
            round.strategy = Some(strategy);
        }
        Err(e) => {
            warn!(
                error = %e,
                preview = preview(&response.text, LOG_PREVIEW_CHARS),
                "could not parse integration strategy"
            );
        }
    }
    round
}

fn parse_strategy(text: &str) -> Result<IntegrationStrategy, ParseError> {
    let object = parse_first_json_object(text)?;
    let mut strategy: IntegrationStrategy = serde_json::from_value(Value::Object(object))
        .map_err(|e| ParseError::Shape(e.to_string()))?;
    strategy.integration_sequence.sort_by_key(|step| step.order);
    Ok(strategy)
}

fn build_integration_prompt(story: &UserStoryInput, results: &[&PlatformResult]) -> String {
    let mut prompt = String::new();
    let _ = write!(prompt, "## User Story\n\n{}\n\n## Platform Plans\n", story.narrative.trim());

    for result in results {
        let platform = result.platform;
        let _ = write!(prompt, "\n### {} ({platform})\n\nTasks:\n", platform.display_name());
        for task in &result.tasks {
            if task.objective.trim().is_empty() {
                let _ = writeln!(prompt, "- {}", task.name);
            } else {
                let _ = writeln!(prompt, "- {}: {}", task.name, task.objective.trim());
            }
        }
        let outputs: Vec<&str> =
            result.tasks.iter().flat_map(|t| t.outputs.iter().map(String::as_str)).collect();
        if !outputs.is_empty() {
            let _ = writeln!(prompt, "Outputs: {}", outputs.join(", "));
        }
    }

    prompt.push_str(
        "\n## Instructions\n\n\
         Define the API contracts, shared types, integration sequence and \
         integration tests these platforms need to ship this story together.\n",
    );
    prompt
}
