//! Multi-platform task generation.
//!
//! [`generate_task_specs`] fans one user story out to the selected platform
//! experts concurrently, asks an integration architect to reconcile their
//! plans, and merges everything into a single [`GeneratedSpecs`]. Individual
//! failures degrade to empty platform results; the pipeline itself never
//! returns an error.

pub mod context;
pub mod dod;
pub mod integration;
pub mod json;
pub mod platform;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info};

use crate::context::ServiceContext;
use crate::error::CompletionError;
use crate::platform::{dedup_platforms, PlatformId};
use crate::ports::llm::{CompletionRequest, CompletionResponse};
use crate::spec::{GeneratedSpecs, GeneratedTask, TokenUsage};
use crate::story::{HierarchicalContext, UserStoryInput};

pub use context::build_context;
pub use dod::merge_dod;
pub use integration::generate_integration_strategy;
pub use platform::{build_platform_prompt, generate_platform_spec, PlatformResult};

/// Per-run knobs for [`generate_task_specs`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Platforms to ask, in dispatch order. Duplicates are ignored.
    pub selected_platforms: Vec<PlatformId>,
    /// Free-form instructions appended to every platform prompt.
    pub additional_context: Option<String>,
    /// Project and epic framing placed ahead of the story.
    pub hierarchical_context: Option<HierarchicalContext>,
}

/// Runs the whole pipeline for one story.
///
/// Tasks and assumptions come back grouped by platform in the order the
/// platforms were selected, regardless of which call finished first.
pub async fn generate_task_specs(
    ctx: &ServiceContext,
    story: &UserStoryInput,
    options: &GenerateOptions,
) -> GeneratedSpecs {
    let platforms = dedup_platforms(&options.selected_platforms);
    if platforms.is_empty() {
        debug!("no platforms selected");
        return GeneratedSpecs::default();
    }
    info!(platforms = platforms.len(), "generating task specs");

    let additional = options.additional_context.as_deref();
    let hierarchical = options.hierarchical_context.as_ref();
    let results: Vec<PlatformResult> = join_all(
        platforms
            .iter()
            .map(|&platform| generate_platform_spec(ctx, story, platform, additional, hierarchical)),
    )
    .await;

    let mut usage = TokenUsage::default();
    for result in &results {
        usage += result.usage;
    }

    let strategy = if platforms.len() > 1 {
        let round = integration::integration_round(ctx, story, &results).await;
        usage += round.usage;
        round.strategy
    } else {
        None
    };

    let definition_of_done = merge_dod(&results, strategy.as_ref());
    let platform_reports = results.iter().map(PlatformResult::report).collect();

    let mut tasks = Vec::new();
    let mut assumptions = Vec::new();
    for result in results {
        tasks.extend(result.tasks);
        assumptions.extend(result.assumptions);
    }
    let overall_confidence = overall_confidence(&tasks);

    info!(
        tasks = tasks.len(),
        assumptions = assumptions.len(),
        overall_confidence,
        integration = strategy.is_some(),
        "task specs generated"
    );

    GeneratedSpecs {
        tasks,
        integration_strategy: strategy,
        definition_of_done,
        assumptions,
        overall_confidence,
        platform_reports,
        usage,
    }
}

/// Average task confidence (HIGH 90, MEDIUM 70, LOW 50), rounded half up.
///
/// Zero tasks score zero.
#[must_use]
pub fn overall_confidence(tasks: &[GeneratedTask]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let total: u64 = tasks.iter().map(|t| u64::from(t.confidence.score())).sum();
    let n = tasks.len() as u64;
    let rounded = (2 * total + n) / (2 * n);
    u8::try_from(rounded).unwrap_or(100)
}

/// Sends one request, bounded by the configured timeout if any.
pub(crate) async fn request_completion(
    ctx: &ServiceContext,
    request: &CompletionRequest,
) -> Result<CompletionResponse, CompletionError> {
    match ctx.config.request_timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), ctx.llm.complete(request))
            .await
            .map_err(|_| CompletionError::Timeout(secs))?,
        None => ctx.llm.complete(request).await,
    }
}
