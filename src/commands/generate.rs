//! `storyspec generate` command.

use std::env;
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use super::RECORD_VAR;
use crate::adapters::live::AnthropicClient;
use crate::adapters::replaying::ReplayingLlmClient;
use crate::cassette::format::Cassette;
use crate::cli::OutputFormat;
use crate::config::GeneratorConfig;
use crate::context::ServiceContext;
use crate::generate::{generate_task_specs, GenerateOptions};
use crate::platform::PlatformId;
use crate::ports::llm::LlmClient;
use crate::spec::{GeneratedSpecs, PlatformStatus};
use crate::story::{HierarchicalContext, UserStoryInput};

/// Borrowed `generate` arguments.
#[derive(Debug)]
pub struct GenerateArgs<'a> {
    /// Story file.
    pub story: Option<&'a Path>,
    /// Hierarchical context file.
    pub context: Option<&'a Path>,
    /// Platforms in dispatch order.
    pub platforms: &'a [PlatformId],
    /// Extra prompt instructions.
    pub additional_context: Option<&'a str>,
    /// Cassette to replay.
    pub replay: Option<&'a Path>,
    /// Output format.
    pub format: OutputFormat,
    /// Config file.
    pub config: Option<&'a Path>,
}

/// Execute the `generate` command.
///
/// Writes the generated specs to stdout and a per-platform summary to stderr.
///
/// # Errors
///
/// Returns an error string if configuration or input files cannot be loaded,
/// if a cassette cannot be read or written, or if output serialization fails.
/// Generation failures are not errors; they show up in the summary.
pub fn run(args: &GenerateArgs<'_>) -> Result<(), String> {
    let config = GeneratorConfig::load(args.config).map_err(|e| e.to_string())?;

    let hierarchical: Option<HierarchicalContext> =
        args.context.map(read_document).transpose()?;
    let story = resolve_story(args.story, hierarchical.as_ref())?;

    let options = GenerateOptions {
        selected_platforms: args.platforms.to_vec(),
        additional_context: args.additional_context.map(str::to_string),
        hierarchical_context: hierarchical,
    };

    let record_to = env::var(RECORD_VAR).ok().filter(|v| !v.is_empty()).map(PathBuf::from);
    let ctx = build_context(config, args.replay, record_to.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    let specs = runtime.block_on(generate_task_specs(&ctx, &story, &options));

    publish(&specs, args.format, ctx, &mut std::io::stdout().lock())
}

/// Prints the document and summary, then writes any pending recording.
///
/// The document is emitted even when the recording cannot be written.
fn publish<W: Write>(
    specs: &GeneratedSpecs,
    format: OutputFormat,
    ctx: ServiceContext,
    out: &mut W,
) -> Result<(), String> {
    let rendered = render(specs, format).and_then(|document| {
        writeln!(out, "{document}").map_err(|e| format!("failed to write output: {e}"))
    });
    eprint!("{}", summary(specs));

    match ctx.finish() {
        Ok(Some(path)) => eprintln!("Recording saved to: {}", path.display()),
        Ok(None) => {}
        Err(e) => return Err(format!("failed to save recording: {e}")),
    }
    rendered
}

fn build_context(
    config: GeneratorConfig,
    replay: Option<&Path>,
    record_to: Option<&Path>,
) -> Result<ServiceContext, String> {
    match (replay, record_to) {
        (Some(cassette), None) => {
            info!(cassette = %cassette.display(), "replaying completions");
            ServiceContext::replaying(config, cassette).map_err(|e| e.to_string())
        }
        (None, None) => Ok(ServiceContext::live(config)),
        (replay, Some(out)) => {
            info!(cassette = %out.display(), "recording completions");
            let inner: Box<dyn LlmClient> = match replay {
                Some(cassette) => {
                    let cassette = Cassette::load(cassette).map_err(|e| e.to_string())?;
                    Box::new(ReplayingLlmClient::new(&cassette))
                }
                None => Box::new(AnthropicClient::new(&config)),
            };
            Ok(ServiceContext::recording(inner, config, out))
        }
    }
}

/// Picks `--story`, falling back to the context file's `user_story` layer.
fn resolve_story(
    story: Option<&Path>,
    hierarchical: Option<&HierarchicalContext>,
) -> Result<UserStoryInput, String> {
    if let Some(path) = story {
        return read_document(path);
    }
    hierarchical
        .and_then(|h| h.user_story.clone())
        .ok_or_else(|| "no user story given: pass --story or a --context file with a user_story".to_string())
}

/// Reads a YAML or JSON document.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_yaml::from_str(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

fn render(specs: &GeneratedSpecs, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(specs).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(specs).map_err(|e| e.to_string()),
    }
}

fn summary(specs: &GeneratedSpecs) -> String {
    let mut out = String::new();
    for report in &specs.platform_reports {
        let _ = writeln!(
            out,
            "{:<18} {:<15} {} task(s), {} attempt(s)",
            report.platform_name,
            status_label(report.status),
            report.task_count,
            report.attempts
        );
    }
    let _ = writeln!(
        out,
        "Overall confidence: {}% ({} tasks, {} assumptions, {} input / {} output tokens)",
        specs.overall_confidence,
        specs.tasks.len(),
        specs.assumptions.len(),
        specs.usage.input_tokens,
        specs.usage.output_tokens
    );
    out
}

fn status_label(status: PlatformStatus) -> &'static str {
    match status {
        PlatformStatus::Generated => "generated",
        PlatformStatus::Empty => "empty",
        PlatformStatus::Truncated => "truncated",
        PlatformStatus::RequestFailed => "request failed",
        PlatformStatus::ParseFailed => "parse failed",
    }
}
