//! Record-replay round-trip integration test.
//!
//! Proves that the record/replay system works end-to-end:
//! 1. Build a cassette with `CassetteRecorder`.
//! 2. Run the pipeline against it with `ServiceContext::replaying()`.
//! 3. Run it again through `ServiceContext::recording()` and write a new cassette.
//! 4. Replay the new cassette and assert identical output.

use std::path::Path;

use serde_json::json;

use storyspec::adapters::replaying::ReplayingLlmClient;
use storyspec::cassette::format::Cassette;
use storyspec::cassette::recorder::CassetteRecorder;
use storyspec::config::GeneratorConfig;
use storyspec::context::ServiceContext;
use storyspec::error::CompletionError;
use storyspec::generate::{generate_task_specs, GenerateOptions};
use storyspec::platform::PlatformId;
use storyspec::ports::llm::{CompletionRequest, CompletionResponse};
use storyspec::spec::{GeneratedSpecs, PlatformStatus};
use storyspec::story::UserStoryInput;

fn request(label: &str) -> CompletionRequest {
    CompletionRequest {
        label: label.into(),
        model: "claude-test".into(),
        system: "recorded system prompt".into(),
        prompt: "recorded prompt".into(),
        max_tokens: 16_000,
    }
}

fn ok(text: String, truncated: bool) -> Result<CompletionResponse, CompletionError> {
    Ok(CompletionResponse { text, truncated, input_tokens: 1_200, output_tokens: 800 })
}

fn platform_doc(task: &str, confidence: &str, dod: &[&str]) -> String {
    json!({
        "tasks": [{
            "name": task,
            "platform": "backend",
            "confidence": confidence,
            "objective": format!("Deliver {task}"),
            "definition_of_done": dod,
            "implementation_steps": [{"step": 1, "title": "Start", "details": "Do it"}]
        }],
        "assumptions": [{
            "topic": "Time zone",
            "decision": "Store UTC",
            "rationale": "Members travel",
            "confidence": "HIGH",
            "category": "data_model",
            "unknowns": ["should be cleared"]
        }]
    })
    .to_string()
}

fn write_seed_cassette(path: &Path) {
    let mut recorder = CassetteRecorder::new(path, "reservations", "claude-test");
    recorder.record(
        &request("platform:backend"),
        &ok(platform_doc("Upcoming reservations endpoint", "HIGH", &["Tests pass"]), false),
    );
    // mobile hits the output cap once and succeeds on the strict retry
    recorder.record(&request("platform:mobile"), &ok("{\"tasks\": [{\"name\": \"Res".into(), true));
    recorder.record(
        &request("platform:mobile:retry"),
        &ok(platform_doc("Reservations screen", "LOW", &["Tests pass", "Empty state shown"]), false),
    );
    recorder.record(
        &request("integration"),
        &ok(
            json!({
                "api_contracts": [{"endpoint": "/api/v1/members/me/reservations", "method": "GET", "platforms": ["backend", "mobile"]}],
                "shared_types": [{"name": "Reservation", "definition": "{ id, starts_at }", "platforms": ["backend", "mobile"]}],
                "integration_sequence": [
                    {"order": 2, "platform": "mobile", "depends_on": "backend", "deliverable": "Screen"},
                    {"order": 1, "platform": "backend", "deliverable": "Endpoint"}
                ],
                "integration_tests": [{"name": "Member sees upcoming bookings", "platforms": ["backend", "mobile"], "scenario": "..."}]
            })
            .to_string(),
            false,
        ),
    );
    recorder.finish().expect("seed cassette should be written");
}

async fn run_pipeline(ctx: &ServiceContext) -> GeneratedSpecs {
    let story = UserStoryInput {
        narrative: "As a member, I want to view my upcoming reservations".into(),
        ..UserStoryInput::default()
    };
    let options = GenerateOptions {
        selected_platforms: vec![PlatformId::Backend, PlatformId::Mobile],
        ..GenerateOptions::default()
    };
    generate_task_specs(ctx, &story, &options).await
}

#[tokio::test]
async fn record_then_replay_produces_identical_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let seed = dir.path().join("seed.cassette.yaml");
    let rerecorded = dir.path().join("rerecorded.cassette.yaml");
    write_seed_cassette(&seed);

    // --- Phase 1: replay the seed cassette ---
    let ctx = ServiceContext::replaying(GeneratorConfig::default(), &seed).unwrap();
    let first = run_pipeline(&ctx).await;

    let names: Vec<&str> = first.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Upcoming reservations endpoint", "Reservations screen"]);
    assert_eq!(first.tasks[1].platform, PlatformId::Mobile);
    assert_eq!(first.platform_reports[1].status, PlatformStatus::Generated);
    assert_eq!(first.platform_reports[1].attempts, 2);
    assert_eq!(first.overall_confidence, 70);
    assert!(first.assumptions.iter().all(|a| a.unknowns.is_empty()));

    let strategy = first.integration_strategy.as_ref().expect("integration strategy");
    assert_eq!(strategy.integration_sequence[0].order, 1);
    let integration_dod = first.definition_of_done.integration_dod.as_ref().unwrap();
    assert_eq!(integration_dod.checklist[0], "E2E: Member sees upcoming bookings");
    assert_eq!(first.usage.input_tokens, 4 * 1_200);

    // --- Phase 2: run again while recording ---
    let inner = ReplayingLlmClient::new(&Cassette::load(&seed).unwrap());
    let ctx = ServiceContext::recording(Box::new(inner), GeneratorConfig::default(), &rerecorded);
    let second = run_pipeline(&ctx).await;
    let written = ctx.finish().unwrap();
    assert_eq!(written.as_deref(), Some(rerecorded.as_path()));
    assert_eq!(first, second);

    let cassette = Cassette::load(&rerecorded).unwrap();
    assert_eq!(cassette.name, "rerecorded");
    assert_eq!(cassette.exchanges.len(), 4);
    assert_eq!(cassette.exchanges.last().unwrap().label, "integration");

    // --- Phase 3: replay the new recording, determinism check ---
    let ctx = ServiceContext::replaying(GeneratorConfig::default(), &rerecorded).unwrap();
    let third = run_pipeline(&ctx).await;
    assert_eq!(first, third, "replaying the re-recorded cassette changed the output");
}

#[tokio::test]
async fn recorded_failures_replay_as_failures() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("failure.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&path, "failure", "claude-test");
    recorder.record(
        &request("platform:backend"),
        &ok(platform_doc("Upcoming reservations endpoint", "MEDIUM", &[]), false),
    );
    recorder.record(
        &request("platform:mobile"),
        &Err(CompletionError::Api { status: 529, message: "overloaded".into() }),
    );
    recorder.finish().unwrap();

    let ctx = ServiceContext::replaying(GeneratorConfig::default(), &path).unwrap();
    let specs = run_pipeline(&ctx).await;

    assert_eq!(specs.tasks.len(), 1);
    assert_eq!(specs.platform_reports[1].status, PlatformStatus::RequestFailed);
    assert!(specs.integration_strategy.is_none());
    assert_eq!(specs.overall_confidence, 70);
}
