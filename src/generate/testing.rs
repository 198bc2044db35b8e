//! Scripted completion client for pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::GeneratorConfig;
use crate::context::ServiceContext;
use crate::error::CompletionError;
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

enum Step {
    Reply { text: String, truncated: bool, delay: Duration },
    Fail(String),
}

/// Answers requests from per-label queues and logs every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedLlmClient {
    script: Mutex<HashMap<String, VecDeque<Step>>>,
    log: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedLlmClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(self, label: &str, step: Step) -> Self {
        self.script.lock().unwrap().entry(label.to_string()).or_default().push_back(step);
        self
    }

    pub(crate) fn reply(self, label: &str, text: impl Into<String>) -> Self {
        self.reply_after(label, text, 0)
    }

    pub(crate) fn reply_after(self, label: &str, text: impl Into<String>, millis: u64) -> Self {
        let step =
            Step::Reply { text: text.into(), truncated: false, delay: Duration::from_millis(millis) };
        self.push(label, step)
    }

    pub(crate) fn truncated(self, label: &str) -> Self {
        let step = Step::Reply {
            text: "{\"tasks\": [{\"name\": \"cut".into(),
            truncated: true,
            delay: Duration::ZERO,
        };
        self.push(label, step)
    }

    pub(crate) fn fail(self, label: &str, message: &str) -> Self {
        self.push(label, Step::Fail(message.into()))
    }

    /// Shared handle on the request log; stays valid after the client is boxed.
    pub(crate) fn log(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.log)
    }

    pub(crate) fn into_context(self) -> (ServiceContext, Arc<Mutex<Vec<CompletionRequest>>>) {
        let log = self.log();
        (ServiceContext::new(Box::new(self), GeneratorConfig::default()), log)
    }
}

impl LlmClient for ScriptedLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        self.log.lock().unwrap().push(request.clone());
        let step = self.script.lock().unwrap().get_mut(&request.label).and_then(VecDeque::pop_front);
        let label = request.label.clone();

        Box::pin(async move {
            match step {
                None => Err(CompletionError::Replay(label)),
                Some(Step::Fail(message)) => Err(CompletionError::Http(message)),
                Some(Step::Reply { text, truncated, delay }) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    Ok(CompletionResponse { text, truncated, input_tokens: 100, output_tokens: 50 })
                }
            }
        })
    }
}

/// Labels of logged requests, in call order.
pub(crate) fn labels(log: &Arc<Mutex<Vec<CompletionRequest>>>) -> Vec<String> {
    log.lock().unwrap().iter().map(|r| r.label.clone()).collect()
}

/// A one-task platform document with the given confidence and DoD items.
pub(crate) fn task_doc(name: &str, confidence: &str, dod: &[&str]) -> String {
    serde_json::json!({
        "tasks": [{
            "name": name,
            "platform": "somewhere-else",
            "priority": "P1",
            "time_estimate": "4h",
            "confidence": confidence,
            "objective": format!("Deliver {name}"),
            "outputs": [format!("{name}.rs")],
            "definition_of_done": dod,
        }],
        "assumptions": [{
            "topic": format!("{name} scope"),
            "decision": "Keep it small",
            "rationale": "Story is narrow",
            "confidence": "MEDIUM",
            "category": "architecture",
            "unknowns": ["volume"]
        }]
    })
    .to_string()
}
