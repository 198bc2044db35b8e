//! Types describing what the generator produces.
//!
//! Everything here is deserialized from model output, so every field is
//! forgiving about shape (see [`lenient`]).

mod assumption;
mod integration;
pub mod lenient;
mod output;
mod task;

pub use assumption::{Assumption, AssumptionCategory};
pub use integration::{ApiContract, IntegrationStep, IntegrationStrategy, IntegrationTest, SharedType};
pub use output::{
    DefinitionOfDone, GeneratedSpecs, IntegrationDod, PlatformDod, PlatformReport, PlatformStatus,
    TokenUsage,
};
pub use task::{CodeSnippet, Confidence, GeneratedTask, ImplementationStep};
