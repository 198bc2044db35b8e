//! Command dispatch and handlers.

pub mod generate;
pub mod platforms;

use crate::cli::Command;

/// Environment variable naming a cassette file to record completions into.
pub const RECORD_VAR: &str = "STORYSPEC_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `STORYSPEC_RECORD` is set to a file path, every completion exchange
/// of a `generate` run is recorded to that cassette.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Generate {
            story,
            context,
            platforms,
            additional_context,
            replay,
            format,
            config,
        } => generate::run(&generate::GenerateArgs {
            story: story.as_deref(),
            context: context.as_deref(),
            platforms,
            additional_context: additional_context.as_deref(),
            replay: replay.as_deref(),
            format: *format,
            config: config.as_deref(),
        }),
        Command::Platforms => {
            platforms::run();
            Ok(())
        }
    }
}
