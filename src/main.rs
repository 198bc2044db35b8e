//! Binary entrypoint for the `storyspec` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // ANTHROPIC_API_KEY and STORYSPEC_* may come from a local .env file.
    let _ = dotenvy::dotenv();

    // Recording is handled in commands::dispatch via STORYSPEC_RECORD=<file>.
    match storyspec::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
