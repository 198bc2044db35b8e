//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::platform::PlatformId;

/// Top-level CLI parser for `storyspec`.
#[derive(Debug, Parser)]
#[command(name = "storyspec", version, about = "Turn a user story into per-platform implementation tasks")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate tasks, integration contracts and a definition of done for a story.
    Generate {
        /// YAML or JSON file holding the user story.
        #[arg(long)]
        story: Option<PathBuf>,

        /// YAML or JSON file holding project, epic and story context.
        #[arg(long)]
        context: Option<PathBuf>,

        /// Platform to generate for; repeat for several.
        #[arg(short, long = "platform", required = true)]
        platforms: Vec<PlatformId>,

        /// Extra instructions appended to every platform prompt.
        #[arg(long)]
        additional_context: Option<String>,

        /// Serve completions from a recorded cassette instead of the API.
        #[arg(long)]
        replay: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// YAML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the platforms tasks can be generated for.
    Platforms,
}

/// Serialization used for `generate` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}
