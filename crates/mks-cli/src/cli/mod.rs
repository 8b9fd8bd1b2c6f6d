use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `mks` binary.
#[derive(Debug, Parser)]
#[command(
    name = "mks",
    version,
    about = "Keep a local JSON file of Mark Six draw results in sync"
)]
pub struct Cli {
    /// Defaults to `sync` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, layered above `mks.toml`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch live and history draws, merge them into the data file
    Sync(SyncArgs),
    /// Summarize the data file without touching the network
    Status,
}

#[derive(Debug, Default, Args)]
pub struct SyncArgs {
    /// Fetch and merge, but do not write the data file
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }

    /// The subcommand to run, `sync` for a bare invocation.
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Sync(SyncArgs::default()))
    }
}
