//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options, the config file selector and subcommands.

use crate::commands::{
    AddCommand, CompletionsCommand, GetAllCommand, GetCommand, ListCommand, SetCommand,
    ShowPathCommand, UnsetAllCommand, UnsetCommand,
};
use crate::utils::FileSelector;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for reading and editing git-style configuration.
#[derive(Parser)]
#[command(name = "gitconf")]
#[command(version, about = "Read and edit git-style configuration files", long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .args(["system", "global", "local", "file"])
        .multiple(false)
))]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Use the system-wide config file
    #[arg(long)]
    pub system: bool,

    /// Use the per-user config file
    #[arg(long)]
    pub global: bool,

    /// Use the repository config file
    #[arg(long)]
    pub local: bool,

    /// Use the given config file
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Merge lower-precedence files into the selected one when reading
    #[arg(long)]
    pub include: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The file selection expressed by `--system`, `--global`, `--local`
    /// and `--file`.
    pub fn file_selector(&self) -> FileSelector {
        if let Some(ref path) = self.file {
            FileSelector::File(path.clone())
        } else if self.system {
            FileSelector::System
        } else if self.global {
            FileSelector::Global
        } else if self.local {
            FileSelector::Local
        } else {
            FileSelector::Auto
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the effective value of each name
    Get(GetCommand),

    /// Print every value of each name
    GetAll(GetAllCommand),

    /// List all values
    List(ListCommand),

    /// Append a value
    Add(AddCommand),

    /// Set a value, replacing the last one
    Set(SetCommand),

    /// Remove the last value of a name
    Unset(UnsetCommand),

    /// Remove every value of a name
    UnsetAll(UnsetAllCommand),

    /// Print the repository metadata directory
    ShowPath(ShowPathCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
