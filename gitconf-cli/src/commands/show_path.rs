//! Command to show the discovered metadata directory.

use crate::error::CliError;
use crate::utils::{resolve_path, GlobalOptions};
use clap::Args;
use gitconf::GitDirLocator;
use std::path::PathBuf;

/// Show the metadata directory of the repository containing a path.
#[derive(Args)]
pub struct ShowPathCommand {
    /// Path to resolve
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Print the shared directory of a linked worktree instead
    #[arg(long)]
    pub common: bool,
}

impl ShowPathCommand {
    /// Execute the show-path command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let path = resolve_path(self.path)?;
        let dirs = GitDirLocator::new().find(&path)?;

        let shown = if self.common {
            dirs.common_dir
        } else {
            dirs.git_dir
        };
        println!("{}", shown.display());
        Ok(())
    }
}
