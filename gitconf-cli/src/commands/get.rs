//! Get command implementation.

use crate::error::CliError;
use crate::utils::{read_document, GlobalOptions};
use clap::Args;
use std::io::Write;

/// Print the effective value of each name.
#[derive(Args)]
pub struct GetCommand {
    /// Names in `section[.subsection].key` form
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

impl GetCommand {
    /// Execute the get command.
    ///
    /// Values are printed one per line in argument order. The first name
    /// without a value stops the command with [`CliError::KeyNotFound`].
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let document = read_document(global)?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        for name in &self.names {
            let value = document
                .get(name)
                .ok_or_else(|| CliError::KeyNotFound(name.clone()))?;
            writeln!(handle, "{value}")?;
        }
        Ok(())
    }
}
