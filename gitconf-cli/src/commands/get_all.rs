//! Get-all command implementation.

use crate::error::CliError;
use crate::utils::{read_document, GlobalOptions};
use clap::Args;
use std::io::Write;

/// Print every value of each name, lowest precedence first.
#[derive(Args)]
pub struct GetAllCommand {
    /// Names in `section[.subsection].key` form
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

impl GetAllCommand {
    /// Execute the get-all command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let document = read_document(global)?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        for name in &self.names {
            let values = document
                .get_all(name)
                .ok_or_else(|| CliError::KeyNotFound(name.clone()))?;
            for value in values {
                writeln!(handle, "{value}")?;
            }
        }
        Ok(())
    }
}
